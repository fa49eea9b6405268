use crate::models::error::FeedError;

/// Default failure notification: a blocking browser alert carrying the error text.
///
/// Outside the browser there is no window to alert in, so the message goes to
/// the error log only.
pub fn alert_error(error: &FeedError) {
    let message = format!("tweetbase error: {error}");
    console_error!("{message}");

    #[cfg(target_arch = "wasm32")]
    {
        let shown = web_sys::window()
            .ok_or_else(|| wasm_bindgen::JsValue::from_str("no window"))
            .and_then(|window| window.alert_with_message(&message));
        if let Err(e) = shown {
            console_warn!("Failed to show alert: {e:?}");
        }
    }
}
