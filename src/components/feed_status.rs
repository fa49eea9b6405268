use crate::hooks::use_feed::FeedState;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FeedStatusProps {
    pub state: FeedState,
}

#[function_component(FeedStatus)]
pub fn feed_status(props: &FeedStatusProps) -> Html {
    let state = &props.state;

    if let Some(msg) = &state.stopped {
        return html! {
            <div class="status error">
                <p>{"❌ Feed stopped: "}{msg}</p>
            </div>
        };
    }

    let warning = state.error.as_ref().map(|msg| {
        html! { <p class="warning">{"⚠️ "}{msg}</p> }
    });

    if state.is_waiting() {
        html! {
            <div class="status loading">
                <div class="spinner"></div>
                <p>{"Waiting for statuses..."}</p>
                {warning}
            </div>
        }
    } else {
        html! {
            <div class="status success">
                <p>{format!("✅ Live: {} statuses received", state.updates.len())}</p>
                {warning}
            </div>
        }
    }
}
