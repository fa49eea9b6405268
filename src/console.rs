//! Console logging macros.
//!
//! In the browser these forward to `gloo::console`. Native builds (tests, CLI
//! hosts) cannot call into JS, so the same call sites write to stderr instead.

macro_rules! console_log {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        {
            gloo::console::log!(&format!($($arg)*));
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            eprintln!("[tweetbase] {}", format!($($arg)*));
        }
    }};
}

macro_rules! console_debug {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        {
            gloo::console::debug!(&format!($($arg)*));
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            eprintln!("[tweetbase debug] {}", format!($($arg)*));
        }
    }};
}

macro_rules! console_warn {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        {
            gloo::console::warn!(&format!($($arg)*));
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            eprintln!("[tweetbase warn] {}", format!($($arg)*));
        }
    }};
}

macro_rules! console_error {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        {
            gloo::console::error!(&format!($($arg)*));
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            eprintln!("[tweetbase error] {}", format!($($arg)*));
        }
    }};
}
