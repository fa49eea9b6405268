use gloo_timers::future::TimeoutFuture;
use std::future::Future;

/// Timer and task-spawning capability the feed runs on.
///
/// Everything is single-threaded: tasks are spawned locally and need not be
/// `Send`.
pub trait Runtime: Clone + 'static {
    /// Completes after `millis` milliseconds.
    fn sleep(&self, millis: u32) -> impl Future<Output = ()> + 'static;

    /// Runs `task` concurrently with the caller on the current thread.
    fn spawn_local<F>(&self, task: F)
    where
        F: Future<Output = ()> + 'static;
}

/// Browser event loop: `setTimeout` timers and microtask-driven local tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserRuntime;

impl Runtime for BrowserRuntime {
    fn sleep(&self, millis: u32) -> impl Future<Output = ()> + 'static {
        TimeoutFuture::new(millis)
    }

    fn spawn_local<F>(&self, task: F)
    where
        F: Future<Output = ()> + 'static,
    {
        wasm_bindgen_futures::spawn_local(task);
    }
}
