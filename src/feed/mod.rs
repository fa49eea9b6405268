//! The live feed: polls the status view, then enriches and paces each new status
//! out to the update callback.
//!
//! A feed runs as two kinds of local task. The poll loop owns the pagination
//! cursor and never waits on delivery; every non-empty batch it fetches is
//! handed to its own delivery task, which releases one status per display
//! interval.

mod delivery;
mod poller;

pub use poller::initial_skip;

use crate::config::FeedConfig;
use crate::models::{error::FeedError, status::Status};
use crate::services::{
    couch::CouchClient,
    endpoint::{Endpoint, STATUS_TYPE, USER_TYPE},
    retry::retry_with_backoff,
    runtime::{BrowserRuntime, Runtime},
};
use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

// FEED HANDLE
#[derive(Debug, Default)]
struct Lifecycle {
    stopped: Cell<bool>,
    running: Cell<bool>,
}

/// Lifecycle handle of one running feed.
///
/// Stopping is cooperative: the poll loop checks the flag before each
/// reschedule and delivery tasks check it before each paced step.
#[derive(Debug, Clone, Default)]
pub struct FeedHandle {
    state: Rc<Lifecycle>,
}

impl FeedHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks the feed to stop. Idempotent.
    pub fn stop(&self) {
        self.state.stopped.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.state.stopped.get()
    }

    /// True while the poll loop is alive.
    pub fn is_running(&self) -> bool {
        self.state.running.get()
    }

    fn set_running(&self, running: bool) {
        self.state.running.set(running);
    }
}

// FEED
struct FeedInner<E, R> {
    config: FeedConfig,
    endpoint: E,
    runtime: R,
}

impl<E: Endpoint, R: Runtime> FeedInner<E, R> {
    /// Runs `operation` under the configured retry policy.
    async fn attempt<F, Fut, T>(&self, operation: F) -> Result<T, FeedError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, FeedError>>,
    {
        retry_with_backoff(&self.runtime, operation, self.config.max_attempts()).await
    }

    /// Surfaces a failure to the error callback.
    fn report(&self, error: &FeedError) {
        console_error!("feed error: {error}");
        (self.config.error_callback())(error);
    }
}

/// A status feed over an [`Endpoint`], scheduled on a [`Runtime`].
pub struct Feed<E, R = BrowserRuntime> {
    inner: Rc<FeedInner<E, R>>,
}

impl<E, R> Clone for Feed<E, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl Feed<CouchClient, BrowserRuntime> {
    /// Creates a browser feed talking to the CouchDB server named in `config`.
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        let endpoint = CouchClient::new(&config)?;
        Ok(Self::with_parts(config, endpoint, BrowserRuntime))
    }
}

impl<E: Endpoint, R: Runtime> Feed<E, R> {
    pub fn with_parts(config: FeedConfig, endpoint: E, runtime: R) -> Self {
        Self {
            inner: Rc::new(FeedInner {
                config,
                endpoint,
                runtime,
            }),
        }
    }

    pub fn config(&self) -> &FeedConfig {
        &self.inner.config
    }

    /// Starts the feed on its runtime and returns its lifecycle handle.
    ///
    /// Failures go to the error callback; the loop ends after the first one.
    pub fn start(&self) -> FeedHandle {
        let handle = FeedHandle::new();
        let feed = self.clone();
        let task_handle = handle.clone();
        // Mark running before the task is first polled so callers see it at once.
        handle.set_running(true);
        self.inner.runtime.spawn_local(async move {
            // Already reported through the error callback.
            let _ = feed.run(task_handle).await;
        });
        handle
    }

    /// Runs the bootstrap and poll loop until `handle` is stopped or a request fails.
    ///
    /// Returns `Ok(())` after a stop. A failure is reported through the error
    /// callback once and returned, so callers can decide whether to restart.
    pub async fn run(&self, handle: FeedHandle) -> Result<(), FeedError> {
        handle.set_running(true);
        console_log!(
            "feed starting: {} (backfill {}, poll every {}ms)",
            self.inner.config.view_url(),
            self.inner.config.max_old_tweets(),
            self.inner.config.update_interval_ms()
        );

        let result = poller::poll(Rc::clone(&self.inner), handle.clone()).await;
        handle.set_running(false);

        match &result {
            Ok(()) => console_log!("feed stopped"),
            Err(e) => self.inner.report(e),
        }
        result
    }

    /// Looks up a single status by id.
    pub async fn lookup(&self, id: &str) -> Result<Option<Status>, FeedError> {
        let endpoint = &self.inner.endpoint;
        let result = self.inner.attempt(|| endpoint.status_by_id(id)).await;
        if let Err(e) = &result {
            self.inner.report(e);
        }
        result
    }

    /// Number of stored statuses, if the count view reports one.
    pub async fn status_count(&self) -> Result<Option<u64>, FeedError> {
        let endpoint = &self.inner.endpoint;
        self.inner.attempt(|| endpoint.count(STATUS_TYPE)).await
    }

    /// Number of stored users, if the count view reports one.
    pub async fn user_count(&self) -> Result<Option<u64>, FeedError> {
        let endpoint = &self.inner.endpoint;
        self.inner.attempt(|| endpoint.count(USER_TYPE)).await
    }
}
