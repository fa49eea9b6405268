use crate::models::{error::FeedError, status::StatusUpdate};
use std::fmt;
use std::rc::Rc;

// DEFAULTS
const DEFAULT_SERVER: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5984;
const DEFAULT_DATABASE: &str = "tw_test";
const DEFAULT_MAX_OLD_TWEETS: u64 = 10;
const DEFAULT_UPDATE_INTERVAL_MS: u32 = 3000;
const DEFAULT_DISPLAY_INTERVAL_MS: u32 = 300;

/// Configuration constants for the viewer application
pub struct Config;

impl Config {
    /// Number of delivered statuses kept on screen
    pub const MAX_DISPLAYED: usize = 50;

    /// Older statuses to back-fill when the viewer connects
    pub const BACKFILL: u64 = 20;
}

/// Invoked with each enriched status.
pub type UpdateCallback = Rc<dyn Fn(StatusUpdate)>;

/// Invoked with each failure the feed surfaces.
pub type ErrorCallback = Rc<dyn Fn(&FeedError)>;

/// Order in which a fetched batch is handed to the update callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryOrder {
    /// Drain from the tail: newest status in the batch first.
    #[default]
    Reversed,
    /// Drain from the head: statuses in key order.
    Arrival,
}

// FEED CONFIGURATION
/// Options for a running feed, resolved once at construction.
#[derive(Clone)]
pub struct FeedConfig {
    server: String,
    port: u16,
    database: String,
    live: bool,
    max_old_tweets: u64,
    update_interval_ms: u32,
    display_interval_ms: u32,
    delivery_order: DeliveryOrder,
    max_attempts: u32,
    base_url: Option<String>,
    update_callback: UpdateCallback,
    error_callback: ErrorCallback,
}

impl FeedConfig {
    /// Creates a builder for constructing a `FeedConfig`.
    pub fn builder() -> FeedConfigBuilder {
        FeedConfigBuilder::default()
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// Accepted for compatibility; has no effect on polling.
    pub fn live(&self) -> bool {
        self.live
    }

    pub fn max_old_tweets(&self) -> u64 {
        self.max_old_tweets
    }

    pub fn update_interval_ms(&self) -> u32 {
        self.update_interval_ms
    }

    pub fn display_interval_ms(&self) -> u32 {
        self.display_interval_ms
    }

    pub fn delivery_order(&self) -> DeliveryOrder {
        self.delivery_order
    }

    /// Attempts per request; 1 means no retry.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Root of the design document's views, without a trailing slash.
    pub fn view_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!(
                "http://{}:{}/{}/_design/twitter/_view",
                self.server, self.port, self.database
            ),
        }
    }

    pub fn update_callback(&self) -> &UpdateCallback {
        &self.update_callback
    }

    pub fn error_callback(&self) -> &ErrorCallback {
        &self.error_callback
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        FeedConfigBuilder::default().build()
    }
}

impl fmt::Debug for FeedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedConfig")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("live", &self.live)
            .field("max_old_tweets", &self.max_old_tweets)
            .field("update_interval_ms", &self.update_interval_ms)
            .field("display_interval_ms", &self.display_interval_ms)
            .field("delivery_order", &self.delivery_order)
            .field("max_attempts", &self.max_attempts)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

// FEED CONFIGURATION BUILDER
/// Builder for `FeedConfig`; every option left unset takes its default.
#[derive(Default)]
pub struct FeedConfigBuilder {
    server: Option<String>,
    port: Option<u16>,
    database: Option<String>,
    live: Option<bool>,
    max_old_tweets: Option<u64>,
    update_interval_ms: Option<u32>,
    display_interval_ms: Option<u32>,
    delivery_order: Option<DeliveryOrder>,
    max_attempts: Option<u32>,
    base_url: Option<String>,
    update_callback: Option<UpdateCallback>,
    error_callback: Option<ErrorCallback>,
}

impl FeedConfigBuilder {
    /// Sets the CouchDB host address.
    pub fn server(mut self, server: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self
    }

    /// Sets the CouchDB port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the database name.
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn live(mut self, live: bool) -> Self {
        self.live = Some(live);
        self
    }

    /// Caps how many existing statuses are back-filled on start.
    pub fn max_old_tweets(mut self, count: u64) -> Self {
        self.max_old_tweets = Some(count);
        self
    }

    /// Sets the delay between poll requests.
    pub fn update_interval_ms(mut self, ms: u32) -> Self {
        self.update_interval_ms = Some(ms);
        self
    }

    /// Sets the pacing delay between delivered statuses.
    pub fn display_interval_ms(mut self, ms: u32) -> Self {
        self.display_interval_ms = Some(ms);
        self
    }

    pub fn delivery_order(mut self, order: DeliveryOrder) -> Self {
        self.delivery_order = Some(order);
        self
    }

    /// Enables retry with backoff on rate-limited responses.
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Overrides the view root URL (primarily for testing).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn on_update(mut self, callback: impl Fn(StatusUpdate) + 'static) -> Self {
        self.update_callback = Some(Rc::new(callback));
        self
    }

    pub fn on_error(mut self, callback: impl Fn(&FeedError) + 'static) -> Self {
        self.error_callback = Some(Rc::new(callback));
        self
    }

    /// Builds the `FeedConfig`.
    pub fn build(self) -> FeedConfig {
        FeedConfig {
            server: self.server.unwrap_or_else(|| DEFAULT_SERVER.to_string()),
            port: self.port.unwrap_or(DEFAULT_PORT),
            database: self
                .database
                .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            live: self.live.unwrap_or(true),
            max_old_tweets: self.max_old_tweets.unwrap_or(DEFAULT_MAX_OLD_TWEETS),
            update_interval_ms: self
                .update_interval_ms
                .unwrap_or(DEFAULT_UPDATE_INTERVAL_MS),
            display_interval_ms: self
                .display_interval_ms
                .unwrap_or(DEFAULT_DISPLAY_INTERVAL_MS),
            delivery_order: self.delivery_order.unwrap_or_default(),
            max_attempts: self.max_attempts.unwrap_or(1).max(1),
            base_url: self.base_url,
            update_callback: self
                .update_callback
                .unwrap_or_else(|| Rc::new(|update: StatusUpdate| console_log!("{update}"))),
            error_callback: self
                .error_callback
                .unwrap_or_else(|| Rc::new(crate::utils::alert::alert_error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_config_builder_defaults() {
        let config = FeedConfig::builder().build();
        assert_eq!(config.server(), "127.0.0.1");
        assert_eq!(config.port(), 5984);
        assert_eq!(config.database(), "tw_test");
        assert!(config.live());
        assert_eq!(config.max_old_tweets(), 10);
        assert_eq!(config.update_interval_ms(), 3000);
        assert_eq!(config.display_interval_ms(), 300);
        assert_eq!(config.delivery_order(), DeliveryOrder::Reversed);
        assert_eq!(config.max_attempts(), 1);
    }

    #[test]
    fn test_view_url_from_server_and_database() {
        let config = FeedConfig::builder()
            .server("couch.local")
            .database("tweets")
            .build();
        assert_eq!(
            config.view_url(),
            "http://couch.local:5984/tweets/_design/twitter/_view"
        );
    }

    #[test]
    fn test_base_url_override() {
        let config = FeedConfig::builder()
            .base_url("http://localhost:8080/views/")
            .build();
        assert_eq!(config.view_url(), "http://localhost:8080/views");
    }

    #[test]
    fn test_max_attempts_never_zero() {
        let config = FeedConfig::builder().max_attempts(0).build();
        assert_eq!(config.max_attempts(), 1);
    }

    #[test]
    fn test_custom_error_callback_is_used() {
        let seen = Rc::new(Cell::new(0));
        let counter = seen.clone();
        let config = FeedConfig::builder()
            .on_error(move |_| counter.set(counter.get() + 1))
            .build();

        (config.error_callback())(&FeedError::RateLimited);
        assert_eq!(seen.get(), 1);
    }
}
