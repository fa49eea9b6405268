use crate::config::FeedConfig;
use crate::models::{
    error::FeedError,
    view::{QueryParams, View, ViewResponse},
};
use crate::services::endpoint::Endpoint;
use reqwest::Url;
use serde_json::Value;

// COUCH CLIENT
/// HTTP client for the CouchDB view API.
#[derive(Debug, Clone)]
pub struct CouchClient {
    http: reqwest::Client,
    view_url: String,
}

impl CouchClient {
    /// Creates a client for the views described by `config`.
    pub fn new(config: &FeedConfig) -> Result<Self, FeedError> {
        Self::with_view_url(config.view_url())
    }

    /// Creates a client rooted at an explicit view URL.
    pub fn with_view_url(view_url: impl Into<String>) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| FeedError::ConfigError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            view_url: view_url.into(),
        })
    }

    /// Builds the request URL for a view query.
    pub fn url_for(&self, view: View, params: &QueryParams) -> Result<Url, FeedError> {
        let base = format!("{}/{}", self.view_url.trim_end_matches('/'), view.name());
        Url::parse_with_params(&base, params.to_query_pairs())
            .map_err(|e| FeedError::ConfigError(format!("Invalid view URL {base}: {e}")))
    }

    /// Converts a reqwest error into an appropriate `FeedError`.
    fn classify_error(&self, error: reqwest::Error) -> FeedError {
        if error.is_timeout() {
            FeedError::ApiError(format!("Request timeout: {error}"))
        } else if error.is_request() {
            FeedError::ApiError(format!("Request error: {error}"))
        } else {
            FeedError::ApiError(format!("Network error: {error}"))
        }
    }

    /// Creates an error based on HTTP status code.
    fn error_for_status(&self, status: reqwest::StatusCode, body: &str) -> FeedError {
        match status.as_u16() {
            429 => FeedError::RateLimited,
            404 => FeedError::NotFound(format!("View not found: {body}")),
            400..=499 => FeedError::ApiError(format!("Client error {status}: {body}")),
            500..=599 => FeedError::ApiError(format!("Server error {status}: {body}")),
            _ => FeedError::ApiError(format!("Unexpected status {status}: {body}")),
        }
    }
}

impl Endpoint for CouchClient {
    async fn query(
        &self,
        view: View,
        params: &QueryParams,
    ) -> Result<ViewResponse<Value>, FeedError> {
        let url = self.url_for(view, params)?;
        console_debug!("GET {url}");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.error_for_status(status, &body));
        }

        response
            .json::<ViewResponse<Value>>()
            .await
            .map_err(|e| FeedError::DataError(format!("Failed to parse {view} response: {e}")))
    }
}
