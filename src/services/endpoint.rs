use crate::models::{
    error::FeedError,
    key::KeyCursor,
    status::{Status, User},
    view::{QueryParams, View, ViewResponse},
};
use serde_json::{Value, json};

/// Document type tag of status documents.
pub const STATUS_TYPE: &str = "TWITTER_STATUS";

/// Document type tag of user documents.
pub const USER_TYPE: &str = "TWITTER_USER";

/// Query access to the `_design/twitter` views.
///
/// Implementors provide [`query`](Endpoint::query); the typed lookups the feed
/// needs are built on top of it.
#[allow(async_fn_in_trait)]
pub trait Endpoint: 'static {
    /// Runs a view query and returns its raw rows.
    async fn query(
        &self,
        view: View,
        params: &QueryParams,
    ) -> Result<ViewResponse<Value>, FeedError>;

    /// Number of documents of `doc_type`, or `None` when the view has no row for it.
    async fn count(&self, doc_type: &str) -> Result<Option<u64>, FeedError> {
        let params = QueryParams::new()
            .group(true)
            .group_level(1)
            .startkey(json!([doc_type]))
            .endkey(json!([doc_type, {}]));

        let response: ViewResponse<u64> = self.query(View::CountType, &params).await?.decode()?;
        match response.rows.as_slice() {
            [row] => Ok(Some(row.value)),
            _ => Ok(None),
        }
    }

    /// Fetches one status by id.
    async fn status_by_id(&self, id: &str) -> Result<Option<Status>, FeedError> {
        let key = KeyCursor::padded(id)?;
        let params = QueryParams::new().key(key.as_str());

        let response: ViewResponse<Status> = self.query(View::GetTweets, &params).await?.decode()?;
        Ok(response.rows.into_iter().next().map(|row| row.value))
    }

    /// Fetches the author of a status; `None` unless exactly one user matches.
    async fn user(&self, user_id: &str) -> Result<Option<User>, FeedError> {
        let params = QueryParams::new().key(user_id);

        let response: ViewResponse<User> = self.query(View::GetUsers, &params).await?.decode()?;
        let mut rows = response.rows;
        if rows.len() == 1 {
            Ok(rows.pop().map(|row| row.value))
        } else {
            Ok(None)
        }
    }
}
