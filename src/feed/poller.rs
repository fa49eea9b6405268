use super::{FeedHandle, FeedInner, delivery};
use crate::models::{
    error::FeedError,
    key::KeyCursor,
    status::Status,
    view::{QueryParams, Row, View, ViewResponse},
};
use crate::services::{endpoint::Endpoint, endpoint::STATUS_TYPE, runtime::Runtime};
use serde_json::Value;
use std::rc::Rc;

/// Offset of the first back-filled status: only the newest `max_old` are replayed.
pub fn initial_skip(count: u64, max_old: u64) -> u64 {
    count.saturating_sub(max_old)
}

/// Parameters of the next batch request.
///
/// Until a first status has been seen the bootstrap request is repeated; after
/// that the range starts at the cursor, inclusive.
pub(super) fn batch_params(cursor: Option<&KeyCursor>, skip: u64) -> QueryParams {
    match cursor {
        Some(key) => QueryParams::new().startkey(key.as_str()),
        None => QueryParams::new().skip(skip),
    }
}

/// A fetched batch and the cursor that follows it.
///
/// The cursor is a `Result` so the statuses can be delivered even when the
/// last key has no valid successor.
#[derive(Debug)]
pub(super) struct Batch {
    pub(super) next_cursor: Result<KeyCursor, FeedError>,
    pub(super) rows: Vec<Row<Status>>,
}

/// Splits a status page into its statuses and the next cursor.
///
/// The cursor comes from the last raw row so a row whose document fails to
/// decode is still paged past; such rows are dropped with a warning.
pub(super) fn take_batch(response: ViewResponse<Value>) -> Option<Batch> {
    let last = response.rows.last()?;
    let next_cursor = KeyCursor::try_from(&last.key).and_then(|key| key.checked_next());

    let rows = response
        .rows
        .into_iter()
        .filter_map(|row| match row.decode::<Status>() {
            Ok(row) => Some(row),
            Err(e) => {
                console_warn!("skipping status: {e}");
                None
            }
        })
        .collect();

    Some(Batch { next_cursor, rows })
}

/// Bootstrap, then poll forever.
///
/// Every iteration issues one request and then one reschedule, whether or not
/// the batch was empty and whether or not earlier deliveries are finished.
/// Ends with `Ok` when stopped and with the first failure otherwise.
pub(super) async fn poll<E: Endpoint, R: Runtime>(
    inner: Rc<FeedInner<E, R>>,
    handle: FeedHandle,
) -> Result<(), FeedError> {
    let endpoint = &inner.endpoint;
    let max_old = inner.config.max_old_tweets();

    let skip = match inner.attempt(|| endpoint.count(STATUS_TYPE)).await? {
        Some(count) => initial_skip(count, max_old),
        None => {
            console_warn!("count view returned no {STATUS_TYPE} row; assuming an empty database");
            0
        }
    };
    console_debug!("bootstrap skip {skip}");

    let mut cursor: Option<KeyCursor> = None;
    loop {
        if handle.is_stopped() {
            return Ok(());
        }

        let params = batch_params(cursor.as_ref(), skip);
        let response = inner
            .attempt(|| endpoint.query(View::GetTweets, &params))
            .await?;

        if let Some(batch) = take_batch(response) {
            console_debug!("fetched {} statuses", batch.rows.len());
            if !batch.rows.is_empty() {
                let task_inner = Rc::clone(&inner);
                let task_handle = handle.clone();
                inner.runtime.spawn_local(async move {
                    delivery::deliver(task_inner, task_handle, batch.rows).await;
                });
            }
            cursor = Some(batch.next_cursor?);
        }

        if handle.is_stopped() {
            return Ok(());
        }
        inner.runtime.sleep(inner.config.update_interval_ms()).await;
    }
}
