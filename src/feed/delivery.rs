use super::{FeedHandle, FeedInner};
use crate::config::DeliveryOrder;
use crate::models::{
    status::{Status, StatusUpdate},
    view::Row,
};
use crate::services::{endpoint::Endpoint, runtime::Runtime};
use std::collections::VecDeque;
use std::rc::Rc;

/// Pending statuses of one batch.
#[derive(Debug)]
pub(super) struct DeliveryQueue {
    pending: VecDeque<Status>,
    order: DeliveryOrder,
}

impl DeliveryQueue {
    pub(super) fn new(rows: Vec<Row<Status>>, order: DeliveryOrder) -> Self {
        Self {
            pending: rows.into_iter().map(|row| row.value).collect(),
            order,
        }
    }

    pub(super) fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Takes the next status; `Reversed` drains from the tail.
    pub(super) fn take(&mut self) -> Option<Status> {
        match self.order {
            DeliveryOrder::Reversed => self.pending.pop_back(),
            DeliveryOrder::Arrival => self.pending.pop_front(),
        }
    }
}

/// Releases one status per display interval until the batch is drained.
///
/// Each released status gets its own lookup task, so author lookups may
/// overlap while the callbacks they lead to stay paced.
pub(super) async fn deliver<E: Endpoint, R: Runtime>(
    inner: Rc<FeedInner<E, R>>,
    handle: FeedHandle,
    rows: Vec<Row<Status>>,
) {
    let mut queue = DeliveryQueue::new(rows, inner.config.delivery_order());

    while !queue.is_empty() {
        inner.runtime.sleep(inner.config.display_interval_ms()).await;
        if handle.is_stopped() {
            return;
        }
        let Some(status) = queue.take() else {
            return;
        };

        let task_inner = Rc::clone(&inner);
        inner.runtime.spawn_local(async move {
            enrich_and_deliver(task_inner, status).await;
        });
    }
}

/// Joins a status with its author and hands the pair to the update callback.
///
/// A failed lookup only drops this status.
async fn enrich_and_deliver<E: Endpoint, R: Runtime>(inner: Rc<FeedInner<E, R>>, status: Status) {
    let endpoint = &inner.endpoint;
    let user_id = status.user_id.clone();

    match inner.attempt(|| endpoint.user(&user_id)).await {
        Ok(Some(user)) => (inner.config.update_callback())(StatusUpdate { status, user }),
        Ok(None) => console_debug!("no unique user {} for status {}", user_id, status.id),
        Err(e) => inner.report(&e),
    }
}
