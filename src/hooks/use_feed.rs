use std::rc::Rc;
use yew::prelude::*;

use crate::config::{Config, FeedConfig};
use crate::feed::{Feed, FeedHandle};
use crate::models::status::StatusUpdate;

/// What the viewer shows: the most recent statuses, newest first.
///
/// `error` holds the last reported failure, which may only have cost one
/// status; `stopped` is set once the poll loop itself has ended.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct FeedState {
    pub updates: Vec<StatusUpdate>,
    pub error: Option<String>,
    pub stopped: Option<String>,
    pub connected: bool,
}

pub enum FeedAction {
    Connected,
    Update(StatusUpdate),
    /// A reported failure; the feed may still be running.
    Failed(String),
    /// The poll loop ended with this error.
    Stopped(String),
}

impl FeedState {
    /// Returns true until the first status arrives or the feed stops
    pub fn is_waiting(&self) -> bool {
        self.updates.is_empty() && self.stopped.is_none()
    }
}

impl Reducible for FeedState {
    type Action = FeedAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            FeedAction::Connected => next.connected = true,
            FeedAction::Update(update) => {
                next.updates.insert(0, update);
                next.updates.truncate(Config::MAX_DISPLAYED);
                if next.stopped.is_none() {
                    next.error = None;
                }
            }
            FeedAction::Failed(msg) => next.error = Some(msg),
            FeedAction::Stopped(msg) => {
                next.error = Some(msg.clone());
                next.stopped = Some(msg);
                next.connected = false;
            }
        }
        Rc::new(next)
    }
}

#[hook]
pub fn use_feed(server: String, database: String) -> UseReducerHandle<FeedState> {
    let state = use_reducer(FeedState::default);

    {
        let dispatcher = state.dispatcher();

        use_effect_with((server, database), move |(server, database)| {
            let on_update = dispatcher.clone();
            let on_error = dispatcher.clone();

            let config = FeedConfig::builder()
                .server(server.clone())
                .database(database.clone())
                .max_old_tweets(Config::BACKFILL)
                .on_update(move |update| on_update.dispatch(FeedAction::Update(update)))
                .on_error(move |e| on_error.dispatch(FeedAction::Failed(e.to_string())))
                .build();

            let handle = match Feed::new(config) {
                Ok(feed) => {
                    dispatcher.dispatch(FeedAction::Connected);
                    let handle = FeedHandle::new();
                    let task_handle = handle.clone();
                    let on_stop = dispatcher.clone();
                    wasm_bindgen_futures::spawn_local(async move {
                        if let Err(e) = feed.run(task_handle).await {
                            on_stop.dispatch(FeedAction::Stopped(e.to_string()));
                        }
                    });
                    Some(handle)
                }
                Err(e) => {
                    dispatcher.dispatch(FeedAction::Stopped(e.to_string()));
                    None
                }
            };

            move || {
                if let Some(handle) = handle {
                    handle.stop();
                }
            }
        });
    }

    state
}
