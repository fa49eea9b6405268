//! Live status feed over a CouchDB tweet archive.
//!
//! [`Feed`] polls the `_design/twitter` views for statuses appended since the
//! last poll, joins each with its author, and hands the pairs to a callback at
//! a steady pace so a stored archive replays like a live stream.

#[macro_use]
mod console;

pub mod components;
pub mod config;
pub mod feed;
pub mod hooks;
pub mod models;
pub mod services;
pub mod utils;

pub use config::{DeliveryOrder, FeedConfig};
pub use feed::{Feed, FeedHandle};
pub use models::{
    error::FeedError,
    key::KeyCursor,
    status::{Status, StatusUpdate, User},
};
pub use services::{couch::CouchClient, endpoint::Endpoint, runtime::Runtime};
