pub mod feed_status;
pub mod status_card;

pub use feed_status::FeedStatus;
pub use status_card::StatusCard;
