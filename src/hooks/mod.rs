pub mod use_feed;
