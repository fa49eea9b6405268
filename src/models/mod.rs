pub mod error;
pub mod key;
pub mod status;
pub mod view;
