pub mod couch;
pub mod endpoint;
pub mod retry;
pub mod runtime;
