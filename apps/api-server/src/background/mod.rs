//! Background tasks.

mod refresh;

pub use refresh::FeedPoller;
