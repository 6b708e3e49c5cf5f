//! Push sender implementations.

mod log;

#[cfg(feature = "push")]
mod edge;

pub use log::LogPushSender;

#[cfg(feature = "push")]
pub use edge::{EdgePushConfig, EdgePushSender};
