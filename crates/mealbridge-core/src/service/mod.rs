//! Application services - the managers owning the workflows.

mod accounts;
mod dispatch;
mod lifecycle;
mod matching;

pub use accounts::Accounts;
pub use dispatch::{NotificationDispatch, Notifications};
pub use lifecycle::FoodLifecycle;
pub use matching::RequestMatching;

use crate::error::DomainError;

/// An operation acting on behalf of a user needs a resolvable id.
pub(crate) fn require_actor(id: &str) -> Result<(), DomainError> {
    if id.trim().is_empty() {
        return Err(DomainError::NotLoggedIn);
    }
    Ok(())
}
