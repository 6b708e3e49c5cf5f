//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod notify;
mod store;

pub use auth::{AuthClaims, AuthError, TokenVerifier};
pub use notify::{NotifyEvent, PushSender};
pub use store::{PostPatch, PostStore, RequestPatch, RequestStore, UserPatch, UserStore};
