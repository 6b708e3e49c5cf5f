//! # MealBridge Infrastructure
//!
//! Concrete implementations of the ports defined in `mealbridge-core`:
//! the data store clients, token verification, and push senders.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL store via SeaORM
//! - `auth` - JWT verification of provider-issued tokens
//! - `push` - HTTP push delivery through the notification edge function

pub mod notify;
pub mod store;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(feature = "postgres")]
pub mod database;

// Re-exports - In-Memory
pub use notify::LogPushSender;
pub use store::MemStore;

#[cfg(feature = "auth")]
pub use auth::JwtVerifier;

#[cfg(feature = "push")]
pub use notify::{EdgePushConfig, EdgePushSender};

#[cfg(feature = "postgres")]
pub use database::{DatabaseConfig, PgStore, connect};
