//! Domain-level error types.

use thiserror::Error;

use crate::domain::FoodStatus;

/// Domain errors - business logic failures.
///
/// Every public manager operation returns one of these on failure.
/// Callers surface the message and let the user retry manually; nothing
/// in this layer retries automatically.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("No user is logged in")]
    NotLoggedIn,

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Illegal status transition: {from} -> {to}")]
    InvalidTransition { from: FoodStatus, to: FoodStatus },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Data store errors.
///
/// Remote store calls may fail with any of these; they are never
/// retried here. Multi-table operations are not transactional, so a
/// store failure partway through leaves earlier writes applied.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store connection failed: {0}")]
    Connection(String),

    #[error("Store query failed: {0}")]
    Query(String),

    #[error("Row not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
