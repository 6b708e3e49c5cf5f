//! PostgreSQL store via SeaORM.

mod connections;
pub mod entity;
mod pg_store;

pub use connections::{DatabaseConfig, connect};
pub use pg_store::PgStore;

#[cfg(test)]
mod tests;
