//! SeaORM entities mirroring the store schema.

pub mod food_post;
pub mod food_request;
pub mod user;
