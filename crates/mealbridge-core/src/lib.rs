//! # MealBridge Core
//!
//! The domain layer of the MealBridge food-sharing platform.
//! This crate contains the food post lifecycle, request matching, and
//! notification dispatch logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;
pub mod view;

pub use error::{DomainError, StoreError};
