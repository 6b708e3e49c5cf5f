//! Token verification for provider-issued identities.

mod jwt;

pub use jwt::JwtVerifier;
