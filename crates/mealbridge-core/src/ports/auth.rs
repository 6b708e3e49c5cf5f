//! Auth boundary.
//!
//! Sign-up, sign-in, and session persistence belong to the external
//! auth provider. The core only needs its tokens validated and a user
//! id extracted.

/// Claims extracted from a provider-issued token.
#[derive(Debug, Clone)]
pub struct AuthClaims {
    /// Opaque user id (the token's subject).
    pub user_id: String,
    /// Expiry, unix seconds.
    pub exp: i64,
}

/// Token verification service.
pub trait TokenVerifier: Send + Sync {
    /// Validate a token and decode its claims.
    fn verify(&self, token: &str) -> Result<AuthClaims, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),
}
