//! JWT verification.
//!
//! The auth provider signs tokens with a shared secret; we only
//! validate and pull the subject out. Issuing tokens is not our job.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

use mealbridge_core::ports::{AuthClaims, AuthError, TokenVerifier};

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
}

pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

impl TokenVerifier for JwtVerifier {
    fn verify(&self, token: &str) -> Result<AuthClaims, AuthError> {
        let data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|err| {
                match err.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    _ => AuthError::InvalidToken(err.to_string()),
                }
            })?;

        Ok(AuthClaims {
            user_id: data.claims.sub,
            exp: data.claims.exp,
        })
    }
}
