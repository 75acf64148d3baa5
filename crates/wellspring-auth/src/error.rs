//! Authentication error types.

use thiserror::Error;
use wellspring_core::error::WellspringError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("no token provided")]
    MissingToken,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("JWT signing secret is not configured")]
    MissingSecret,

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for WellspringError {
    fn from(err: AuthError) -> Self {
        match err {
            // Same reason for unknown email and wrong password.
            AuthError::InvalidCredentials => WellspringError::AuthenticationFailed {
                reason: "Invalid credentials".into(),
            },
            AuthError::MissingToken => WellspringError::unauthenticated("No token provided"),
            AuthError::TokenExpired | AuthError::TokenInvalid(_) => {
                WellspringError::unauthenticated("Invalid token")
            }
            AuthError::MissingSecret => WellspringError::Configuration(err.to_string()),
            AuthError::Crypto(msg) => WellspringError::Crypto(msg),
        }
    }
}
