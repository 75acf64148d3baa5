//! Request-level authentication: turn an `Authorization` header into
//! a verified [`Identity`].

use tracing::warn;
use wellspring_core::error::WellspringResult;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::token::{self, Identity};

const BEARER_PREFIX: &str = "Bearer ";

/// Extract the token from a `Bearer <token>` header value.
pub fn bearer_token(authorization: Option<&str>) -> Option<&str> {
    authorization
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Authenticate a request from its `Authorization` header.
///
/// A missing header and any token verification failure both surface as
/// `Unauthenticated`. The user record is not consulted.
pub fn authenticate(authorization: Option<&str>, config: &AuthConfig) -> WellspringResult<Identity> {
    let token = bearer_token(authorization).ok_or(AuthError::MissingToken)?;

    token::verify_token(token, config).map_err(|e| {
        warn!(error = %e, "Rejected identity token");
        e.into()
    })
}
