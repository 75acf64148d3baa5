//! Mapping of domain errors onto HTTP responses.
//!
//! Only a short message crosses the boundary; store, crypto and
//! configuration details are logged and replaced by a generic 500.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use wellspring_core::error::WellspringError;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Error type returned by every handler.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] WellspringError),

    /// Request body was not valid JSON for the endpoint.
    #[error("Invalid request body: {0}")]
    Body(#[from] JsonRejection),
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl ApiError {
    /// Status code and client-facing message.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        let err = match self {
            ApiError::Body(rejection) => {
                return (StatusCode::BAD_REQUEST, rejection.body_text());
            }
            ApiError::Domain(err) => err,
        };

        match err {
            WellspringError::Validation { message } => (StatusCode::BAD_REQUEST, message.clone()),
            WellspringError::AlreadyExists { entity } => (
                StatusCode::BAD_REQUEST,
                format!("{} already exists with this email", capitalize(entity)),
            ),
            WellspringError::AuthenticationFailed { reason }
            | WellspringError::Unauthenticated { reason } => {
                (StatusCode::UNAUTHORIZED, reason.clone())
            }
            WellspringError::NotFound { entity, .. } => (
                StatusCode::NOT_FOUND,
                format!("{} not found", capitalize(entity)),
            ),
            WellspringError::Configuration(msg) => {
                tracing::error!(error = %msg, "Configuration error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.into())
            }
            WellspringError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.into())
            }
            WellspringError::Crypto(msg) | WellspringError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.into())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = self.status_and_message();

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

/// Result type alias using ApiError.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: WellspringError) -> (StatusCode, String) {
        ApiError::from(err).status_and_message()
    }

    #[test]
    fn test_client_errors() {
        assert_eq!(
            status_of(WellspringError::validation("Title is required")),
            (StatusCode::BAD_REQUEST, "Title is required".into())
        );
        assert_eq!(
            status_of(WellspringError::AlreadyExists {
                entity: "user".into()
            }),
            (
                StatusCode::BAD_REQUEST,
                "User already exists with this email".into()
            )
        );
        assert_eq!(
            status_of(WellspringError::not_found("session", "abc")),
            (StatusCode::NOT_FOUND, "Session not found".into())
        );
    }

    #[test]
    fn test_auth_errors_are_401() {
        let (status, message) = status_of(WellspringError::AuthenticationFailed {
            reason: "Invalid credentials".into(),
        });
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(message, "Invalid credentials");

        let (status, _) = status_of(WellspringError::unauthenticated("Invalid token"));
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_internal_details_are_hidden() {
        for err in [
            WellspringError::Database("connection reset by peer".into()),
            WellspringError::Configuration("JWT_SECRET missing".into()),
            WellspringError::Crypto("bad hash".into()),
        ] {
            let (status, message) = status_of(err);
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(message, INTERNAL_MESSAGE);
        }
    }

    #[test]
    fn test_not_found_hides_id() {
        let (_, message) = status_of(WellspringError::not_found("session", "secret-id"));
        assert!(!message.contains("secret-id"));
    }
}
