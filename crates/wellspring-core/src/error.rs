//! Error types for the Wellspring system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WellspringError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Entity already exists: {entity}")]
    AlreadyExists { entity: String },

    /// Bad credentials presented to login.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    /// Missing, malformed or expired identity token.
    #[error("Unauthenticated: {reason}")]
    Unauthenticated { reason: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cryptography error: {0}")]
    Crypto(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl WellspringError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub fn unauthenticated(reason: impl Into<String>) -> Self {
        Self::Unauthenticated {
            reason: reason.into(),
        }
    }
}

pub type WellspringResult<T> = Result<T, WellspringError>;
