//! Client error type.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure: connection refused, timeout, TLS.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error body.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status of an API error, if the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
