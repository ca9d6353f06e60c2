//! Error types for the Cadence server client.

use cadence_core::CadenceError;
use thiserror::Error;

/// Errors that can occur when talking to the Cadence backend.
#[derive(Error, Debug)]
pub enum ServerClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Authentication required but no token available, or token rejected
    #[error("Authentication required")]
    AuthRequired,

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Background worker is gone or its queue is full
    #[error("Request queue unavailable: {0}")]
    QueueUnavailable(String),
}

impl ServerClientError {
    /// Map into the core error as a gateway failure
    pub fn into_gateway(self) -> CadenceError {
        CadenceError::gateway(self.to_string())
    }

    /// Map into the core error as a catalog failure
    pub fn into_catalog(self) -> CadenceError {
        CadenceError::catalog(self.to_string())
    }
}

/// Result type for server client operations.
pub type Result<T> = std::result::Result<T, ServerClientError>;
