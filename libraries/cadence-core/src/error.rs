/// Core error types for Cadence
use thiserror::Error;

/// Result type alias using `CadenceError`
pub type Result<T> = std::result::Result<T, CadenceError>;

/// Core error type shared by the engine and its collaborators
#[derive(Error, Debug)]
pub enum CadenceError {
    /// Audio engine rejected a command (replace/play/pause/seek)
    #[error("Audio engine error: {0}")]
    Engine(String),

    /// Session persistence gateway failed to record a delta
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// Track catalog could not be fetched
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// OS now-playing surface or currently-playing indicator failed
    #[error("Now-playing surface error: {0}")]
    Surface(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl CadenceError {
    /// Create an audio engine error
    pub fn engine(msg: impl Into<String>) -> Self {
        Self::Engine(msg.into())
    }

    /// Create a gateway error
    pub fn gateway(msg: impl Into<String>) -> Self {
        Self::Gateway(msg.into())
    }

    /// Create a catalog error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Create a now-playing surface error
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
