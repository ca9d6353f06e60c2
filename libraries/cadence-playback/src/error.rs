//! Error types for playback management

use cadence_core::CadenceError;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Operation needs an active track but none is loaded
    #[error("No active track")]
    NoActiveTrack,

    /// Audio engine rejected a command
    #[error("Audio engine error: {0}")]
    Engine(#[source] CadenceError),

    /// Track catalog could not be fetched
    #[error("Track catalog error: {0}")]
    Catalog(#[source] CadenceError),

    /// Invalid seek position
    #[error("Invalid seek position: {0}")]
    InvalidSeekPosition(f64),

    /// Playback session thread is gone
    #[error("Playback session closed")]
    SessionClosed,

    /// Session thread could not be started
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for PlaybackError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
