//! Types for Cadence backend requests and responses.

use cadence_core::BackendTrackId;
use serde::{Deserialize, Serialize};

/// Configuration for connecting to the Cadence backend.
#[derive(Debug, Clone)]
pub struct ServerClientConfig {
    /// Base URL of the server (e.g., "https://api.cadence.example")
    pub url: String,
    /// Current access token (if authenticated)
    pub access_token: Option<String>,
    /// Listener whose statistics and profile are updated
    pub listener_id: String,
}

impl ServerClientConfig {
    /// Create a config without a token.
    pub fn new(url: impl Into<String>, listener_id: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            access_token: None,
            listener_id: listener_id.into(),
        }
    }

    /// Create a config with an access token.
    pub fn with_token(
        url: impl Into<String>,
        listener_id: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            access_token: Some(access_token.into()),
            listener_id: listener_id.into(),
        }
    }
}

/// Request body for the currently-playing indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentTrackRequest {
    /// Backend track, or `null` to clear
    pub track_id: Option<BackendTrackId>,
}
