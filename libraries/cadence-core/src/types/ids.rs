/// ID types for Cadence entities
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Device-local track identifier
///
/// Attached to tracks by the device media library. It is NOT guaranteed to be
/// the identifier the backend records statistics under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalTrackId(String);

impl LocalTrackId {
    /// Create a new local track ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocalTrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LocalTrackId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Backend track identifier
///
/// The durable identifier listening records are keyed by. Always has the
/// canonical UUID shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BackendTrackId(String);

impl BackendTrackId {
    /// Parse a string that already has the canonical backend shape
    ///
    /// Returns `None` for anything that is not a UUID.
    pub fn parse_canonical(id: &str) -> Option<Self> {
        Uuid::parse_str(id).ok().map(|_| Self(id.to_string()))
    }

    /// Generate a new random backend ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BackendTrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
