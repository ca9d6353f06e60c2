/// Track domain type
use crate::types::LocalTrackId;
use serde::{Deserialize, Serialize};

/// One playable audio item
///
/// Owned by the catalog and immutable once loaded into a playlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Device-local identifier
    pub id: LocalTrackId,

    /// Playable location handed to the audio engine
    pub uri: String,

    /// Track duration in seconds
    pub duration_secs: f64,

    /// Display metadata
    pub metadata: TrackMetadata,
}

impl Track {
    /// Create a new track
    pub fn new(
        id: impl Into<String>,
        uri: impl Into<String>,
        duration_secs: f64,
        metadata: TrackMetadata,
    ) -> Self {
        Self {
            id: LocalTrackId::new(id),
            uri: uri.into(),
            duration_secs,
            metadata,
        }
    }

    /// Whether `other` is the same catalog item
    ///
    /// Identity is the local id, not structural equality.
    pub fn is_same(&self, other: &Track) -> bool {
        self.id == other.id
    }
}

/// Display metadata for a track
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrackMetadata {
    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    pub album: String,

    /// Cover art reference (URI or asset key)
    pub artwork: Option<String>,
}

impl TrackMetadata {
    /// Create metadata without artwork
    pub fn new(title: impl Into<String>, artist: impl Into<String>, album: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            album: album.into(),
            artwork: None,
        }
    }

    /// Attach a cover art reference
    #[must_use]
    pub fn with_artwork(mut self, artwork: impl Into<String>) -> Self {
        self.artwork = Some(artwork.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_ignores_metadata() {
        let a = Track::new("1", "file:///a.mp3", 120.0, TrackMetadata::new("A", "X", "Y"));
        let mut b = a.clone();
        b.metadata.title = "Renamed".to_string();

        assert!(a.is_same(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn metadata_builder() {
        let meta = TrackMetadata::new("Song", "Artist", "Album").with_artwork("cover://1");
        assert_eq!(meta.artwork.as_deref(), Some("cover://1"));
    }
}
