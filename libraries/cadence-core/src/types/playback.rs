/// Playback-session value types
use crate::types::{BackendTrackId, LocalTrackId, Track};
use serde::{Deserialize, Serialize};

/// Loop mode for playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopMode {
    /// Stop when the playlist ends
    #[default]
    None,
    /// Loop the current track (handled natively by the engine)
    One,
    /// Loop the whole playlist
    All,
}

impl LoopMode {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::One => "one",
            Self::All => "all",
        }
    }

    /// Parse from string
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Self::None),
            "one" => Some(Self::One),
            "all" => Some(Self::All),
            _ => None,
        }
    }
}

impl std::fmt::Display for LoopMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One status update from the audio engine
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineStatus {
    /// Transport position in seconds
    pub current_time: f64,

    /// Whether the engine is producing output
    pub playing: bool,

    /// Set while the engine reports the loaded track has ended
    pub did_just_finish: bool,
}

impl EngineStatus {
    /// A "playing at `seconds`" tick
    pub fn playing_at(seconds: f64) -> Self {
        Self {
            current_time: seconds,
            playing: true,
            did_just_finish: false,
        }
    }

    /// The "track finished" signal at `seconds`
    pub fn finished_at(seconds: f64) -> Self {
        Self {
            current_time: seconds,
            playing: false,
            did_just_finish: true,
        }
    }
}

/// Statistics delta for one (listener, track) record
///
/// The backend adds these to its stored totals; the engine never sends
/// absolute values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListeningDelta {
    /// Backend track the delta applies to
    pub track_id: BackendTrackId,

    /// Listening time to add, in seconds
    pub listening_secs: f64,

    /// Skips to add
    pub skip_count: u32,

    /// Plays to add
    pub play_count: u32,
}

impl ListeningDelta {
    /// Listening-time-only delta (soft flush, checkpoint, natural completion)
    pub fn listening(track_id: BackendTrackId, listening_secs: f64) -> Self {
        Self {
            track_id,
            listening_secs,
            skip_count: 0,
            play_count: 0,
        }
    }

    /// One skip of the track
    pub fn skip(track_id: BackendTrackId) -> Self {
        Self {
            track_id,
            listening_secs: 0.0,
            skip_count: 1,
            play_count: 0,
        }
    }

    /// One play of the track
    pub fn play(track_id: BackendTrackId) -> Self {
        Self {
            track_id,
            listening_secs: 0.0,
            skip_count: 0,
            play_count: 1,
        }
    }

    /// True when the delta changes no skip or play counters
    pub fn is_checkpoint(&self) -> bool {
        self.skip_count == 0 && self.play_count == 0
    }
}

/// One `local id -> backend id` pair from the track catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Device-local identifier
    pub local_id: LocalTrackId,

    /// Backend identifier
    pub backend_id: BackendTrackId,
}

/// Metadata shown on the OS now-playing surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NowPlayingMetadata {
    /// Track title
    pub title: String,
    /// Artist name
    pub artist: String,
    /// Album name
    pub album: String,
    /// Cover art reference
    pub artwork: Option<String>,
    /// Track duration in seconds
    pub duration_secs: f64,
}

impl From<&Track> for NowPlayingMetadata {
    fn from(track: &Track) -> Self {
        Self {
            title: track.metadata.title.clone(),
            artist: track.metadata.artist.clone(),
            album: track.metadata.album.clone(),
            artwork: track.metadata.artwork.clone(),
            duration_secs: track.duration_secs,
        }
    }
}

/// Controls offered on the OS now-playing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NowPlayingControls {
    /// Play/pause toggle
    pub play_pause: bool,
    /// Next track
    pub next: bool,
    /// Previous track
    pub previous: bool,
    /// Scrubbing
    pub seek: bool,
}

impl NowPlayingControls {
    /// Full transport with scrubbing
    pub fn seekable() -> Self {
        Self {
            play_pause: true,
            next: true,
            previous: true,
            seek: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TrackMetadata;

    #[test]
    fn loop_mode_round_trips_through_str() {
        for mode in [LoopMode::None, LoopMode::One, LoopMode::All] {
            assert_eq!(LoopMode::from_str(mode.as_str()), Some(mode));
        }
        assert_eq!(LoopMode::from_str("shuffle"), None);
        assert_eq!(LoopMode::default(), LoopMode::None);
    }

    #[test]
    fn loop_mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&LoopMode::All).unwrap(), "\"all\"");
    }

    #[test]
    fn delta_constructors() {
        let id = BackendTrackId::generate();

        let skip = ListeningDelta::skip(id.clone());
        assert_eq!((skip.skip_count, skip.play_count), (1, 0));
        assert_eq!(skip.listening_secs, 0.0);
        assert!(!skip.is_checkpoint());

        let play = ListeningDelta::play(id.clone());
        assert_eq!((play.skip_count, play.play_count), (0, 1));

        let listen = ListeningDelta::listening(id, 31.0);
        assert!(listen.is_checkpoint());
        assert_eq!(listen.listening_secs, 31.0);
    }

    #[test]
    fn now_playing_metadata_from_track() {
        let track = Track::new(
            "1",
            "file:///a.mp3",
            200.0,
            TrackMetadata::new("Title", "Artist", "Album").with_artwork("art"),
        );
        let meta = NowPlayingMetadata::from(&track);
        assert_eq!(meta.title, "Title");
        assert_eq!(meta.artwork.as_deref(), Some("art"));
        assert_eq!(meta.duration_secs, 200.0);
    }
}
