//! Core types for playback management

use cadence_core::{LoopMode, Track};
use serde::{Deserialize, Serialize};

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No track active (nothing played yet, or stopped)
    Stopped,

    /// Transitioning to a new track
    Loading,

    /// Currently playing
    Playing,

    /// Track active but not playing
    Paused,
}

/// Point-in-time copy of the playback session state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    /// Derived state
    pub state: PlaybackState,

    /// Track that owns the transport
    pub active_track: Option<Track>,

    /// Engine is producing output
    pub is_playing: bool,

    /// A track transition is in flight
    pub is_loading: bool,

    /// Transport position in seconds
    pub position_secs: f64,

    /// Loop mode
    pub loop_mode: LoopMode,

    /// Shuffle flag
    pub is_shuffled: bool,

    /// Listening seconds not yet flushed for the active track
    pub pending_listening_secs: f64,
}

/// Why the active track is being replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TransitionCause {
    /// User intent (play, next, previous): the outgoing track counts as skipped
    UserIntent,

    /// Engine reported natural completion: no skip is recorded
    NaturalEnd,
}

/// Direction through the authoritative playlist order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Forward,
    Backward,
}
