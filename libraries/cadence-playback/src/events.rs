//! Playback Events
//!
//! Event-based communication for UI synchronization. The controller queues
//! events as it mutates state; the session forwards them after every command.

use crate::types::PlaybackState;
use cadence_core::{ListeningDelta, LocalTrackId, LoopMode};
use serde::{Deserialize, Serialize};

/// Events emitted by the playback system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Playback state changed (loading, playing, paused, stopped)
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// Active track changed
    TrackChanged {
        /// ID of the new active track
        track_id: LocalTrackId,
        /// ID of the previous active track (if any)
        previous_track_id: Option<LocalTrackId>,
    },

    /// Engine reported natural completion of a track
    TrackFinished {
        /// ID of the finished track
        track_id: LocalTrackId,
    },

    /// Transport position changed by a seek
    PositionUpdate {
        /// New position in seconds
        position_secs: f64,
    },

    /// Loop mode changed
    LoopModeChanged {
        /// New loop mode
        mode: LoopMode,
    },

    /// Shuffle flag changed
    ShuffleChanged {
        /// Whether shuffle is now enabled
        enabled: bool,
    },

    /// A statistics delta was handed to the gateway
    StatisticsRecorded {
        /// The delta as sent
        delta: ListeningDelta,
    },

    /// Error occurred during playback
    Error {
        /// Error message
        message: String,
    },
}
