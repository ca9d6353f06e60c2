//! Best-effort statistics recording
//!
//! Wraps the persistence gateway so that the controller never sees a failed
//! upsert. Statistics may end up slightly wrong; playback never breaks.

use cadence_core::{BackendTrackId, ListeningDelta, SessionGateway};
use tracing::{debug, warn};

/// Fire-and-forget front for a [`SessionGateway`]
pub struct StatsRecorder {
    gateway: Box<dyn SessionGateway>,
}

impl StatsRecorder {
    /// Wrap a gateway
    pub fn new(gateway: Box<dyn SessionGateway>) -> Self {
        Self { gateway }
    }

    /// Send a delta if the track resolved to a backend id
    ///
    /// Returns the delta that was handed to the gateway, whether or not the
    /// gateway accepted it. Unresolved tracks are dropped.
    pub fn record(
        &self,
        track_id: Option<BackendTrackId>,
        build: impl FnOnce(BackendTrackId) -> ListeningDelta,
    ) -> Option<ListeningDelta> {
        let Some(track_id) = track_id else {
            debug!("Dropping statistics event for unresolved track");
            return None;
        };

        let delta = build(track_id);
        debug!(
            track_id = %delta.track_id,
            listening_secs = delta.listening_secs,
            skip_count = delta.skip_count,
            play_count = delta.play_count,
            "Recording listening delta"
        );

        if let Err(e) = self.gateway.upsert_listening(&delta) {
            warn!(track_id = %delta.track_id, error = %e, "Failed to record listening delta");
        }

        Some(delta)
    }
}

impl std::fmt::Debug for StatsRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatsRecorder").finish_non_exhaustive()
    }
}
