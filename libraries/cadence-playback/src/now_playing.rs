//! Now-playing projection
//!
//! Mirrors `(active track, is_playing)` onto the OS now-playing surface and
//! the backend "currently playing" indicator. The projection is memoized so
//! collaborators are only called when it actually changes. A backend id that
//! resolves after playback started only updates the indicator.

use cadence_core::{
    BackendTrackId, CurrentTrackIndicator, LocalTrackId, NowPlayingControls, NowPlayingMetadata,
    NowPlayingSurface, Track,
};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Projection {
    track_id: Option<LocalTrackId>,
    playing: bool,
    backend_id: Option<BackendTrackId>,
}

/// One-way sync of controller state to the now-playing collaborators
pub struct NowPlayingSync {
    surface: Box<dyn NowPlayingSurface>,
    indicator: Box<dyn CurrentTrackIndicator>,
    last: Projection,
}

impl NowPlayingSync {
    /// Create a sync that starts from "nothing playing"
    pub fn new(
        surface: Box<dyn NowPlayingSurface>,
        indicator: Box<dyn CurrentTrackIndicator>,
    ) -> Self {
        Self {
            surface,
            indicator,
            last: Projection::default(),
        }
    }

    /// Project the current state outward
    ///
    /// `backend_id` is the resolved id of `track`, used for the indicator
    /// while playing. Returns whether the collaborators were called.
    pub fn sync(
        &mut self,
        track: Option<&Track>,
        playing: bool,
        backend_id: Option<&BackendTrackId>,
    ) -> bool {
        let playing = track.is_some() && playing;
        let projection = Projection {
            track_id: track.map(|t| t.id.clone()),
            playing,
            backend_id: backend_id.filter(|_| playing).cloned(),
        };
        if projection == self.last {
            return false;
        }

        let same_surface =
            projection.track_id == self.last.track_id && projection.playing == self.last.playing;

        match track {
            Some(_) if same_surface => {
                debug!("Currently-playing indicator resolved");
                self.set_indicator(projection.backend_id.as_ref());
            }
            Some(track) if projection.playing => {
                debug!(track_id = %track.id, "Activating now-playing surface");
                let metadata = NowPlayingMetadata::from(track);
                if let Err(e) = self
                    .surface
                    .activate(&metadata, &NowPlayingControls::seekable())
                {
                    warn!(track_id = %track.id, error = %e, "Failed to activate now-playing surface");
                }
                self.set_indicator(projection.backend_id.as_ref());
            }
            _ => {
                debug!("Deactivating now-playing surface");
                if let Err(e) = self.surface.deactivate() {
                    warn!(error = %e, "Failed to deactivate now-playing surface");
                }
                self.set_indicator(None);
            }
        }

        self.last = projection;
        true
    }

    fn set_indicator(&self, track_id: Option<&BackendTrackId>) {
        if let Err(e) = self.indicator.set_current_track(track_id) {
            warn!(error = %e, "Failed to update currently-playing indicator");
        }
    }
}

impl std::fmt::Debug for NowPlayingSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NowPlayingSync")
            .field("last", &self.last)
            .finish_non_exhaustive()
    }
}
