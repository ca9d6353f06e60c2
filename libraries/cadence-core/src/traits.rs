/// Collaborator traits for the Cadence playback engine
///
/// The engine never decodes audio, talks to the network, or draws UI itself.
/// Each of those concerns is reached through one of these traits, and every
/// trait is `Send` so a playback session thread can own its collaborators.
use crate::error::Result;
use crate::types::{
    BackendTrackId, CatalogEntry, ListeningDelta, NowPlayingControls, NowPlayingMetadata,
};

/// Audio engine trait
///
/// Implementers own the actual decode/output pipeline. From the controller's
/// point of view every call is synchronous-or-failing. Progress is reported
/// back separately as `EngineStatus` updates.
pub trait AudioEngine: Send {
    /// Replace the loaded source with the audio at `uri`
    ///
    /// # Errors
    /// Returns an error if the source cannot be opened
    fn replace(&mut self, uri: &str) -> Result<()>;

    /// Start or resume output of the loaded source
    fn play(&mut self) -> Result<()>;

    /// Pause output
    fn pause(&mut self) -> Result<()>;

    /// Seek to an absolute position in seconds
    fn seek_to(&mut self, seconds: f64) -> Result<()>;

    /// Enable or disable native single-track looping
    fn set_loop(&mut self, enabled: bool) -> Result<()>;
}

/// Session persistence gateway trait
///
/// Records listening statistics. The backend adds the deltas to its stored
/// totals, so repeated or late calls are safe.
pub trait SessionGateway: Send {
    /// Add a delta to the listening record of `delta.track_id`
    ///
    /// # Errors
    /// Returns an error if the delta could not be recorded. Callers treat this
    /// as non-fatal.
    fn upsert_listening(&self, delta: &ListeningDelta) -> Result<()>;
}

/// Track catalog trait
///
/// Provides the listener's full `local id -> backend id` mapping.
pub trait TrackCatalog: Send {
    /// Fetch every catalog entry for the listener's library
    fn catalog_entries(&self) -> Result<Vec<CatalogEntry>>;
}

/// OS now-playing / lock-screen surface
pub trait NowPlayingSurface: Send {
    /// Show the surface with the given metadata and controls
    fn activate(
        &mut self,
        metadata: &NowPlayingMetadata,
        controls: &NowPlayingControls,
    ) -> Result<()>;

    /// Hide the surface
    fn deactivate(&mut self) -> Result<()>;
}

/// Backend "currently playing" indicator on the listener profile
pub trait CurrentTrackIndicator: Send {
    /// Set the indicator to a backend track, or clear it with `None`
    fn set_current_track(&self, track_id: Option<&BackendTrackId>) -> Result<()>;
}
