//! Domain types shared by the engine and its collaborators

mod ids;
mod playback;
mod track;

pub use ids::{BackendTrackId, LocalTrackId};
pub use playback::{
    CatalogEntry, EngineStatus, ListeningDelta, LoopMode, NowPlayingControls, NowPlayingMetadata,
};
pub use track::{Track, TrackMetadata};
