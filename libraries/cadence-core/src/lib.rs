//! Cadence Core
//!
//! Platform-agnostic types, collaborator traits, and error handling for the
//! Cadence playback engine.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `LocalTrackId`, `BackendTrackId`, `LoopMode`,
//!   `ListeningDelta`, `EngineStatus`
//! - **Collaborator Traits**: `AudioEngine`, `SessionGateway`, `TrackCatalog`,
//!   `NowPlayingSurface`, `CurrentTrackIndicator`
//! - **Error Handling**: Unified `CadenceError` and `Result` types
//!
//! The playback engine itself lives in `cadence-playback`; everything in this
//! crate is what the engine and its collaborators share.
//!
//! # Example
//!
//! ```rust
//! use cadence_core::{BackendTrackId, LocalTrackId, Track, TrackMetadata};
//!
//! let track = Track::new(
//!     "device-42",
//!     "file:///music/song.mp3",
//!     215.0,
//!     TrackMetadata::new("Song", "Artist", "Album"),
//! );
//!
//! assert_eq!(track.id, LocalTrackId::new("device-42"));
//! // Device identifiers are not backend identifiers
//! assert!(BackendTrackId::parse_canonical(track.id.as_str()).is_none());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{CadenceError, Result};
pub use traits::{AudioEngine, CurrentTrackIndicator, NowPlayingSurface, SessionGateway, TrackCatalog};
pub use types::{
    BackendTrackId, CatalogEntry, EngineStatus, ListeningDelta, LocalTrackId, LoopMode,
    NowPlayingControls, NowPlayingMetadata, Track, TrackMetadata,
};
