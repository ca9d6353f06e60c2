//! Cadence - Playback & Listening-Session Engine
//!
//! Owns "what is playing" for the Cadence player and reconciles real-time
//! playback with persisted listening statistics.
//!
//! This crate provides:
//! - Playback controller (play/pause/resume/stop/next/previous/seek)
//! - Loop modes (None, One, All) and shuffle with the active track pinned
//! - Listening-time accumulation with soft flushes
//! - Skip and play counting around track changes
//! - Natural-end handling driven by engine status updates
//! - Now-playing surface and "currently playing" indicator sync
//! - A command-queue session thread that serializes every operation
//!
//! # Architecture
//!
//! `cadence-playback` never decodes audio or talks to the network itself.
//! The audio engine, statistics gateway, track catalog and now-playing
//! collaborators are traits from `cadence-core`; platforms plug their own
//! implementations in.
//!
//! # Example: Driving the controller
//!
//! ```rust
//! use cadence_core::{
//!     AudioEngine, BackendTrackId, CurrentTrackIndicator, ListeningDelta, NowPlayingControls,
//!     NowPlayingMetadata, NowPlayingSurface, Result, SessionGateway, Track, TrackMetadata,
//! };
//! use cadence_playback::{Collaborators, PlaybackConfig, PlaybackController, PlaybackState};
//!
//! struct Silent;
//!
//! impl AudioEngine for Silent {
//!     fn replace(&mut self, _uri: &str) -> Result<()> { Ok(()) }
//!     fn play(&mut self) -> Result<()> { Ok(()) }
//!     fn pause(&mut self) -> Result<()> { Ok(()) }
//!     fn seek_to(&mut self, _seconds: f64) -> Result<()> { Ok(()) }
//!     fn set_loop(&mut self, _enabled: bool) -> Result<()> { Ok(()) }
//! }
//!
//! impl SessionGateway for Silent {
//!     fn upsert_listening(&self, _delta: &ListeningDelta) -> Result<()> { Ok(()) }
//! }
//!
//! impl NowPlayingSurface for Silent {
//!     fn activate(&mut self, _m: &NowPlayingMetadata, _c: &NowPlayingControls) -> Result<()> { Ok(()) }
//!     fn deactivate(&mut self) -> Result<()> { Ok(()) }
//! }
//!
//! impl CurrentTrackIndicator for Silent {
//!     fn set_current_track(&self, _id: Option<&BackendTrackId>) -> Result<()> { Ok(()) }
//! }
//!
//! let mut controller = PlaybackController::new(
//!     &PlaybackConfig::default(),
//!     Collaborators {
//!         engine: Box::new(Silent),
//!         gateway: Box::new(Silent),
//!         surface: Box::new(Silent),
//!         indicator: Box::new(Silent),
//!     },
//! );
//!
//! let track = Track::new("1", "file:///music/song.mp3", 180.0, TrackMetadata::new("Song", "Artist", "Album"));
//! controller.play(track, None).unwrap();
//! assert_eq!(controller.state(), PlaybackState::Playing);
//! ```

mod accumulator;
mod catalog;
mod config;
mod controller;
mod dispatcher;
mod error;
mod events;
mod gateway;
mod now_playing;
mod playlist;
mod session;
mod shuffle;
pub mod types;

// Public exports
pub use accumulator::{ListeningAccumulator, TickOutcome};
pub use catalog::CatalogAdapter;
pub use config::PlaybackConfig;
pub use controller::{Collaborators, PlaybackController};
pub use dispatcher::{EndAction, NaturalEndDispatcher};
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use gateway::StatsRecorder;
pub use now_playing::NowPlayingSync;
pub use playlist::Playlist;
pub use session::{CatalogSource, PlaybackSession, SessionCommand};
pub use shuffle::{shuffled_order, shuffled_order_with};
pub use types::{PlaybackSnapshot, PlaybackState};
