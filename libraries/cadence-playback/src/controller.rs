//! Playback controller - core orchestration
//!
//! Owns "what is playing" and sequences every transition against the
//! listening ledger, the statistics gateway and the now-playing projection.
//!
//! Ordering on a track change is fixed:
//! 1. unflushed listening seconds of the outgoing track
//! 2. skip event for the outgoing track (user intent only)
//! 3. ledger reset, engine `replace` + `play`
//! 4. play event for the incoming track

use crate::{
    accumulator::{ListeningAccumulator, TickOutcome},
    catalog::CatalogAdapter,
    config::PlaybackConfig,
    dispatcher::{EndAction, NaturalEndDispatcher},
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    gateway::StatsRecorder,
    now_playing::NowPlayingSync,
    playlist::Playlist,
    types::{Direction, PlaybackSnapshot, PlaybackState, TransitionCause},
};
use cadence_core::{
    AudioEngine, BackendTrackId, CatalogEntry, CurrentTrackIndicator, EngineStatus,
    ListeningDelta, LoopMode, NowPlayingSurface, SessionGateway, Track, TrackCatalog,
};
use tracing::{debug, error, info, warn};

/// External collaborators owned by the controller
pub struct Collaborators {
    /// Decode/output pipeline
    pub engine: Box<dyn AudioEngine>,
    /// Listening statistics sink
    pub gateway: Box<dyn SessionGateway>,
    /// OS now-playing surface
    pub surface: Box<dyn NowPlayingSurface>,
    /// Backend "currently playing" indicator
    pub indicator: Box<dyn CurrentTrackIndicator>,
}

/// Playback controller
///
/// A plain state machine: every method runs to completion before the next
/// one starts. Use [`PlaybackSession`](crate::PlaybackSession) to drive it
/// from several threads.
pub struct PlaybackController {
    engine: Box<dyn AudioEngine>,
    stats: StatsRecorder,
    now_playing: NowPlayingSync,
    catalog: CatalogAdapter,
    ledger: ListeningAccumulator,
    dispatcher: NaturalEndDispatcher,
    playlist: Playlist,

    active_track: Option<Track>,
    is_playing: bool,
    is_loading: bool,
    position_secs: f64,
    loop_mode: LoopMode,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
    last_state: PlaybackState,
}

impl PlaybackController {
    /// Create a controller in the idle state
    pub fn new(config: &PlaybackConfig, collaborators: Collaborators) -> Self {
        let Collaborators {
            engine,
            gateway,
            surface,
            indicator,
        } = collaborators;

        let mut controller = Self {
            engine,
            stats: StatsRecorder::new(gateway),
            now_playing: NowPlayingSync::new(surface, indicator),
            catalog: CatalogAdapter::new(),
            ledger: ListeningAccumulator::new(
                config.flush_threshold_secs,
                config.max_tick_delta_secs,
            ),
            dispatcher: NaturalEndDispatcher::new(),
            playlist: Playlist::default(),
            active_track: None,
            is_playing: false,
            is_loading: false,
            position_secs: 0.0,
            loop_mode: config.loop_mode,
            pending_events: Vec::new(),
            last_state: PlaybackState::Stopped,
        };

        if config.shuffle {
            controller.playlist.shuffle(None);
        }
        if config.loop_mode == LoopMode::One {
            if let Err(e) = controller.engine.set_loop(true) {
                warn!(error = %e, "Failed to enable native track looping");
            }
        }

        controller
    }

    // ===== Playback Control =====

    /// Play `track`, optionally replacing the primary playlist first
    ///
    /// Switching away from a different active track records a skip for it.
    /// `is_loading` is released even when the engine fails; in that case the
    /// new track stays active but not playing.
    pub fn play(&mut self, track: Track, playlist: Option<Vec<Track>>) -> Result<()> {
        if let Some(tracks) = playlist {
            self.playlist.replace(tracks, Some(&track));
        }
        let result = self.transition(track, TransitionCause::UserIntent);
        self.sync_now_playing();
        result
    }

    /// Pause playback
    ///
    /// Sends a checkpoint carrying whatever the ledger holds. Pausing while
    /// idle does nothing.
    pub fn pause(&mut self) -> Result<()> {
        if self.active_track.is_none() {
            debug!("Pause ignored, no active track");
            return Ok(());
        }

        self.flush_ledger(true);
        self.engine_call("pause", |engine| engine.pause())?;
        self.is_playing = false;

        self.emit_state();
        self.sync_now_playing();
        Ok(())
    }

    /// Resume the active track
    pub fn resume(&mut self) -> Result<()> {
        if self.active_track.is_none() {
            return Err(PlaybackError::NoActiveTrack);
        }

        self.engine_call("play", |engine| engine.play())?;
        self.is_playing = true;

        self.emit_state();
        self.sync_now_playing();
        Ok(())
    }

    /// Stop playback
    ///
    /// Sends the same checkpoint as [`pause`](Self::pause), then clears the
    /// active track. The playlist is kept.
    pub fn stop(&mut self) -> Result<()> {
        if self.active_track.is_none() {
            return Ok(());
        }

        self.flush_ledger(true);
        self.engine_call("pause", |engine| engine.pause())?;

        self.active_track = None;
        self.is_playing = false;
        self.position_secs = 0.0;
        self.ledger.reset();

        self.emit_state();
        self.sync_now_playing();
        Ok(())
    }

    /// Skip to the next track in the authoritative order
    pub fn next(&mut self) -> Result<()> {
        self.next_from(&[])
    }

    /// Go back to the previous track in the authoritative order
    pub fn previous(&mut self) -> Result<()> {
        self.previous_from(&[])
    }

    /// Like [`next`](Self::next), using `fallback` when the playlist is empty
    pub fn next_from(&mut self, fallback: &[Track]) -> Result<()> {
        self.step(Direction::Forward, fallback)
    }

    /// Like [`previous`](Self::previous), using `fallback` when the playlist is empty
    pub fn previous_from(&mut self, fallback: &[Track]) -> Result<()> {
        self.step(Direction::Backward, fallback)
    }

    // ===== Seeking =====

    /// Seek to `percent` (0-100) of `duration_secs`
    pub fn seek_percent(&mut self, duration_secs: f64, percent: f64) -> Result<()> {
        if percent.is_nan() {
            return Err(PlaybackError::InvalidSeekPosition(percent));
        }
        let percent = percent.clamp(0.0, 100.0);
        self.seek_to(duration_secs * percent / 100.0)
    }

    /// Seek to an absolute position in seconds
    ///
    /// The position is updated optimistically and the ledger re-anchored so
    /// the jump never counts as listening.
    pub fn seek_to(&mut self, position_secs: f64) -> Result<()> {
        if !position_secs.is_finite() {
            return Err(PlaybackError::InvalidSeekPosition(position_secs));
        }
        if self.active_track.is_none() {
            return Err(PlaybackError::NoActiveTrack);
        }

        let position_secs = position_secs.max(0.0);
        self.engine_call("seek", |engine| engine.seek_to(position_secs))?;

        self.position_secs = position_secs;
        self.ledger.reanchor(position_secs);
        self.pending_events
            .push(PlaybackEvent::PositionUpdate { position_secs });
        Ok(())
    }

    // ===== Loop & Shuffle =====

    /// Set loop mode; `One` is delegated to the engine's native loop
    pub fn set_loop_mode(&mut self, mode: LoopMode) -> Result<()> {
        self.engine_call("set_loop", |engine| engine.set_loop(mode == LoopMode::One))?;
        if self.loop_mode != mode {
            self.loop_mode = mode;
            self.pending_events
                .push(PlaybackEvent::LoopModeChanged { mode });
        }
        Ok(())
    }

    /// Enable or disable shuffle
    ///
    /// Enabling always builds a fresh order with the active track first.
    pub fn set_shuffle(&mut self, enabled: bool) {
        let was_shuffled = self.playlist.is_shuffled();
        if enabled {
            self.playlist
                .shuffle(self.active_track.as_ref());
        } else {
            self.playlist.unshuffle();
        }

        if was_shuffled != enabled {
            self.pending_events
                .push(PlaybackEvent::ShuffleChanged { enabled });
        }
    }

    /// Replace the primary playlist without touching the active track
    pub fn set_playlist(&mut self, tracks: Vec<Track>) {
        self.playlist
            .replace(tracks, self.active_track.as_ref());
    }

    // ===== Engine Status =====

    /// Feed one status update from the audio engine
    ///
    /// Position ticks go to the ledger (soft flush) and the engine's playing
    /// flag is mirrored outside of transitions. A rising `did_just_finish`
    /// flushes the remaining ledger and applies the loop-mode policy.
    pub fn handle_status(&mut self, status: EngineStatus) -> Result<()> {
        let finished = self.dispatcher.observe(status.did_just_finish);
        if self.active_track.is_none() {
            return Ok(());
        }

        self.position_secs = status.current_time;
        if let TickOutcome::Flush(secs) = self.ledger.tick(status.current_time) {
            debug!(listening_secs = secs, "Soft flush");
            let backend = self.active_backend_id();
            self.record(backend, |id| ListeningDelta::listening(id, secs));
        }

        // End-of-track statuses describe the outgoing source
        if !status.did_just_finish && !self.is_loading && status.playing != self.is_playing {
            debug!(playing = status.playing, "Engine playing state changed");
            self.is_playing = status.playing;
            self.emit_state();
            self.sync_now_playing();
        }

        if !finished {
            return Ok(());
        }

        let result = self.handle_natural_end();
        self.sync_now_playing();
        result
    }

    // ===== Catalog =====

    /// Refresh the identifier cache from the track catalog
    ///
    /// On failure the previous cache is kept.
    pub fn refresh_catalog(&mut self, catalog: &dyn TrackCatalog) -> Result<usize> {
        let count = self.catalog.refresh(catalog).map_err(|e| {
            warn!(error = %e, "Failed to refresh track catalog");
            PlaybackError::Catalog(e)
        })?;
        self.sync_now_playing();
        Ok(count)
    }

    /// Install catalog entries directly
    pub fn load_catalog(&mut self, entries: Vec<CatalogEntry>) {
        self.catalog.load(entries);
        self.sync_now_playing();
    }

    /// Identifier cache
    pub fn catalog(&self) -> &CatalogAdapter {
        &self.catalog
    }

    // ===== Teardown =====

    /// Tear the session down (logout)
    ///
    /// Flushes pending listening, pauses the engine, clears the indicator and
    /// forgets the playlist and catalog. Collaborator failures are logged.
    pub fn teardown(&mut self) {
        info!("Tearing down playback session");

        self.flush_ledger(false);
        if self.active_track.is_some() {
            if let Err(e) = self.engine.pause() {
                warn!(error = %e, "Failed to pause engine during teardown");
            }
        }

        self.active_track = None;
        self.is_playing = false;
        self.is_loading = false;
        self.position_secs = 0.0;
        self.ledger.reset();
        self.dispatcher.reset();
        self.playlist.clear();

        self.emit_state();
        self.sync_now_playing();
        self.catalog.clear();
    }

    // ===== State Queries =====

    /// Derived playback state
    pub fn state(&self) -> PlaybackState {
        match (&self.active_track, self.is_loading, self.is_playing) {
            (_, true, _) => PlaybackState::Loading,
            (None, false, _) => PlaybackState::Stopped,
            (Some(_), false, true) => PlaybackState::Playing,
            (Some(_), false, false) => PlaybackState::Paused,
        }
    }

    /// Point-in-time copy of the session state
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            state: self.state(),
            active_track: self.active_track.clone(),
            is_playing: self.is_playing,
            is_loading: self.is_loading,
            position_secs: self.position_secs,
            loop_mode: self.loop_mode,
            is_shuffled: self.playlist.is_shuffled(),
            pending_listening_secs: self.ledger.accumulated_secs(),
        }
    }

    /// Track that currently owns the transport
    pub fn active_track(&self) -> Option<&Track> {
        self.active_track.as_ref()
    }

    /// Whether the engine is playing
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Whether a transition is in flight
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Transport position in seconds
    pub fn position_secs(&self) -> f64 {
        self.position_secs
    }

    /// Current loop mode
    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    /// Whether shuffle is enabled
    pub fn is_shuffled(&self) -> bool {
        self.playlist.is_shuffled()
    }

    /// Listening seconds not yet flushed
    pub fn pending_listening_secs(&self) -> f64 {
        self.ledger.accumulated_secs()
    }

    /// Primary playlist with its shuffled view
    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Tracks in the order next/previous walk through
    pub fn authoritative_order(&self) -> Vec<&Track> {
        self.playlist.ordered()
    }

    /// Drain all pending events
    ///
    /// Returns every event queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== Internal =====

    fn step(&mut self, direction: Direction, fallback: &[Track]) -> Result<()> {
        let Some(target) = self.adjacent_track(direction, fallback) else {
            debug!(?direction, "No adjacent track, ignoring");
            return Ok(());
        };

        let result = self.transition(target, TransitionCause::UserIntent);
        self.sync_now_playing();
        result
    }

    /// Neighbour of the active track, wrapping when shuffled or looping all
    fn adjacent_track(&self, direction: Direction, fallback: &[Track]) -> Option<Track> {
        let active = self.active_track.as_ref()?;

        let ordered = self.playlist.ordered();
        let order: Vec<&Track> = if ordered.is_empty() {
            fallback.iter().collect()
        } else {
            ordered
        };

        let index = order.iter().position(|t| t.is_same(active))?;
        let wrap = self.playlist.is_shuffled() || self.loop_mode == LoopMode::All;

        let target = match direction {
            Direction::Forward if index + 1 < order.len() => index + 1,
            Direction::Forward if wrap => 0,
            Direction::Backward if index > 0 => index - 1,
            Direction::Backward if wrap => order.len() - 1,
            _ => return None,
        };

        Some(order[target].clone())
    }

    fn transition(&mut self, track: Track, cause: TransitionCause) -> Result<()> {
        self.is_loading = true;
        self.emit_state();

        let result = self.load_and_play(track, cause);

        self.is_loading = false;
        self.emit_state();
        result
    }

    fn load_and_play(&mut self, track: Track, cause: TransitionCause) -> Result<()> {
        self.flush_ledger(false);

        let previous_track_id = self.active_track.as_ref().map(|t| t.id.clone());
        if cause == TransitionCause::UserIntent {
            if let Some(outgoing) = self.active_track.as_ref().filter(|t| !t.is_same(&track)) {
                let backend = self.catalog.resolve_backend_id(&outgoing.id);
                self.record(backend, ListeningDelta::skip);
            }
        }

        debug!(track_id = %track.id, ?cause, "Loading track");
        self.ledger.reset();
        self.position_secs = 0.0;
        self.is_playing = false;
        self.pending_events.push(PlaybackEvent::TrackChanged {
            track_id: track.id.clone(),
            previous_track_id,
        });
        let uri = track.uri.clone();
        let track_id = track.id.clone();
        self.active_track = Some(track);

        self.engine_call("replace", |engine| {
            engine.replace(&uri)?;
            engine.play()
        })?;
        self.is_playing = true;

        let backend = self.catalog.resolve_backend_id(&track_id);
        self.record(backend, ListeningDelta::play);
        Ok(())
    }

    fn handle_natural_end(&mut self) -> Result<()> {
        let Some(finished) = self.active_track.clone() else {
            return Ok(());
        };

        debug!(track_id = %finished.id, "Track finished");
        self.pending_events.push(PlaybackEvent::TrackFinished {
            track_id: finished.id.clone(),
        });
        self.flush_ledger(true);
        self.ledger.reset();

        let (position, len) = {
            let order = self.playlist.ordered();
            (order.iter().position(|t| t.is_same(&finished)), order.len())
        };

        match NaturalEndDispatcher::decide(
            self.loop_mode,
            self.playlist.is_shuffled(),
            position,
            len,
        ) {
            EndAction::Ignore => Ok(()),
            EndAction::Restart => {
                let first = self.playlist.ordered().first().map(|t| (*t).clone());
                match first {
                    Some(first) => self.transition(first, TransitionCause::NaturalEnd),
                    None => {
                        self.halt();
                        Ok(())
                    }
                }
            }
            EndAction::Advance => match self.adjacent_track(Direction::Forward, &[]) {
                Some(next) => self.transition(next, TransitionCause::NaturalEnd),
                None => {
                    self.halt();
                    Ok(())
                }
            },
            EndAction::Halt => {
                self.halt();
                Ok(())
            }
        }
    }

    /// End of playback: the track stays active, nothing plays
    fn halt(&mut self) {
        debug!("End of playlist reached");
        self.is_playing = false;
        self.emit_state();
    }

    /// Flush the ledger of the active track
    ///
    /// With `checkpoint` set the delta is sent even when nothing accumulated.
    fn flush_ledger(&mut self, checkpoint: bool) {
        if self.active_track.is_none() {
            return;
        }

        let secs = self.ledger.take();
        if secs > 0.0 || checkpoint {
            let backend = self.active_backend_id();
            self.record(backend, |id| ListeningDelta::listening(id, secs));
        }
    }

    fn active_backend_id(&self) -> Option<BackendTrackId> {
        self.active_track
            .as_ref()
            .and_then(|t| self.catalog.resolve_backend_id(&t.id))
    }

    fn record(
        &mut self,
        track_id: Option<BackendTrackId>,
        build: impl FnOnce(BackendTrackId) -> ListeningDelta,
    ) {
        if let Some(delta) = self.stats.record(track_id, build) {
            self.pending_events
                .push(PlaybackEvent::StatisticsRecorded { delta });
        }
    }

    fn engine_call(
        &mut self,
        operation: &str,
        call: impl FnOnce(&mut dyn AudioEngine) -> cadence_core::Result<()>,
    ) -> Result<()> {
        call(self.engine.as_mut()).map_err(|e| {
            error!(operation, error = %e, "Audio engine call failed");
            self.pending_events.push(PlaybackEvent::Error {
                message: e.to_string(),
            });
            PlaybackError::Engine(e)
        })
    }

    fn sync_now_playing(&mut self) {
        let backend = if self.is_playing {
            self.active_backend_id()
        } else {
            None
        };
        self.now_playing
            .sync(self.active_track.as_ref(), self.is_playing, backend.as_ref());
    }

    /// Emit a state changed event if the derived state moved
    fn emit_state(&mut self) {
        let state = self.state();
        if state != self.last_state {
            self.last_state = state;
            self.pending_events.push(PlaybackEvent::StateChanged { state });
        }
    }
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("active_track", &self.active_track)
            .field("is_playing", &self.is_playing)
            .field("is_loading", &self.is_loading)
            .field("position_secs", &self.position_secs)
            .field("loop_mode", &self.loop_mode)
            .field("playlist", &self.playlist)
            .finish_non_exhaustive()
    }
}
