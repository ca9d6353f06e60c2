//! Playback session thread
//!
//! Owns a [`PlaybackController`] on a dedicated thread and feeds it from a
//! single command queue, so user intents and engine status updates are
//! applied strictly one after another. Controller events come back on a
//! bounded event channel.

use crate::{
    config::PlaybackConfig,
    controller::PlaybackController,
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    types::PlaybackSnapshot,
};
use cadence_core::{CatalogEntry, EngineStatus, LoopMode, Track, TrackCatalog};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Catalog collaborator handed to the session for a refresh
pub struct CatalogSource(pub Box<dyn TrackCatalog>);

impl std::fmt::Debug for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CatalogSource")
    }
}

/// Commands sent to the session thread
#[derive(Debug)]
pub enum SessionCommand {
    /// Play a track, optionally replacing the playlist
    Play {
        /// Track to play
        track: Track,
        /// New primary playlist
        playlist: Option<Vec<Track>>,
    },

    /// Pause playback
    Pause,

    /// Resume the active track
    Resume,

    /// Stop playback
    Stop,

    /// Skip to next track (fallback used when the playlist is empty)
    Next(Vec<Track>),

    /// Go to previous track (fallback used when the playlist is empty)
    Previous(Vec<Track>),

    /// Seek to a percentage of a duration
    SeekPercent {
        /// Duration the percentage applies to
        duration_secs: f64,
        /// 0-100
        percent: f64,
    },

    /// Seek to an absolute position (in seconds)
    SeekTo(f64),

    /// Set loop mode
    SetLoopMode(LoopMode),

    /// Enable or disable shuffle
    SetShuffle(bool),

    /// Replace the primary playlist
    SetPlaylist(Vec<Track>),

    /// Install identifier mappings
    LoadCatalog(Vec<CatalogEntry>),

    /// Re-fetch identifier mappings from a catalog
    RefreshCatalog(CatalogSource),

    /// Status update from the audio engine
    EngineStatus(EngineStatus),

    /// Reply with a state snapshot
    Snapshot(Sender<PlaybackSnapshot>),

    /// Tear the session down (logout)
    Teardown,

    /// Tear down and stop the thread
    Shutdown,
}

/// Handle to a running playback session
///
/// Dropping the handle shuts the session down and joins its thread.
pub struct PlaybackSession {
    command_tx: Sender<SessionCommand>,
    event_rx: Receiver<PlaybackEvent>,
    handle: Option<JoinHandle<()>>,
}

impl PlaybackSession {
    /// Start the session thread
    ///
    /// # Errors
    /// Returns an error if the thread cannot be spawned
    pub fn spawn(controller: PlaybackController, config: &PlaybackConfig) -> Result<Self> {
        let (command_tx, command_rx) = bounded(config.command_queue_capacity);
        let (event_tx, event_rx) = bounded(config.event_queue_capacity);

        let handle = thread::Builder::new()
            .name("cadence-playback".to_string())
            .spawn(move || run_session(controller, &command_rx, &event_tx))?;

        Ok(Self {
            command_tx,
            event_rx,
            handle: Some(handle),
        })
    }

    /// Send command to session thread
    pub fn send_command(&self, command: SessionCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| PlaybackError::SessionClosed)
    }

    /// Play a track, optionally replacing the playlist
    pub fn play(&self, track: Track, playlist: Option<Vec<Track>>) -> Result<()> {
        self.send_command(SessionCommand::Play { track, playlist })
    }

    /// Pause playback
    pub fn pause(&self) -> Result<()> {
        self.send_command(SessionCommand::Pause)
    }

    /// Resume playback
    pub fn resume(&self) -> Result<()> {
        self.send_command(SessionCommand::Resume)
    }

    /// Stop playback
    pub fn stop(&self) -> Result<()> {
        self.send_command(SessionCommand::Stop)
    }

    /// Skip to next track
    pub fn next(&self) -> Result<()> {
        self.send_command(SessionCommand::Next(Vec::new()))
    }

    /// Go to previous track
    pub fn previous(&self) -> Result<()> {
        self.send_command(SessionCommand::Previous(Vec::new()))
    }

    /// Seek to `percent` of `duration_secs`
    pub fn seek_percent(&self, duration_secs: f64, percent: f64) -> Result<()> {
        self.send_command(SessionCommand::SeekPercent {
            duration_secs,
            percent,
        })
    }

    /// Set loop mode
    pub fn set_loop_mode(&self, mode: LoopMode) -> Result<()> {
        self.send_command(SessionCommand::SetLoopMode(mode))
    }

    /// Enable or disable shuffle
    pub fn set_shuffle(&self, enabled: bool) -> Result<()> {
        self.send_command(SessionCommand::SetShuffle(enabled))
    }

    /// Forward an engine status update
    pub fn report_status(&self, status: EngineStatus) -> Result<()> {
        self.send_command(SessionCommand::EngineStatus(status))
    }

    /// Tear the session down without stopping the thread
    pub fn teardown(&self) -> Result<()> {
        self.send_command(SessionCommand::Teardown)
    }

    /// Get a snapshot reflecting every command sent before this call
    pub fn snapshot(&self) -> Result<PlaybackSnapshot> {
        let (reply_tx, reply_rx) = bounded(1);
        self.send_command(SessionCommand::Snapshot(reply_tx))?;
        reply_rx.recv().map_err(|_| PlaybackError::SessionClosed)
    }

    /// Try to receive next event (non-blocking)
    pub fn try_recv_event(&self) -> Option<PlaybackEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Receive next event (blocking)
    pub fn recv_event(&self) -> Option<PlaybackEvent> {
        self.event_rx.recv().ok()
    }

    /// Receive next event, giving up after `timeout`
    pub fn recv_event_timeout(&self, timeout: Duration) -> Option<PlaybackEvent> {
        match self.event_rx.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Tear down, stop the thread and wait for it
    pub fn shutdown(mut self) {
        self.stop_thread();
    }

    fn stop_thread(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };

        // The thread may already be gone; joining is enough then
        let _ = self.command_tx.send(SessionCommand::Shutdown);
        if handle.join().is_err() {
            error!("Playback session thread panicked");
        }
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        self.stop_thread();
    }
}

fn run_session(
    mut controller: PlaybackController,
    command_rx: &Receiver<SessionCommand>,
    event_tx: &Sender<PlaybackEvent>,
) {
    info!("Playback session started");

    for command in command_rx {
        let shutdown = matches!(command, SessionCommand::Shutdown);

        if let Err(e) = apply(&mut controller, command) {
            warn!(error = %e, "Playback command failed");
            // Engine failures were already queued by the controller
            if !matches!(e, PlaybackError::Engine(_)) {
                controller_error(event_tx, &e);
            }
        }

        for event in controller.drain_events() {
            forward(event_tx, event);
        }

        if shutdown {
            break;
        }
    }

    info!("Playback session stopped");
}

fn apply(controller: &mut PlaybackController, command: SessionCommand) -> Result<()> {
    match command {
        SessionCommand::Play { track, playlist } => controller.play(track, playlist),
        SessionCommand::Pause => controller.pause(),
        SessionCommand::Resume => controller.resume(),
        SessionCommand::Stop => controller.stop(),
        SessionCommand::Next(fallback) => controller.next_from(&fallback),
        SessionCommand::Previous(fallback) => controller.previous_from(&fallback),
        SessionCommand::SeekPercent {
            duration_secs,
            percent,
        } => controller.seek_percent(duration_secs, percent),
        SessionCommand::SeekTo(position) => controller.seek_to(position),
        SessionCommand::SetLoopMode(mode) => controller.set_loop_mode(mode),
        SessionCommand::SetShuffle(enabled) => {
            controller.set_shuffle(enabled);
            Ok(())
        }
        SessionCommand::SetPlaylist(tracks) => {
            controller.set_playlist(tracks);
            Ok(())
        }
        SessionCommand::LoadCatalog(entries) => {
            controller.load_catalog(entries);
            Ok(())
        }
        SessionCommand::RefreshCatalog(CatalogSource(catalog)) => {
            controller.refresh_catalog(catalog.as_ref()).map(|_| ())
        }
        SessionCommand::EngineStatus(status) => controller.handle_status(status),
        SessionCommand::Snapshot(reply) => {
            // Requester may have given up
            let _ = reply.send(controller.snapshot());
            Ok(())
        }
        SessionCommand::Teardown | SessionCommand::Shutdown => {
            controller.teardown();
            Ok(())
        }
    }
}

fn controller_error(event_tx: &Sender<PlaybackEvent>, error: &PlaybackError) {
    forward(
        event_tx,
        PlaybackEvent::Error {
            message: error.to_string(),
        },
    );
}

fn forward(event_tx: &Sender<PlaybackEvent>, event: PlaybackEvent) {
    match event_tx.try_send(event) {
        Ok(()) | Err(TrySendError::Disconnected(_)) => {}
        Err(TrySendError::Full(event)) => {
            debug!(?event, "Event queue full, dropping event");
        }
    }
}
