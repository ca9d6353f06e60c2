//! Shared recording collaborators for playback tests

#![allow(dead_code)]

use cadence_core::{
    AudioEngine, BackendTrackId, CadenceError, CatalogEntry, CurrentTrackIndicator,
    ListeningDelta, LocalTrackId, NowPlayingControls, NowPlayingMetadata, NowPlayingSurface,
    SessionGateway, Track, TrackMetadata,
};
use cadence_playback::{Collaborators, PlaybackConfig, PlaybackController};
use std::sync::{Arc, Mutex};

/// One call into a collaborator, in the order it happened
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Replace(String),
    Play,
    Pause,
    SeekTo(f64),
    SetLoop(bool),
    Upsert(ListeningDelta),
    Activate(String),
    Deactivate,
    Indicator(Option<BackendTrackId>),
}

/// Shared, ordered log of every collaborator call
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    pub fn push(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    pub fn all(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }

    pub fn upserts(&self) -> Vec<ListeningDelta> {
        self.all()
            .into_iter()
            .filter_map(|call| match call {
                Call::Upsert(delta) => Some(delta),
                _ => None,
            })
            .collect()
    }

    pub fn engine_calls(&self) -> Vec<Call> {
        self.all()
            .into_iter()
            .filter(|call| {
                matches!(
                    call,
                    Call::Replace(_) | Call::Play | Call::Pause | Call::SeekTo(_) | Call::SetLoop(_)
                )
            })
            .collect()
    }

    pub fn indicator_calls(&self) -> Vec<Option<BackendTrackId>> {
        self.all()
            .into_iter()
            .filter_map(|call| match call {
                Call::Indicator(id) => Some(id),
                _ => None,
            })
            .collect()
    }
}

/// Audio engine that records calls and can be told to fail
#[derive(Clone, Default)]
pub struct RecordingEngine {
    pub log: CallLog,
    pub fail_replace: Arc<Mutex<bool>>,
}

impl AudioEngine for RecordingEngine {
    fn replace(&mut self, uri: &str) -> cadence_core::Result<()> {
        self.log.push(Call::Replace(uri.to_string()));
        if *self.fail_replace.lock().unwrap() {
            return Err(CadenceError::engine("cannot open source"));
        }
        Ok(())
    }

    fn play(&mut self) -> cadence_core::Result<()> {
        self.log.push(Call::Play);
        Ok(())
    }

    fn pause(&mut self) -> cadence_core::Result<()> {
        self.log.push(Call::Pause);
        Ok(())
    }

    fn seek_to(&mut self, seconds: f64) -> cadence_core::Result<()> {
        self.log.push(Call::SeekTo(seconds));
        Ok(())
    }

    fn set_loop(&mut self, enabled: bool) -> cadence_core::Result<()> {
        self.log.push(Call::SetLoop(enabled));
        Ok(())
    }
}

/// Gateway, surface and indicator writing to the same log
#[derive(Clone, Default)]
pub struct RecordingBackend {
    pub log: CallLog,
    pub fail_upserts: bool,
}

impl SessionGateway for RecordingBackend {
    fn upsert_listening(&self, delta: &ListeningDelta) -> cadence_core::Result<()> {
        self.log.push(Call::Upsert(delta.clone()));
        if self.fail_upserts {
            return Err(CadenceError::gateway("connection reset"));
        }
        Ok(())
    }
}

impl NowPlayingSurface for RecordingBackend {
    fn activate(
        &mut self,
        metadata: &NowPlayingMetadata,
        _controls: &NowPlayingControls,
    ) -> cadence_core::Result<()> {
        self.log.push(Call::Activate(metadata.title.clone()));
        Ok(())
    }

    fn deactivate(&mut self) -> cadence_core::Result<()> {
        self.log.push(Call::Deactivate);
        Ok(())
    }
}

impl CurrentTrackIndicator for RecordingBackend {
    fn set_current_track(&self, track_id: Option<&BackendTrackId>) -> cadence_core::Result<()> {
        self.log.push(Call::Indicator(track_id.cloned()));
        Ok(())
    }
}

/// Controller wired to recording collaborators
pub struct Harness {
    pub controller: PlaybackController,
    pub log: CallLog,
    pub engine: RecordingEngine,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(&PlaybackConfig::default())
    }

    pub fn with_config(config: &PlaybackConfig) -> Self {
        let log = CallLog::default();
        let engine = RecordingEngine {
            log: log.clone(),
            ..Default::default()
        };
        let backend = RecordingBackend {
            log: log.clone(),
            ..Default::default()
        };

        let controller = PlaybackController::new(config, collaborators(&engine, &backend));

        Self {
            controller,
            log,
            engine,
        }
    }
}

pub fn collaborators(engine: &RecordingEngine, backend: &RecordingBackend) -> Collaborators {
    Collaborators {
        engine: Box::new(engine.clone()),
        gateway: Box::new(backend.clone()),
        surface: Box::new(backend.clone()),
        indicator: Box::new(backend.clone()),
    }
}

/// Route engine logs to the test output (`RUST_LOG=debug cargo test`)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Track whose local id is already a backend id
pub fn create_test_track(title: &str) -> Track {
    Track::new(
        BackendTrackId::generate().as_str(),
        format!("file:///music/{}.mp3", title),
        180.0,
        TrackMetadata::new(title, "Test Artist", "Test Album"),
    )
}

/// Track with a device-local id that needs a catalog mapping
pub fn create_device_track(id: &str) -> Track {
    Track::new(
        id,
        format!("content://media/{}", id),
        180.0,
        TrackMetadata::new(format!("Device {}", id), "Test Artist", "Test Album"),
    )
}

pub fn backend_id(track: &Track) -> BackendTrackId {
    BackendTrackId::parse_canonical(track.id.as_str()).expect("test track has a backend id")
}

pub fn catalog_entry(local: &str) -> CatalogEntry {
    CatalogEntry {
        local_id: LocalTrackId::new(local),
        backend_id: BackendTrackId::generate(),
    }
}

pub fn abc() -> Vec<Track> {
    vec![
        create_test_track("a"),
        create_test_track("b"),
        create_test_track("c"),
    ]
}
