//! Playback session thread tests
//!
//! Commands are applied in order, so a snapshot request observes every
//! command sent before it.

mod common;

use cadence_core::{CadenceError, CatalogEntry, EngineStatus, ListeningDelta, TrackCatalog};
use cadence_playback::{
    CatalogSource, PlaybackConfig, PlaybackController, PlaybackError, PlaybackEvent,
    PlaybackSession, PlaybackState, SessionCommand,
};
use common::*;
use std::time::Duration;

fn spawn_session() -> (PlaybackSession, CallLog) {
    init_tracing();
    let log = CallLog::default();
    let engine = RecordingEngine {
        log: log.clone(),
        ..Default::default()
    };
    let backend = RecordingBackend {
        log: log.clone(),
        ..Default::default()
    };
    let config = PlaybackConfig::default();
    let controller = PlaybackController::new(&config, collaborators(&engine, &backend));

    let session = PlaybackSession::spawn(controller, &config).unwrap();
    (session, log)
}

fn collect_events(session: &PlaybackSession) -> Vec<PlaybackEvent> {
    let mut events = Vec::new();
    while let Some(event) = session.try_recv_event() {
        events.push(event);
    }
    events
}

#[test]
fn commands_apply_in_order() {
    let (session, log) = spawn_session();
    let tracks = abc();
    let (a, b) = (tracks[0].clone(), tracks[1].clone());

    session.play(a.clone(), Some(tracks)).unwrap();
    session.next().unwrap();
    let snapshot = session.snapshot().unwrap();

    assert_eq!(snapshot.state, PlaybackState::Playing);
    assert_eq!(snapshot.active_track, Some(b.clone()));
    assert!(!snapshot.is_loading);
    assert_eq!(
        log.upserts(),
        vec![
            ListeningDelta::play(backend_id(&a)),
            ListeningDelta::skip(backend_id(&a)),
            ListeningDelta::play(backend_id(&b)),
        ]
    );
}

#[test]
fn engine_status_flows_through_queue() {
    let (session, log) = spawn_session();
    let a = create_test_track("a");

    session.play(a.clone(), None).unwrap();
    for second in 1..=31 {
        session
            .report_status(EngineStatus::playing_at(f64::from(second)))
            .unwrap();
    }
    let snapshot = session.snapshot().unwrap();

    assert_eq!(snapshot.position_secs, 31.0);
    assert_eq!(snapshot.pending_listening_secs, 1.0);
    assert!(log
        .upserts()
        .contains(&ListeningDelta::listening(backend_id(&a), 30.0)));
}

#[test]
fn events_are_forwarded() {
    let (session, _log) = spawn_session();
    let a = create_test_track("a");

    session.play(a.clone(), None).unwrap();
    session.pause().unwrap();
    session.snapshot().unwrap();

    let events = collect_events(&session);
    assert!(events.contains(&PlaybackEvent::TrackChanged {
        track_id: a.id.clone(),
        previous_track_id: None,
    }));
    assert!(events.contains(&PlaybackEvent::StateChanged {
        state: PlaybackState::Paused
    }));
}

#[test]
fn failed_commands_surface_as_error_events() {
    let (session, _log) = spawn_session();

    session.resume().unwrap();
    let event = session.recv_event_timeout(Duration::from_secs(5));

    assert_eq!(
        event,
        Some(PlaybackEvent::Error {
            message: PlaybackError::NoActiveTrack.to_string()
        })
    );
}

#[test]
fn refresh_catalog_through_session() {
    struct OneEntry(CatalogEntry);

    impl TrackCatalog for OneEntry {
        fn catalog_entries(&self) -> cadence_core::Result<Vec<CatalogEntry>> {
            Ok(vec![self.0.clone()])
        }
    }

    struct Offline;

    impl TrackCatalog for Offline {
        fn catalog_entries(&self) -> cadence_core::Result<Vec<CatalogEntry>> {
            Err(CadenceError::catalog("no connection"))
        }
    }

    let (session, log) = spawn_session();
    let entry = catalog_entry("content-9");

    session
        .send_command(SessionCommand::RefreshCatalog(CatalogSource(Box::new(
            OneEntry(entry.clone()),
        ))))
        .unwrap();
    session
        .send_command(SessionCommand::RefreshCatalog(CatalogSource(Box::new(
            Offline,
        ))))
        .unwrap();
    session
        .send_command(SessionCommand::Play {
            track: create_device_track("content-9"),
            playlist: None,
        })
        .unwrap();
    session.snapshot().unwrap();

    // Failed refresh kept the earlier mapping
    assert_eq!(log.upserts(), vec![ListeningDelta::play(entry.backend_id)]);
}

#[test]
fn shutdown_tears_down() {
    let (session, log) = spawn_session();
    let a = create_test_track("a");

    session.play(a, None).unwrap();
    session.snapshot().unwrap();
    log.clear();

    session.shutdown();

    assert_eq!(
        log.all(),
        vec![Call::Pause, Call::Deactivate, Call::Indicator(None)]
    );
}

#[test]
fn dropping_session_joins_thread() {
    let (session, log) = spawn_session();
    session.play(create_test_track("a"), None).unwrap();

    drop(session);

    assert_eq!(log.indicator_calls().last(), Some(&None));
}
