//! Engine failure handling with strict call expectations

mod common;

use cadence_core::{AudioEngine, CadenceError, ListeningDelta, LoopMode};
use cadence_playback::{Collaborators, PlaybackConfig, PlaybackController, PlaybackError};
use common::*;
use mockall::{mock, Sequence};

mock! {
    pub Engine {}

    impl AudioEngine for Engine {
        fn replace(&mut self, uri: &str) -> cadence_core::Result<()>;
        fn play(&mut self) -> cadence_core::Result<()>;
        fn pause(&mut self) -> cadence_core::Result<()>;
        fn seek_to(&mut self, seconds: f64) -> cadence_core::Result<()>;
        fn set_loop(&mut self, enabled: bool) -> cadence_core::Result<()>;
    }
}

fn controller_with(engine: MockEngine, backend: &RecordingBackend) -> PlaybackController {
    PlaybackController::new(
        &PlaybackConfig::default(),
        Collaborators {
            engine: Box::new(engine),
            gateway: Box::new(backend.clone()),
            surface: Box::new(backend.clone()),
            indicator: Box::new(backend.clone()),
        },
    )
}

#[test]
fn play_failure_after_replace_keeps_track_but_not_playing() {
    let a = create_test_track("a");
    let uri = a.uri.clone();

    let mut engine = MockEngine::new();
    let mut seq = Sequence::new();
    engine
        .expect_replace()
        .withf(move |u| u == uri)
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    engine
        .expect_play()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Err(CadenceError::engine("output device busy")));

    let backend = RecordingBackend::default();
    let mut controller = controller_with(engine, &backend);

    let err = controller.play(a.clone(), None).unwrap_err();

    assert!(matches!(err, PlaybackError::Engine(_)));
    assert!(!controller.is_loading());
    assert!(!controller.is_playing());
    assert_eq!(controller.active_track(), Some(&a));
    assert!(backend.log.upserts().is_empty());
}

#[test]
fn failed_switch_still_records_skip_of_outgoing_track() {
    let tracks = abc();
    let (a, b) = (tracks[0].clone(), tracks[1].clone());
    let b_uri = b.uri.clone();

    let mut engine = MockEngine::new();
    engine
        .expect_replace()
        .withf(move |u| u != b_uri)
        .returning(|_| Ok(()));
    engine
        .expect_replace()
        .returning(|_| Err(CadenceError::engine("unsupported codec")));
    engine.expect_play().returning(|| Ok(()));

    let backend = RecordingBackend::default();
    let mut controller = controller_with(engine, &backend);

    controller.play(a.clone(), Some(tracks)).unwrap();
    assert!(controller.next().is_err());

    assert_eq!(
        backend.log.upserts(),
        vec![
            ListeningDelta::play(backend_id(&a)),
            ListeningDelta::skip(backend_id(&a)),
        ]
    );
    assert_eq!(controller.active_track(), Some(&b));
    assert!(!controller.is_loading());
}

#[test]
fn rejected_loop_mode_is_not_stored() {
    let mut engine = MockEngine::new();
    engine
        .expect_set_loop()
        .times(1)
        .returning(|_| Err(CadenceError::engine("looping unsupported")));

    let backend = RecordingBackend::default();
    let mut controller = controller_with(engine, &backend);

    assert!(controller.set_loop_mode(LoopMode::One).is_err());
    assert_eq!(controller.loop_mode(), LoopMode::None);
}

#[test]
fn failed_pause_keeps_playing_state() {
    let a = create_test_track("a");

    let mut engine = MockEngine::new();
    engine.expect_replace().returning(|_| Ok(()));
    engine.expect_play().returning(|| Ok(()));
    engine
        .expect_pause()
        .times(1)
        .returning(|| Err(CadenceError::engine("session interrupted")));

    let backend = RecordingBackend::default();
    let mut controller = controller_with(engine, &backend);

    controller.play(a, None).unwrap();
    assert!(controller.pause().is_err());
    assert!(controller.is_playing());
}
