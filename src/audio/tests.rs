use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::PlaybackSettings;
use crate::library::{Library, TrackId};

use super::fake::FakeEngine;
use super::*;

fn ids(n: usize) -> (Library, Vec<TrackId>) {
    let mut lib = Library::default();
    let paths: Vec<PathBuf> = (0..n).map(|i| PathBuf::from(format!("/m/{i}.mp3"))).collect();
    let ids = lib.replace_catalog(&paths).to_vec();
    (lib, ids)
}

fn controller() -> PlaybackController<FakeEngine> {
    PlaybackController::new(FakeEngine::with_length(200), &PlaybackSettings::default())
}

// Queue

#[test]
fn empty_queue_has_no_index() {
    let mut q = PlaybackQueue::new();
    assert_eq!(q.index(), None);
    assert_eq!(q.current(), None);
    assert!(!q.advance(Direction::Forward));
    q.set_from_track_list(Vec::new(), 3);
    assert_eq!(q.index(), None);
}

#[test]
fn set_from_track_list_clamps_start() {
    let (_, ids) = ids(3);
    let mut q = PlaybackQueue::new();
    q.set_from_track_list(ids.clone(), 10);
    assert_eq!(q.index(), Some(2));
    q.set_from_track_list(ids.clone(), 1);
    assert_eq!(q.current(), Some(ids[1]));
}

#[test]
fn advance_forward_clamps_at_last_without_wrapping() {
    let (_, ids) = ids(5);
    for start in 0..ids.len() {
        let mut q = PlaybackQueue::new();
        q.set_from_track_list(ids.clone(), start);
        for _ in 0..ids.len() {
            q.advance(Direction::Forward);
        }
        assert_eq!(q.index(), Some(ids.len() - 1));
        assert!(!q.has_next());
    }
}

#[test]
fn advance_backward_clamps_at_first() {
    let (_, ids) = ids(3);
    let mut q = PlaybackQueue::new();
    q.set_from_track_list(ids.clone(), 2);
    assert!(q.advance(Direction::Backward));
    assert!(q.advance(Direction::Backward));
    assert!(!q.advance(Direction::Backward));
    assert_eq!(q.index(), Some(0));
}

#[test]
fn play_track_rotates_catalog() {
    let (_, ids) = ids(6);
    for k in 0..ids.len() {
        let mut q = PlaybackQueue::new();
        q.play_track(ids[k], &ids);
        let mut expected = ids[k..].to_vec();
        expected.extend_from_slice(&ids[..k]);
        assert_eq!(q.tracks(), expected.as_slice());
        assert_eq!(q.index(), Some(0));
    }
}

#[test]
fn play_track_outside_catalog_is_singleton() {
    let (mut lib, ids) = ids(3);
    let stray = lib.intern(Path::new("/elsewhere/x.mp3"));
    let mut q = PlaybackQueue::new();
    q.play_track(stray, &ids);
    assert_eq!(q.tracks(), &[stray]);
    assert_eq!(q.current(), Some(stray));
}

#[test]
fn rebuild_with_empty_order_is_noop() {
    let (_, ids) = ids(4);
    let mut q = PlaybackQueue::new();
    q.set_from_track_list(ids.clone(), 2);
    let before = q.clone();
    q.rebuild_from_external_order(Vec::new());
    assert_eq!(q, before);
}

#[test]
fn rebuild_follows_the_now_playing_track() {
    let (_, ids) = ids(4);
    let mut q = PlaybackQueue::new();
    q.set_from_track_list(ids.clone(), 1);
    let playing = ids[1];

    q.rebuild_from_external_order(vec![ids[3], ids[2], ids[1], ids[0]]);
    assert_eq!(q.current(), Some(playing));
    assert_eq!(q.index(), Some(2));
}

#[test]
fn rebuild_without_the_current_track_clamps_old_index() {
    let (_, ids) = ids(5);
    let mut q = PlaybackQueue::new();
    q.set_from_track_list(ids.clone(), 4);

    q.rebuild_from_external_order(vec![ids[0], ids[1]]);
    assert_eq!(q.index(), Some(1));
    assert_eq!(q.len(), 2);
}

#[test]
fn jump_to_ignores_out_of_range() {
    let (_, ids) = ids(3);
    let mut q = PlaybackQueue::new();
    q.set_from_track_list(ids.clone(), 0);
    assert_eq!(q.jump_to(2), Some(ids[2]));
    assert_eq!(q.jump_to(3), None);
    assert_eq!(q.index(), Some(2));
    assert_eq!(q.position_of(ids[1]), Some(1));
}

// Controller

#[test]
fn controller_state_machine_transitions() {
    let mut c = controller();
    assert_eq!(c.state(), PlayerState::Idle);
    assert!(!c.play());

    c.load(Path::new("/m/a.mp3"), 0.0).unwrap();
    assert_eq!(c.state(), PlayerState::Paused);
    assert!(!c.pause());

    assert!(c.play());
    assert_eq!(c.state(), PlayerState::Playing);
    assert!(c.engine().playing);

    assert!(c.toggle());
    assert_eq!(c.state(), PlayerState::Paused);

    c.stop();
    assert_eq!(c.state(), PlayerState::Idle);
    assert_eq!(c.loaded_path(), None);
}

#[test]
fn failed_load_leaves_controller_idle() {
    let mut engine = FakeEngine::with_length(100);
    engine.broken.insert(PathBuf::from("/m/bad.mp3"));
    let mut c = PlaybackController::new(engine, &PlaybackSettings::default());

    c.load(Path::new("/m/good.mp3"), 0.0).unwrap();
    c.play();
    assert!(c.load(Path::new("/m/bad.mp3"), 0.0).is_err());
    assert_eq!(c.state(), PlayerState::Idle);
    assert_eq!(c.loaded_path(), None);
}

#[test]
fn seek_clamps_to_length() {
    let mut c = controller();
    assert!(c.seek(5.0).is_err());

    c.load(Path::new("/m/a.mp3"), 0.0).unwrap();
    c.seek(500.0).unwrap();
    c.seek(-3.0).unwrap();
    assert_eq!(
        c.engine().seeks,
        vec![Duration::from_secs(200), Duration::ZERO]
    );
}

#[test]
fn length_falls_back_to_tag_duration() {
    let mut c = PlaybackController::new(FakeEngine::default(), &PlaybackSettings::default());
    c.load(Path::new("/m/a.mp3"), 123.0).unwrap();
    assert_eq!(c.length_seconds(), 123.0);
    c.seek(1000.0).unwrap();
    assert_eq!(c.engine().seeks, vec![Duration::from_secs(123)]);
}

#[test]
fn end_of_track_without_repeat_pauses_and_asks_to_advance() {
    let mut c = controller();
    c.load(Path::new("/m/a.mp3"), 0.0).unwrap();
    c.play();
    assert_eq!(c.poll().unwrap(), None);

    c.engine_mut().finished = true;
    assert_eq!(c.poll().unwrap(), Some(TrackEnd::Advance));
    assert_eq!(c.state(), PlayerState::Paused);
    assert!(!c.engine().playing);
    assert_eq!(c.loaded_path(), Some(Path::new("/m/a.mp3")));

    // Nothing more to report until playback resumes.
    assert_eq!(c.poll().unwrap(), None);
    assert!(c.play());
    assert!(c.engine().playing);
    assert!(!c.engine().finished);
}

#[test]
fn end_of_track_with_repeat_restarts_same_track() {
    let mut c = controller();
    c.set_repeat(true);
    c.load(Path::new("/m/a.mp3"), 0.0).unwrap();
    c.play();
    c.engine_mut().position = Duration::from_secs(200);
    c.engine_mut().finished = true;

    assert_eq!(c.poll().unwrap(), Some(TrackEnd::Repeated));
    assert_eq!(c.state(), PlayerState::Playing);
    assert_eq!(c.position_seconds(), 0.0);
    assert!(c.engine().playing);
}

#[test]
fn scrub_value_wins_until_release() {
    let mut c = controller();
    c.load(Path::new("/m/a.mp3"), 0.0).unwrap();
    c.play();
    c.engine_mut().position = Duration::from_secs(10);

    c.scrub_to(42.0);
    assert!(c.is_scrubbing());
    assert_eq!(c.position_seconds(), 42.0);

    c.release_scrub().unwrap();
    assert!(!c.is_scrubbing());
    assert_eq!(c.position_seconds(), 42.0);
    assert_eq!(c.engine().seeks, vec![Duration::from_secs(42)]);
}

#[test]
fn restart_threshold_uses_position() {
    let mut c = controller();
    assert!(!c.past_restart_threshold());
    c.load(Path::new("/m/a.mp3"), 0.0).unwrap();
    c.engine_mut().position = Duration::from_secs(2);
    assert!(!c.past_restart_threshold());
    c.engine_mut().position = Duration::from_secs(4);
    assert!(c.past_restart_threshold());
}

#[test]
fn volume_is_clamped_and_forwarded() {
    let mut c = controller();
    assert_eq!(c.volume(), 80);
    c.set_volume(250);
    assert_eq!(c.volume(), 100);
    assert_eq!(c.engine().volume, 1.0);
    c.set_volume(0);
    assert_eq!(c.engine().volume, 0.0);
}
