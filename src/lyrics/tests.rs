use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc;
use std::time::Duration;

use tempfile::tempdir;

use crate::library::TrackRecord;

use super::fake::FakeSource;
use super::*;

fn record(path: PathBuf, artist: &str, title: &str) -> TrackRecord {
    TrackRecord {
        path,
        title: title.into(),
        artist: artist.into(),
        album: String::new(),
        genre: String::new(),
        duration: 0.0,
    }
}

#[test]
fn sidecar_path_swaps_extension() {
    assert_eq!(
        sidecar_path(&PathBuf::from("/m/Artist - Song.flac")),
        PathBuf::from("/m/Artist - Song.lrc")
    );
}

#[test]
fn sidecar_is_used_synchronously_without_touching_the_source() {
    let dir = tempdir().unwrap();
    let track = dir.path().join("song.mp3");
    fs::write(dir.path().join("song.lrc"), "[00:01]Hi\n[00:02]There").unwrap();

    let source = Arc::new(FakeSource::default());
    let resolver = LyricsResolver::new(Some(source.clone()));
    let (tx, rx) = mpsc::sync_channel::<LyricsReady>(4);

    let view = resolver.resolve(&track, "A", "T", &tx);
    match view {
        LyricsView::Timed(doc) => assert_eq!(doc.len(), 2),
        other => panic!("expected timed lyrics, got {other:?}"),
    }
    assert!(rx.try_recv().is_err());
    assert!(source.calls.lock().unwrap().is_empty());
}

#[test]
fn untimed_sidecar_falls_through_to_remote() {
    let dir = tempdir().unwrap();
    let track = dir.path().join("song.mp3");
    fs::write(dir.path().join("song.lrc"), "no timing at all").unwrap();

    let source = Arc::new(FakeSource::with(
        "Band",
        "Song",
        RemoteLyrics::Plain("words".into()),
    ));
    let resolver = LyricsResolver::new(Some(source));
    let (tx, rx) = mpsc::sync_channel::<LyricsReady>(4);

    assert_eq!(resolver.resolve(&track, "Band", "Song", &tx), LyricsView::Searching);
    let ready = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(ready.path, track);
    assert_eq!(ready.view, LyricsView::Plain("words".into()));
}

#[test]
fn remote_failure_becomes_not_found() {
    let mut source = FakeSource::default();
    source.failing.push("Song".into());
    let resolver = LyricsResolver::new(Some(Arc::new(source)));
    let (tx, rx) = mpsc::sync_channel::<LyricsReady>(4);

    let track = PathBuf::from("/nowhere/song.mp3");
    assert_eq!(resolver.resolve(&track, "A", "Song", &tx), LyricsView::Searching);
    let ready = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(ready.view, LyricsView::NotFound);
}

#[test]
fn offline_resolver_without_sidecar_is_not_found() {
    let resolver = LyricsResolver::new(None);
    let (tx, rx) = mpsc::sync_channel::<LyricsReady>(4);
    let view = resolver.resolve(&PathBuf::from("/nowhere/x.mp3"), "A", "T", &tx);
    assert_eq!(view, LyricsView::NotFound);
    assert!(rx.try_recv().is_err());
}

#[test]
fn line_tracker_reports_only_changes() {
    let doc = LyricsDocument::parse("[00:01]a\n[00:03]b");
    let mut tracker = LineTracker::default();

    assert!(!tracker.update(&doc, 0.2));
    assert!(tracker.update(&doc, 1.0));
    assert_eq!(tracker.current(), Some(0));
    assert!(!tracker.update(&doc, 1.2));
    assert!(!tracker.update(&doc, 2.9));
    assert!(tracker.update(&doc, 3.0));
    assert_eq!(tracker.current(), Some(1));

    // Seek back before the first line.
    assert!(tracker.update(&doc, 0.0));
    assert_eq!(tracker.current(), None);
}

#[test]
fn missing_check_counts_sidecars_and_remote_hits() {
    let dir = tempdir().unwrap();
    let with_sidecar = dir.path().join("a.mp3");
    fs::write(dir.path().join("a.lrc"), "[00:01]x").unwrap();

    let mut source = FakeSource::with("B", "Hit", RemoteLyrics::Plain("p".into()));
    source.failing.push("Broken".into());

    let records = vec![
        record(with_sidecar, "A", "Sidecar"),
        record(dir.path().join("b.mp3"), "B", "Hit"),
        record(dir.path().join("c.mp3"), "C", "Miss"),
        record(dir.path().join("d.mp3"), "D", "Broken"),
    ];

    let (tx, rx) = mpsc::sync_channel::<MissingLyricsReport>(1);
    let handle = spawn_missing_check(records, Some(Arc::new(source)), tx);
    let report = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    handle.join().unwrap();

    assert_eq!(report.checked, 4);
    let titles: Vec<&str> = report.missing.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Miss", "Broken"]);
}

#[test]
fn has_lyrics_offline_only_checks_sidecars() {
    let rec = record(PathBuf::from("/nowhere/x.mp3"), "A", "T");
    assert!(!has_lyrics(&rec, None));
}
