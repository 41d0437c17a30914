use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use tempfile::tempdir;

use super::*;

fn rec(name: &str) -> TrackRecord {
    TrackRecord {
        path: PathBuf::from(format!("/music/{name}.mp3")),
        title: name.to_uppercase(),
        artist: "Artist".into(),
        album: "Album".into(),
        genre: "Genre".into(),
        duration: 181.5,
    }
}

fn sample_state() -> PersistedState {
    let mut playlists = BTreeMap::new();
    playlists.insert("Road".to_string(), vec![rec("b"), rec("a")]);
    playlists.insert("Empty".to_string(), Vec::new());
    PersistedState {
        folders: vec![PathBuf::from("/music"), PathBuf::from("/more")],
        playlists,
        queue: vec![rec("c"), rec("a"), rec("b")],
        play_index: 2,
    }
}

fn history_entry(name: &str) -> HistoryEntry {
    HistoryEntry {
        path: PathBuf::from(format!("/music/{name}.mp3")),
        title: name.into(),
        artist: "Artist".into(),
        time: NaiveDate::from_ymd_opt(2024, 1, 2)
            .and_then(|d| d.and_hms_opt(3, 4, 5))
            .unwrap(),
    }
}

#[test]
fn json_state_round_trips() {
    let dir = tempdir().unwrap();
    let mut store = JsonStore::new(dir.path().join("nested"));

    let state = sample_state();
    store.save_state(&state).unwrap();

    let loaded = JsonStore::new(dir.path().join("nested")).load_state();
    assert_eq!(loaded, state);
    assert_eq!(loaded.queue_index(), Some(2));
}

#[test]
fn missing_state_file_loads_defaults() {
    let dir = tempdir().unwrap();
    let store = JsonStore::new(dir.path());
    assert_eq!(store.load_state(), PersistedState::default());
    assert!(store.load_history().is_empty());
    assert!(store.load_liked().is_empty());
}

#[test]
fn corrupt_files_load_defaults() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("state.json"), "{ not json").unwrap();
    fs::write(dir.path().join("history.json"), "[1, 2").unwrap();

    let store = JsonStore::new(dir.path());
    assert_eq!(store.load_state(), PersistedState::default());
    assert!(store.load_history().is_empty());
}

#[test]
fn state_tolerates_missing_keys_and_negative_index() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("state.json"),
        r#"{"folders": ["/music"], "queue": [{"path": "/music/a.mp3"}], "play_index": -1}"#,
    )
    .unwrap();

    let state = JsonStore::new(dir.path()).load_state();
    assert_eq!(state.folders, vec![PathBuf::from("/music")]);
    assert!(state.playlists.is_empty());
    assert_eq!(state.queue[0].title, "");
    assert_eq!(state.queue_index(), Some(0));
}

#[test]
fn queue_index_clamps_to_queue() {
    let mut state = sample_state();
    state.play_index = 99;
    assert_eq!(state.queue_index(), Some(2));
    state.queue.clear();
    assert_eq!(state.queue_index(), None);
}

#[test]
fn history_appends_across_instances() {
    let dir = tempdir().unwrap();
    JsonStore::new(dir.path())
        .append_history(&history_entry("one"))
        .unwrap();
    JsonStore::new(dir.path())
        .append_history(&history_entry("two"))
        .unwrap();

    let history = JsonStore::new(dir.path()).load_history();
    let titles: Vec<&str> = history.iter().map(|h| h.title.as_str()).collect();
    assert_eq!(titles, vec!["one", "two"]);

    let raw = fs::read_to_string(dir.path().join("history.json")).unwrap();
    assert!(raw.contains(r#""time": "2024-01-02T03:04:05""#), "{raw}");
}

#[test]
fn append_leaves_a_damaged_history_untouched() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("history.json");
    let damaged = r#"[{"path": "/music/old.mp3", "title": "old", "artist": "A", "time": "2024-01-0"#;
    fs::write(&file, damaged).unwrap();

    let mut store = JsonStore::new(dir.path());
    assert!(store.append_history(&history_entry("new")).is_err());
    assert_eq!(fs::read_to_string(&file).unwrap(), damaged);
    assert!(store.load_history().is_empty());

    fs::write(dir.path().join("liked_songs.json"), "[{").unwrap();
    assert!(store.like(&rec("a")).is_err());
    assert_eq!(fs::read_to_string(dir.path().join("liked_songs.json")).unwrap(), "[{");
}

#[test]
fn likes_are_deduplicated_by_path() {
    let dir = tempdir().unwrap();
    let mut store = JsonStore::new(dir.path());
    assert!(store.like(&rec("a")).unwrap());
    assert!(store.like(&rec("b")).unwrap());

    let mut renamed = rec("a");
    renamed.title = "Different title".into();
    assert!(!store.like(&renamed).unwrap());

    let liked = store.load_liked();
    assert_eq!(liked.len(), 2);
    assert_eq!(liked[0].title, "A");
}

#[test]
fn missing_report_is_written_as_record_array() {
    let dir = tempdir().unwrap();
    let mut store = JsonStore::new(dir.path());
    store.save_missing_report(&[rec("x")]).unwrap();

    let raw = fs::read_to_string(store.missing_report_path()).unwrap();
    let back: Vec<TrackRecord> = serde_json::from_str(&raw).unwrap();
    assert_eq!(back, vec![rec("x")]);
}

#[test]
fn memory_store_behaves_like_json_store() {
    let mut store = MemoryStore::default();
    assert_eq!(store.load_state(), PersistedState::default());

    store.save_state(&sample_state()).unwrap();
    assert_eq!(store.load_state(), sample_state());

    store.append_history(&history_entry("x")).unwrap();
    assert_eq!(store.load_history().len(), 1);

    assert!(store.like(&rec("a")).unwrap());
    assert!(!store.like(&rec("a")).unwrap());
    assert_eq!(store.load_liked().len(), 1);
}
