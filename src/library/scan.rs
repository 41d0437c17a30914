use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::SyncSender;
use std::thread::{self, JoinHandle};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::metadata::extract;
use super::model::TrackMetadata;

/// Messages produced by a background enrichment worker.
#[derive(Debug, Clone)]
pub enum ScanEvent {
    /// Tags for one discovered file.
    Metadata {
        generation: u64,
        path: PathBuf,
        metadata: TrackMetadata,
    },
    /// Every discovered file of this scan has been reported.
    Finished { generation: u64, total: usize },
}

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Enumerate audio files under `folders` without reading any tags.
///
/// Folders are walked in order, entries within a directory by file name.
/// A path reachable from two folders is reported once.
pub fn discover(folders: &[PathBuf], settings: &LibrarySettings) -> Vec<PathBuf> {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut paths: Vec<PathBuf> = Vec::new();

    for dir in folders {
        if !dir.is_dir() {
            warn!(folder = %dir.display(), "library folder is missing, skipping");
            continue;
        }

        let mut walker = WalkDir::new(dir)
            .follow_links(settings.follow_links)
            .sort_by_file_name();

        // Non-recursive = only the root directory.
        let depth_cap = if settings.recursive {
            settings.max_depth
        } else {
            Some(1)
        };
        if let Some(d) = depth_cap {
            walker = walker.max_depth(d);
        }

        for entry in walker
            .into_iter()
            .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
            .filter_map(Result::ok)
        {
            let path = entry.path();
            if path.is_file()
                && (settings.include_hidden || !is_hidden(path))
                && is_audio_file(path, settings)
                && seen.insert(path.to_path_buf())
            {
                paths.push(path.to_path_buf());
            }
        }
    }

    info!(folders = folders.len(), files = paths.len(), "library discovery finished");
    paths
}

/// Read tags for `paths` on a worker thread, sending one event per file and
/// a final `Finished` through `tx`.
///
/// The worker stops early if the receiving side has gone away.
pub fn spawn_enrichment<T>(paths: Vec<PathBuf>, generation: u64, tx: SyncSender<T>) -> JoinHandle<()>
where
    T: From<ScanEvent> + Send + 'static,
{
    thread::spawn(move || {
        let total = paths.len();
        for path in paths {
            let metadata = extract(&path);
            let event = ScanEvent::Metadata {
                generation,
                path,
                metadata,
            };
            if tx.send(T::from(event)).is_err() {
                debug!(generation, "metadata receiver gone, stopping scan worker");
                return;
            }
        }
        let _ = tx.send(T::from(ScanEvent::Finished { generation, total }));
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::mpsc;
    use tempfile::tempdir;

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn is_audio_file_matches_configured_extensions_case_insensitive() {
        let settings = LibrarySettings::default();
        assert!(is_audio_file(Path::new("/tmp/a.mp3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.MP3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.flac"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.ogg"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a.lrc"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a"), &settings));
    }

    #[test]
    fn discover_filters_non_audio_and_keeps_name_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
        fs::write(dir.path().join("a.ogg"), b"not a real ogg").unwrap();
        fs::write(dir.path().join("a.lrc"), b"[00:01]hi").unwrap();

        let paths = discover(&[dir.path().to_path_buf()], &LibrarySettings::default());
        assert_eq!(names(&paths), vec!["a.ogg", "b.MP3"]);
    }

    #[test]
    fn discover_respects_include_hidden_false() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".hidden.mp3"), b"not real").unwrap();
        fs::write(dir.path().join("visible.mp3"), b"not real").unwrap();

        let settings = LibrarySettings {
            include_hidden: false,
            ..LibrarySettings::default()
        };
        let paths = discover(&[dir.path().to_path_buf()], &settings);
        assert_eq!(names(&paths), vec!["visible.mp3"]);
    }

    #[test]
    fn discover_respects_recursive_false() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("child.mp3"), b"not real").unwrap();

        let settings = LibrarySettings {
            recursive: false,
            ..LibrarySettings::default()
        };
        let paths = discover(&[dir.path().to_path_buf()], &settings);
        assert_eq!(names(&paths), vec!["root.mp3"]);
    }

    #[test]
    fn discover_dedupes_overlapping_folders_and_skips_missing() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("one.mp3"), b"not real").unwrap();
        fs::write(dir.path().join("two.mp3"), b"not real").unwrap();

        let folders = vec![
            dir.path().to_path_buf(),
            sub.clone(),
            dir.path().join("does-not-exist"),
        ];
        let paths = discover(&folders, &LibrarySettings::default());
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn enrichment_reports_every_path_then_finishes() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.mp3");
        let b = dir.path().join("b.mp3");
        fs::write(&a, b"x").unwrap();
        fs::write(&b, b"y").unwrap();

        let (tx, rx) = mpsc::sync_channel::<ScanEvent>(1);
        let handle = spawn_enrichment(vec![a.clone(), b.clone()], 7, tx);

        let events: Vec<ScanEvent> = rx.iter().collect();
        handle.join().unwrap();

        assert_eq!(events.len(), 3);
        let reported: Vec<PathBuf> = events
            .iter()
            .filter_map(|e| match e {
                ScanEvent::Metadata {
                    generation, path, ..
                } => {
                    assert_eq!(*generation, 7);
                    Some(path.clone())
                }
                ScanEvent::Finished { .. } => None,
            })
            .collect();
        assert_eq!(reported, vec![a, b]);
        assert!(matches!(
            events.last(),
            Some(ScanEvent::Finished {
                generation: 7,
                total: 2
            })
        ));
    }
}
