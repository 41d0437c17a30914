use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::SyncSender;
use std::thread;

use tracing::debug;

use super::lrc::LyricsDocument;
use super::remote::{LyricsSource, RemoteLyrics};

/// What the lyrics pane shows for the now-playing track.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LyricsView {
    /// A remote lookup is in flight.
    Searching,
    Timed(LyricsDocument),
    /// Untimed text shown as one block.
    Plain(String),
    #[default]
    NotFound,
}

/// A finished background lookup, delivered to the control loop.
#[derive(Debug, Clone)]
pub struct LyricsReady {
    pub path: PathBuf,
    pub view: LyricsView,
}

/// `<track path without extension>.lrc`
pub fn sidecar_path(track: &Path) -> PathBuf {
    track.with_extension("lrc")
}

/// Read and parse the sidecar next to `track`.
///
/// Missing, unreadable or untimed sidecars all yield `None`. Invalid UTF-8
/// is replaced rather than rejected.
pub fn load_sidecar(track: &Path) -> Option<LyricsDocument> {
    let path = sidecar_path(track);
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            if path.exists() {
                debug!(path = %path.display(), error = %e, "unreadable lyrics sidecar");
            }
            return None;
        }
    };
    let doc = LyricsDocument::parse(&String::from_utf8_lossy(&bytes));
    (!doc.is_empty()).then_some(doc)
}

/// Run one remote lookup, folding every failure into `NotFound`.
pub fn lookup(source: &dyn LyricsSource, artist: &str, title: &str) -> LyricsView {
    match source.fetch(artist, title) {
        Ok(RemoteLyrics::Synced(doc)) => LyricsView::Timed(doc),
        Ok(RemoteLyrics::Plain(text)) => LyricsView::Plain(text),
        Ok(RemoteLyrics::NotFound) => LyricsView::NotFound,
        Err(e) => {
            debug!(artist, title, error = %e, "lyrics lookup failed");
            LyricsView::NotFound
        }
    }
}

/// Sidecar first, then the remote source on a worker thread.
pub struct LyricsResolver {
    source: Option<Arc<dyn LyricsSource>>,
}

impl LyricsResolver {
    /// `source` is `None` when online lookups are disabled.
    pub fn new(source: Option<Arc<dyn LyricsSource>>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> Option<Arc<dyn LyricsSource>> {
        self.source.clone()
    }

    /// Resolve lyrics for the track at `path`.
    ///
    /// A sidecar is parsed synchronously and returned as `Timed`. Otherwise
    /// a worker is started, `Searching` is returned, and the outcome arrives
    /// later as a `LyricsReady` through `tx`.
    pub fn resolve<T>(&self, path: &Path, artist: &str, title: &str, tx: &SyncSender<T>) -> LyricsView
    where
        T: From<LyricsReady> + Send + 'static,
    {
        if let Some(doc) = load_sidecar(path) {
            debug!(path = %path.display(), lines = doc.len(), "lyrics from sidecar");
            return LyricsView::Timed(doc);
        }

        let Some(source) = self.source.clone() else {
            return LyricsView::NotFound;
        };

        let tx = tx.clone();
        let path = path.to_path_buf();
        let artist = artist.to_string();
        let title = title.to_string();
        thread::spawn(move || {
            let view = lookup(source.as_ref(), &artist, &title);
            // The control loop may already be gone at shutdown.
            let _ = tx.send(T::from(LyricsReady { path, view }));
        });
        LyricsView::Searching
    }
}
