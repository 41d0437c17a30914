use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::audio::PlayerState;
use crate::lyrics::LyricsView;

/// What the core tells the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// A catalog row's metadata changed.
    RowUpdated { path: PathBuf, display: String },
    /// A scan replaced the catalog with `len` placeholder rows.
    CatalogReplaced { len: usize },
    NowPlayingChanged { path: PathBuf, display: String },
    PlaybackStateChanged(PlayerState),
    QueueChanged { len: usize, index: Option<usize> },
    LyricsChanged(LyricsView),
    /// The highlighted lyric line moved. `index` is `None` before the first line.
    LyricsLineChanged { index: Option<usize>, text: String },
    PlaylistsChanged,
    MissingLyrics { checked: usize, missing: usize },
    Error(String),
}

/// Receiver of core notifications, called on the control thread.
pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

/// Writes notifications to the log. Used by the headless front end.
#[derive(Debug, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&mut self, notification: Notification) {
        match notification {
            Notification::RowUpdated { path, display: text } => {
                debug!(path = %path.display(), display = %text, "row updated");
            }
            Notification::CatalogReplaced { len } => info!(tracks = len, "catalog replaced"),
            Notification::NowPlayingChanged { display: text, .. } => info!("now playing: {text}"),
            Notification::PlaybackStateChanged(state) => info!(%state, "playback"),
            Notification::QueueChanged { len, index } => info!(len, ?index, "queue changed"),
            Notification::LyricsChanged(view) => match view {
                LyricsView::Searching => info!("searching lyrics"),
                LyricsView::Timed(doc) => info!(lines = doc.len(), "timed lyrics loaded"),
                LyricsView::Plain(text) => info!("lyrics:\n{text}"),
                LyricsView::NotFound => info!("no lyrics found"),
            },
            Notification::LyricsLineChanged { text, .. } => {
                if !text.is_empty() {
                    info!("♪ {text}");
                }
            }
            Notification::PlaylistsChanged => info!("playlists changed"),
            Notification::MissingLyrics { checked, missing } => {
                info!(checked, missing, "lyrics check complete")
            }
            Notification::Error(message) => warn!("{message}"),
        }
    }
}
