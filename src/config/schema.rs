use std::path::PathBuf;

use serde::Deserialize;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/cadenza/config.toml` or `~/.config/cadenza/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `CADENZA__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub playback: PlaybackSettings,
    pub lyrics: LyricsSettings,
    pub storage: StorageSettings,
    pub runtime: RuntimeSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Folders scanned at startup when the saved state has none.
    pub folders: Vec<PathBuf>,
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,

    /// Which fields make up a track's display string, and in what order.
    ///
    /// Example: ["artist", "title"] -> "Artist - Title"
    pub display_fields: Vec<TrackDisplayField>,
    /// Separator used to join `display_fields`.
    pub display_separator: String,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            folders: Vec::new(),
            extensions: vec![
                "mp3".into(),
                "flac".into(),
                "wav".into(),
                "ogg".into(),
                "m4a".into(),
                "opus".into(),
            ],
            follow_links: true,
            include_hidden: true,
            recursive: true,
            max_depth: None,
            display_fields: vec![TrackDisplayField::Artist, TrackDisplayField::Title],
            display_separator: " - ".to_string(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackDisplayField {
    Title,
    Artist,
    Album,
    Genre,
    Filename,
    Path,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Whether repeat-one starts enabled.
    pub repeat: bool,
    /// Initial volume, 0..=100.
    pub volume: u8,
    /// "Previous" restarts the current track when it has played longer than this.
    pub restart_threshold_secs: f64,
    /// Interval of the position/lyrics polling tick (milliseconds).
    pub poll_interval_ms: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            repeat: false,
            volume: 80,
            restart_threshold_secs: 3.0,
            poll_interval_ms: 200,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LyricsSettings {
    /// Query the remote lyrics service when no sidecar `.lrc` exists.
    pub online: bool,
    /// Lookup endpoint taking `artist_name` and `track_name` query parameters.
    pub endpoint: String,
    /// Request timeout (seconds).
    pub timeout_secs: u64,
}

impl Default for LyricsSettings {
    fn default() -> Self {
        Self {
            online: true,
            endpoint: "https://lrclib.net/api/get".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory for state, history and liked songs.
    /// Defaults to `$XDG_DATA_HOME/cadenza` or `~/.local/share/cadenza`.
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RuntimeSettings {
    /// Capacity of the worker -> control loop hand-off channel.
    pub channel_capacity: usize,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            channel_capacity: 256,
        }
    }
}
