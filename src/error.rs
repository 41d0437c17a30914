//! Crate-wide error type.
//!
//! Most failures in the player core degrade to a fallback value at the
//! component boundary (placeholder metadata, "no lyrics", default state).
//! This enum is what those boundaries see before they degrade.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // Configuration errors
    #[error("Failed to load config: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Invalid config: {message}")]
    ConfigInvalid { message: String },

    // Playback errors
    #[error("No audio output device: {reason}")]
    NoOutput { reason: String },

    #[error("Playback engine failed on {path}: {reason}")]
    Engine { path: PathBuf, reason: String },

    #[error("Nothing is loaded")]
    NothingLoaded,

    // Library errors
    #[error("Track is not in the library: {0}")]
    UnknownTrack(PathBuf),

    #[error("No track with id {0} in the library")]
    UnknownTrackId(crate::library::TrackId),

    #[error("Tag error: {0}")]
    Tag(#[from] lofty::error::LoftyError),

    // Lyrics errors
    #[error("Lyrics service returned status {status}")]
    LyricsStatus { status: u16 },

    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    // Persistence errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
