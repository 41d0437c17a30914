//! cadenza: a music player core.
//!
//! Library scanning with background tag enrichment, a play queue over a
//! shared track registry, synced lyrics from sidecar files or lrclib, and
//! JSON persistence of state, history and likes.

pub mod app;
pub mod audio;
pub mod config;
pub mod error;
pub mod history;
pub mod library;
pub mod lyrics;
pub mod playlist;
pub mod runtime;
pub mod store;

pub use error::{Error, Result};
