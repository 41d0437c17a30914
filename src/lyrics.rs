//! Lyrics: LRC parsing, sidecar and remote resolution, line highlighting.

mod lrc;
mod remote;
mod report;
mod resolver;
mod tracker;

pub use lrc::{LyricLine, LyricsDocument};
pub use remote::{LrclibClient, LyricsSource, RemoteLyrics, parse_response};
pub use report::{MissingLyricsReport, has_lyrics, spawn_missing_check};
pub use resolver::{LyricsReady, LyricsResolver, LyricsView, load_sidecar, lookup, sidecar_path};
pub use tracker::LineTracker;

#[cfg(test)]
pub(crate) mod fake;

#[cfg(test)]
mod tests;
