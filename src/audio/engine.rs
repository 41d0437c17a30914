use std::path::Path;
use std::time::Duration;

use crate::error::Result;

/// The external playback engine driven by `PlaybackController`.
///
/// Decoding and output belong to the engine. The controller only issues
/// commands and polls position and end-of-track.
pub trait PlaybackEngine {
    /// Open `path` and leave it paused at the start.
    fn load(&mut self, path: &Path) -> Result<()>;
    fn play(&mut self);
    fn pause(&mut self);
    /// Drop whatever is loaded.
    fn stop(&mut self);
    fn seek(&mut self, position: Duration) -> Result<()>;
    fn position(&self) -> Duration;
    /// Total length of the loaded track, when the decoder knows it.
    fn length(&self) -> Option<Duration>;
    /// Linear gain, 0.0 to 1.0.
    fn set_volume(&mut self, volume: f32);
    /// True once a loaded track has played out.
    fn finished(&self) -> bool;
}
