use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::debug;

use crate::error::{Error, Result};

use super::engine::PlaybackEngine;
use super::sink::create_sink_at;

/// `PlaybackEngine` backed by the default `rodio` output device.
///
/// Lives on the control thread; rodio mixes on its own thread, so none of
/// these calls block for longer than opening and probing a file.
pub struct RodioEngine {
    stream: OutputStream,
    sink: Option<Sink>,
    path: Option<PathBuf>,
    length: Option<Duration>,
    volume: f32,

    // Track start time and accumulated elapsed when paused.
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl RodioEngine {
    pub fn open() -> Result<Self> {
        let mut stream = OutputStreamBuilder::open_default_stream().map_err(|e| Error::NoOutput {
            reason: e.to_string(),
        })?;
        // rodio logs to stderr when OutputStream is dropped.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            path: None,
            length: None,
            volume: 1.0,
            started_at: None,
            accumulated: Duration::ZERO,
        })
    }

    fn install(&mut self, path: &Path, start_at: Duration) -> Result<()> {
        let (sink, length) = create_sink_at(&self.stream, path, start_at)?;
        sink.set_volume(self.volume);
        if let Some(old) = self.sink.replace(sink) {
            old.stop();
        }
        self.length = length;
        self.accumulated = start_at;
        self.started_at = None;
        Ok(())
    }

    fn is_playing(&self) -> bool {
        self.started_at.is_some()
    }
}

impl PlaybackEngine for RodioEngine {
    fn load(&mut self, path: &Path) -> Result<()> {
        self.install(path, Duration::ZERO)?;
        self.path = Some(path.to_path_buf());
        debug!(path = %path.display(), length = ?self.length, "track loaded");
        Ok(())
    }

    fn play(&mut self) {
        // A drained sink has nothing left to play; start the file over.
        if self.sink.as_ref().is_some_and(Sink::empty) {
            if let Some(path) = self.path.clone() {
                if let Err(e) = self.install(&path, Duration::ZERO) {
                    debug!(error = %e, "reload before play failed");
                    return;
                }
            }
        }
        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        sink.play();
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    fn pause(&mut self) {
        if let Some(sink) = self.sink.as_ref() {
            sink.pause();
        }
        if let Some(st) = self.started_at.take() {
            self.accumulated += st.elapsed();
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.path = None;
        self.length = None;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
    }

    fn seek(&mut self, position: Duration) -> Result<()> {
        let Some(path) = self.path.clone() else {
            return Err(Error::NothingLoaded);
        };
        let was_playing = self.is_playing();

        // Rebuild the sink and skip into the file.
        self.install(&path, position)?;
        if was_playing {
            self.play();
        }
        Ok(())
    }

    fn position(&self) -> Duration {
        let position = self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed());
        // Wall-clock time keeps running after the sink drains.
        self.length.map_or(position, |length| position.min(length))
    }

    fn length(&self) -> Option<Duration> {
        self.length
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(sink) = self.sink.as_ref() {
            sink.set_volume(self.volume);
        }
    }

    fn finished(&self) -> bool {
        self.is_playing() && self.sink.as_ref().is_some_and(Sink::empty)
    }
}
