//! In-memory `PlaybackEngine` for tests.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

use super::engine::PlaybackEngine;

#[derive(Debug, Default)]
pub(crate) struct FakeEngine {
    pub loaded: Option<PathBuf>,
    pub playing: bool,
    pub position: Duration,
    pub length: Option<Duration>,
    pub volume: f32,
    pub finished: bool,
    /// Paths whose load fails.
    pub broken: HashSet<PathBuf>,
    pub loads: Vec<PathBuf>,
    pub seeks: Vec<Duration>,
}

impl FakeEngine {
    pub fn with_length(secs: u64) -> Self {
        Self {
            length: Some(Duration::from_secs(secs)),
            ..Self::default()
        }
    }
}

impl PlaybackEngine for FakeEngine {
    fn load(&mut self, path: &Path) -> Result<()> {
        self.loads.push(path.to_path_buf());
        if self.broken.contains(path) {
            return Err(Error::Engine {
                path: path.to_path_buf(),
                reason: "unsupported format".into(),
            });
        }
        self.loaded = Some(path.to_path_buf());
        self.playing = false;
        self.finished = false;
        self.position = Duration::ZERO;
        Ok(())
    }

    fn play(&mut self) {
        // Like a drained rodio sink, a finished track starts over.
        if self.finished {
            self.finished = false;
            self.position = Duration::ZERO;
        }
        self.playing = self.loaded.is_some();
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn stop(&mut self) {
        self.loaded = None;
        self.playing = false;
        self.position = Duration::ZERO;
    }

    fn seek(&mut self, position: Duration) -> Result<()> {
        if self.loaded.is_none() {
            return Err(Error::NothingLoaded);
        }
        self.seeks.push(position);
        self.position = position;
        self.finished = false;
        Ok(())
    }

    fn position(&self) -> Duration {
        self.position
    }

    fn length(&self) -> Option<Duration> {
        self.length
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn finished(&self) -> bool {
        self.finished
    }
}
