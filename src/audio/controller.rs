//! Playback state machine over a `PlaybackEngine`.
//!
//! Idle -> (load) -> Paused <-> Playing. Any failed load returns to Idle.
//! The controller never touches the queue; it reports `TrackEnd` from
//! `poll` and the owner decides what plays next.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::PlaybackSettings;
use crate::error::{Error, Result};

use super::engine::PlaybackEngine;
use super::types::{PlayerState, TrackEnd};

struct Loaded {
    path: PathBuf,
    /// Tag duration, used when the engine cannot report a length.
    fallback_length: f64,
}

pub struct PlaybackController<E> {
    engine: E,
    state: PlayerState,
    loaded: Option<Loaded>,
    repeat: bool,
    volume: u8,
    restart_threshold: f64,
    /// Slider value while the user is dragging it.
    scrub: Option<f64>,
}

impl<E: PlaybackEngine> PlaybackController<E> {
    pub fn new(mut engine: E, settings: &PlaybackSettings) -> Self {
        let volume = settings.volume.min(100);
        engine.set_volume(f32::from(volume) / 100.0);
        Self {
            engine,
            state: PlayerState::Idle,
            loaded: None,
            repeat: settings.repeat,
            volume,
            restart_threshold: settings.restart_threshold_secs,
            scrub: None,
        }
    }

    /// Load `path` paused at the start.
    ///
    /// On failure the controller is left idle and the error is returned.
    pub fn load(&mut self, path: &Path, fallback_length: f64) -> Result<()> {
        self.scrub = None;
        match self.engine.load(path) {
            Ok(()) => {
                self.loaded = Some(Loaded {
                    path: path.to_path_buf(),
                    fallback_length,
                });
                self.state = PlayerState::Paused;
                Ok(())
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load track");
                self.engine.stop();
                self.loaded = None;
                self.state = PlayerState::Idle;
                Err(e)
            }
        }
    }

    /// Paused -> Playing. Returns false in any other state.
    pub fn play(&mut self) -> bool {
        if self.state != PlayerState::Paused {
            return false;
        }
        self.engine.play();
        self.state = PlayerState::Playing;
        true
    }

    /// Playing -> Paused. Returns false in any other state.
    pub fn pause(&mut self) -> bool {
        if self.state != PlayerState::Playing {
            return false;
        }
        self.engine.pause();
        self.state = PlayerState::Paused;
        true
    }

    pub fn toggle(&mut self) -> bool {
        match self.state {
            PlayerState::Playing => self.pause(),
            PlayerState::Paused => self.play(),
            PlayerState::Idle => false,
        }
    }

    /// Unload the current track.
    pub fn stop(&mut self) {
        self.engine.stop();
        self.loaded = None;
        self.scrub = None;
        self.state = PlayerState::Idle;
    }

    /// Seek to `seconds`, clamped to `[0, length]`.
    pub fn seek(&mut self, seconds: f64) -> Result<()> {
        if self.loaded.is_none() {
            return Err(Error::NothingLoaded);
        }
        let length = self.length_seconds();
        let target = if seconds.is_finite() { seconds } else { 0.0 };
        let target = if length > 0.0 {
            target.clamp(0.0, length)
        } else {
            target.max(0.0)
        };
        debug!(seconds = target, "seek");
        let target = Duration::try_from_secs_f64(target).unwrap_or(Duration::ZERO);
        self.engine.seek(target)
    }

    /// Check the engine for end of track.
    ///
    /// With repeat on, the track restarts and `Repeated` is returned.
    /// Otherwise the controller pauses and returns `Advance`.
    pub fn poll(&mut self) -> Result<Option<TrackEnd>> {
        if self.state != PlayerState::Playing || !self.engine.finished() {
            return Ok(None);
        }
        if self.repeat {
            if let Err(e) = self.engine.seek(Duration::ZERO) {
                self.stop();
                return Err(e);
            }
            self.engine.play();
            return Ok(Some(TrackEnd::Repeated));
        }
        self.engine.pause();
        self.state = PlayerState::Paused;
        Ok(Some(TrackEnd::Advance))
    }

    /// Playback position, or the held slider value while scrubbing.
    pub fn position_seconds(&self) -> f64 {
        if let Some(v) = self.scrub {
            return v;
        }
        if self.loaded.is_none() {
            return 0.0;
        }
        self.engine.position().as_secs_f64()
    }

    pub fn length_seconds(&self) -> f64 {
        let Some(loaded) = self.loaded.as_ref() else {
            return 0.0;
        };
        match self.engine.length() {
            Some(d) if !d.is_zero() => d.as_secs_f64(),
            _ => loaded.fallback_length.max(0.0),
        }
    }

    /// The user grabbed or moved the position slider.
    pub fn scrub_to(&mut self, seconds: f64) {
        if self.loaded.is_some() {
            self.scrub = Some(seconds.max(0.0));
        }
    }

    /// The user let go of the slider: seek to where it was left.
    pub fn release_scrub(&mut self) -> Result<()> {
        match self.scrub.take() {
            Some(v) => self.seek(v),
            None => Ok(()),
        }
    }

    pub fn is_scrubbing(&self) -> bool {
        self.scrub.is_some()
    }

    /// Whether "previous" should restart the current track instead of
    /// stepping back in the queue.
    pub fn past_restart_threshold(&self) -> bool {
        self.loaded.is_some() && self.position_seconds() > self.restart_threshold
    }

    pub fn toggle_repeat(&mut self) -> bool {
        self.repeat = !self.repeat;
        self.repeat
    }

    pub fn set_repeat(&mut self, on: bool) {
        self.repeat = on;
    }

    pub fn repeat(&self) -> bool {
        self.repeat
    }

    /// Set volume in percent, clamped to 100.
    pub fn set_volume(&mut self, percent: u8) {
        self.volume = percent.min(100);
        self.engine.set_volume(f32::from(self.volume) / 100.0);
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn loaded_path(&self) -> Option<&Path> {
        self.loaded.as_ref().map(|l| l.path.as_path())
    }

    #[cfg(test)]
    pub(crate) fn engine(&self) -> &E {
        &self.engine
    }

    #[cfg(test)]
    pub(crate) fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}
