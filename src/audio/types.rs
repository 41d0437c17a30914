//! Small audio-related types shared by the queue, the controller and the app.

use std::fmt;

/// Controller state machine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum PlayerState {
    /// Nothing loaded.
    #[default]
    Idle,
    /// A track is loaded but not playing.
    Paused,
    Playing,
}

impl fmt::Display for PlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Paused => "paused",
            Self::Playing => "playing",
        })
    }
}

/// Step direction for queue navigation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// What happened when the engine ran out of audio for the current track.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TrackEnd {
    /// Repeat mode restarted the same track.
    Repeated,
    /// The queue should move on; the controller is now paused.
    Advance,
}
