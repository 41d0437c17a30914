//! Playback: the play queue, the controller state machine and the engine
//! it drives.

mod controller;
mod engine;
mod queue;
mod rodio_engine;
mod sink;
mod types;

pub use controller::PlaybackController;
pub use engine::PlaybackEngine;
pub use queue::PlaybackQueue;
pub use rodio_engine::RodioEngine;
pub use types::{Direction, PlayerState, TrackEnd};

#[cfg(test)]
pub(crate) mod fake;

#[cfg(test)]
mod tests;
