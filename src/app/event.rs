use crate::library::ScanEvent;
use crate::lyrics::{LyricsReady, MissingLyricsReport};

use super::command::Command;

/// Everything that reaches the control loop through the hand-off channel.
#[derive(Debug)]
pub enum AppEvent {
    Scan(ScanEvent),
    Lyrics(LyricsReady),
    LyricsReport(MissingLyricsReport),
    Command(Command),
    Shutdown,
}

impl From<ScanEvent> for AppEvent {
    fn from(e: ScanEvent) -> Self {
        Self::Scan(e)
    }
}

impl From<LyricsReady> for AppEvent {
    fn from(e: LyricsReady) -> Self {
        Self::Lyrics(e)
    }
}

impl From<MissingLyricsReport> for AppEvent {
    fn from(e: MissingLyricsReport) -> Self {
        Self::LyricsReport(e)
    }
}

impl From<Command> for AppEvent {
    fn from(c: Command) -> Self {
        Self::Command(c)
    }
}
