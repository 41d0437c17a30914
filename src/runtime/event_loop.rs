use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::app::{App, AppEvent};
use crate::audio::PlaybackEngine;

use super::commands::{self, Flow};

/// Drain events until shutdown, ticking the app every `tick`.
///
/// The tick runs on a deadline rather than on receive timeouts, so a steady
/// stream of scan results cannot hold back end-of-track handling.
pub fn run<E: PlaybackEngine>(app: &mut App<E>, rx: &Receiver<AppEvent>, tick: Duration) {
    let mut last_tick = Instant::now();
    loop {
        let wait = tick.saturating_sub(last_tick.elapsed());
        match rx.recv_timeout(wait) {
            Ok(AppEvent::Shutdown) => break,
            Ok(AppEvent::Command(cmd)) => {
                if commands::execute(app, cmd) == Flow::Quit {
                    break;
                }
            }
            Ok(AppEvent::Scan(event)) => app.apply_scan(event),
            Ok(AppEvent::Lyrics(ready)) => app.apply_lyrics(ready),
            Ok(AppEvent::LyricsReport(report)) => app.apply_lyrics_report(report),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        if last_tick.elapsed() >= tick {
            app.tick();
            last_tick = Instant::now();
        }
    }
    debug!("event loop finished");
}
