use std::env;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc::{self, SyncSender};
use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use crate::app::{App, AppEvent, Command, HELP, LogSink};
use crate::audio::RodioEngine;
use crate::error::Result;
use crate::lyrics::LyricsResolver;
use crate::store::JsonStore;

mod commands;
mod event_loop;
mod settings;
mod startup;

/// Headless entry point: folders given as arguments are added to the
/// library, commands are read line by line from stdin.
pub fn run() -> Result<()> {
    let settings = settings::load_settings();
    let (tx, rx) = mpsc::sync_channel(settings.runtime.channel_capacity);

    let engine = RodioEngine::open()?;
    let store = JsonStore::new(settings.data_dir());
    info!(dir = %store.dir().display(), "data directory");
    let resolver = LyricsResolver::new(startup::lyrics_source(&settings));

    let mut app = App::new(
        &settings,
        engine,
        Box::new(store),
        resolver,
        Box::new(LogSink),
        tx.clone(),
    );

    let folders = env::args().skip(1).map(PathBuf::from);
    startup::restore(&mut app, folders);
    spawn_command_reader(tx);
    println!("{HELP}");

    let tick = Duration::from_millis(settings.playback.poll_interval_ms.max(1));
    event_loop::run(&mut app, &rx, tick);

    app.stop();
    app.save_state()
}

/// Parse stdin lines into commands. End of input shuts the app down.
fn spawn_command_reader(tx: SyncSender<AppEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Command>() {
                Ok(cmd) => {
                    if tx.send(AppEvent::Command(cmd)).is_err() {
                        return;
                    }
                }
                Err(e) => eprintln!("{e} (try `help`)"),
            }
        }
        debug!("stdin closed");
        let _ = tx.send(AppEvent::Shutdown);
    });
}
