use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::app::App;
use crate::audio::PlaybackEngine;
use crate::config::Settings;
use crate::lyrics::{LrclibClient, LyricsSource};

/// The remote lyrics source, unless disabled or the client cannot be built.
pub fn lyrics_source(settings: &Settings) -> Option<Arc<dyn LyricsSource>> {
    if !settings.lyrics.online {
        info!("online lyrics disabled");
        return None;
    }
    match LrclibClient::new(&settings.lyrics) {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            warn!(error = %e, "lyrics client unavailable, using sidecar files only");
            None
        }
    }
}

/// Restore saved state, add `extra` folders and scan the library once.
///
/// The restored queue is left idle; nothing plays until asked.
pub fn restore<E: PlaybackEngine>(app: &mut App<E>, extra: impl IntoIterator<Item = PathBuf>) {
    app.restore_state();

    if app.add_folders(extra) == 0 {
        app.rescan();
    }
}
