//! Background check for catalog tracks that have no lyrics anywhere.

use std::sync::Arc;
use std::sync::mpsc::SyncSender;
use std::thread::{self, JoinHandle};

use tracing::{debug, info};

use crate::library::TrackRecord;

use super::remote::{LyricsSource, RemoteLyrics};
use super::resolver::sidecar_path;

#[derive(Debug, Clone, Default)]
pub struct MissingLyricsReport {
    pub checked: usize,
    pub missing: Vec<TrackRecord>,
}

/// Whether `record` has a sidecar or a remote match. Lookup errors count
/// as missing; without a source only sidecars count.
pub fn has_lyrics(record: &TrackRecord, source: Option<&dyn LyricsSource>) -> bool {
    if sidecar_path(&record.path).exists() {
        return true;
    }
    let Some(source) = source else {
        return false;
    };
    match source.fetch(&record.artist, &record.title) {
        Ok(RemoteLyrics::Synced(_) | RemoteLyrics::Plain(_)) => true,
        Ok(RemoteLyrics::NotFound) => false,
        Err(e) => {
            debug!(path = %record.path.display(), error = %e, "lyrics check failed");
            false
        }
    }
}

/// Check `records` on a worker thread and send one report through `tx`.
pub fn spawn_missing_check<T>(
    records: Vec<TrackRecord>,
    source: Option<Arc<dyn LyricsSource>>,
    tx: SyncSender<T>,
) -> JoinHandle<()>
where
    T: From<MissingLyricsReport> + Send + 'static,
{
    thread::spawn(move || {
        let checked = records.len();
        let missing: Vec<TrackRecord> = records
            .into_iter()
            .filter(|r| !has_lyrics(r, source.as_deref()))
            .collect();
        info!(checked, missing = missing.len(), "lyrics check finished");
        let _ = tx.send(T::from(MissingLyricsReport { checked, missing }));
    })
}
