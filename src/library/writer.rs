//! Background tag writer.
//!
//! One long-lived thread drains a channel of edits, so writes reach the
//! disk in the order they were made and two edits never rewrite the same
//! file at once.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::error::Result;

use super::metadata::write_field;
use super::model::TrackField;

struct TagEdit {
    path: PathBuf,
    field: TrackField,
    value: String,
}

/// Owner of the writer thread. Dropping it waits for queued edits to land.
pub struct TagWriter {
    tx: Option<Sender<TagEdit>>,
    handle: Option<JoinHandle<()>>,
}

impl TagWriter {
    /// Writer that rewrites the files' tags with lofty.
    pub fn spawn() -> Self {
        Self::spawn_with(write_field)
    }

    /// Writer that hands every edit to `write`, one at a time.
    pub fn spawn_with<F>(mut write: F) -> Self
    where
        F: FnMut(&Path, TrackField, &str) -> Result<()> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<TagEdit>();
        let handle = thread::spawn(move || {
            for edit in rx {
                if let Err(e) = write(&edit.path, edit.field, &edit.value) {
                    warn!(path = %edit.path.display(), field = %edit.field, error = %e, "failed to write tag");
                }
            }
            debug!("tag writer stopped");
        });
        Self {
            tx: Some(tx),
            handle: Some(handle),
        }
    }

    /// Queue `value` for `field` of the file at `path`.
    pub fn submit(&self, path: PathBuf, field: TrackField, value: &str) {
        let edit = TagEdit {
            path,
            field,
            value: value.trim().to_string(),
        };
        let Some(tx) = &self.tx else {
            return;
        };
        if let Err(mpsc::SendError(edit)) = tx.send(edit) {
            warn!(path = %edit.path.display(), field = %edit.field, "tag writer is gone, edit not saved");
        }
    }
}

impl Drop for TagWriter {
    fn drop(&mut self) {
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("tag writer panicked");
            }
        }
    }
}
