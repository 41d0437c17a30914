use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::library::TrackRecord;

/// Snapshot written at shutdown and restored at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub folders: Vec<PathBuf>,
    pub playlists: BTreeMap<String, Vec<TrackRecord>>,
    pub queue: Vec<TrackRecord>,
    /// May be negative in files written before anything was played.
    pub play_index: i64,
}

impl PersistedState {
    /// `play_index` clamped into the saved queue, `None` for an empty queue.
    pub fn queue_index(&self) -> Option<usize> {
        if self.queue.is_empty() {
            return None;
        }
        let max = self.queue.len() - 1;
        Some(usize::try_from(self.play_index).unwrap_or(0).min(max))
    }
}
