use crate::error::Result;
use crate::history::HistoryEntry;
use crate::library::TrackRecord;

use super::{PersistedState, Persistence, push_unique};

/// Keeps everything in memory. Used by tests and when no data directory
/// can be created.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub state: Option<PersistedState>,
    pub history: Vec<HistoryEntry>,
    pub liked: Vec<TrackRecord>,
    pub missing_report: Option<Vec<TrackRecord>>,
}

impl Persistence for MemoryStore {
    fn load_state(&self) -> PersistedState {
        self.state.clone().unwrap_or_default()
    }

    fn save_state(&mut self, state: &PersistedState) -> Result<()> {
        self.state = Some(state.clone());
        Ok(())
    }

    fn load_history(&self) -> Vec<HistoryEntry> {
        self.history.clone()
    }

    fn append_history(&mut self, entry: &HistoryEntry) -> Result<()> {
        self.history.push(entry.clone());
        Ok(())
    }

    fn load_liked(&self) -> Vec<TrackRecord> {
        self.liked.clone()
    }

    fn like(&mut self, record: &TrackRecord) -> Result<bool> {
        Ok(push_unique(&mut self.liked, record))
    }

    fn save_missing_report(&mut self, missing: &[TrackRecord]) -> Result<()> {
        self.missing_report = Some(missing.to_vec());
        Ok(())
    }
}
