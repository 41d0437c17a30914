//! Durable state: application snapshot, play history, liked songs and the
//! missing-lyrics report.
//!
//! The app talks to a `Persistence` service it is handed at startup, so the
//! core runs against `MemoryStore` in tests and `JsonStore` for real.

mod json;
mod memory;
mod state;

use crate::error::Result;
use crate::history::HistoryEntry;
use crate::library::TrackRecord;

pub use json::JsonStore;
pub use memory::MemoryStore;
pub use state::PersistedState;

pub trait Persistence {
    /// Saved snapshot, or defaults when there is none or it is unreadable.
    fn load_state(&self) -> PersistedState;
    fn save_state(&mut self, state: &PersistedState) -> Result<()>;

    /// Full play log, oldest first. Unreadable logs load empty.
    fn load_history(&self) -> Vec<HistoryEntry>;
    /// Fails without writing when the existing log cannot be parsed.
    fn append_history(&mut self, entry: &HistoryEntry) -> Result<()>;

    fn load_liked(&self) -> Vec<TrackRecord>;
    /// Add `record` unless a record with the same path is already liked.
    /// Returns whether it was added.
    fn like(&mut self, record: &TrackRecord) -> Result<bool>;

    fn save_missing_report(&mut self, missing: &[TrackRecord]) -> Result<()>;
}

/// Shared by both stores so they agree on what a duplicate like is.
fn push_unique(liked: &mut Vec<TrackRecord>, record: &TrackRecord) -> bool {
    if liked.iter().any(|r| r.path == record.path) {
        return false;
    }
    liked.push(record.clone());
    true
}

#[cfg(test)]
mod tests;
