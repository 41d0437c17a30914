use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::Result;
use crate::history::HistoryEntry;
use crate::library::TrackRecord;

use super::{PersistedState, Persistence, push_unique};

const STATE_FILE: &str = "state.json";
const HISTORY_FILE: &str = "history.json";
const LIKED_FILE: &str = "liked_songs.json";
const MISSING_LYRICS_FILE: &str = "lyrics_missing.json";

/// Pretty-printed JSON files in one data directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn missing_report_path(&self) -> PathBuf {
        self.dir.join(MISSING_LYRICS_FILE)
    }

    /// Contents of `file`, or the default when it does not exist yet.
    fn try_read<T: DeserializeOwned + Default>(&self, file: &str) -> Result<T> {
        let path = self.dir.join(file);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(T::default()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&text)?)
    }

    fn read<T: DeserializeOwned + Default>(&self, file: &str) -> T {
        self.try_read(file).unwrap_or_else(|e| {
            let path = self.dir.join(file);
            warn!(path = %path.display(), error = %e, "unreadable data file, using defaults");
            T::default()
        })
    }

    fn write<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file);
        let tmp = path.with_extension("json.tmp");

        // Readers never see a partially written file.
        fs::write(&tmp, serde_json::to_vec_pretty(value)?)?;
        fs::rename(&tmp, &path)?;
        debug!(path = %path.display(), "data file written");
        Ok(())
    }
}

impl Persistence for JsonStore {
    fn load_state(&self) -> PersistedState {
        self.read(STATE_FILE)
    }

    fn save_state(&mut self, state: &PersistedState) -> Result<()> {
        self.write(STATE_FILE, state)
    }

    fn load_history(&self) -> Vec<HistoryEntry> {
        self.read(HISTORY_FILE)
    }

    fn append_history(&mut self, entry: &HistoryEntry) -> Result<()> {
        // A damaged log is left untouched rather than replaced by one entry.
        let mut history: Vec<HistoryEntry> = self.try_read(HISTORY_FILE)?;
        history.push(entry.clone());
        self.write(HISTORY_FILE, &history)
    }

    fn load_liked(&self) -> Vec<TrackRecord> {
        self.read(LIKED_FILE)
    }

    fn like(&mut self, record: &TrackRecord) -> Result<bool> {
        let mut liked: Vec<TrackRecord> = self.try_read(LIKED_FILE)?;
        if !push_unique(&mut liked, record) {
            return Ok(false);
        }
        self.write(LIKED_FILE, &liked)?;
        Ok(true)
    }

    fn save_missing_report(&mut self, missing: &[TrackRecord]) -> Result<()> {
        self.write(MISSING_LYRICS_FILE, missing)
    }
}
