//! Track registry and the scanned catalog.
//!
//! Every track the player knows about lives once in the registry, keyed by
//! path. The catalog, the play queue and playlists all hold `TrackId`s into
//! it, so an edit made through one of them is seen by all of them.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::config::{LibrarySettings, TrackDisplayField};
use crate::error::{Error, Result};

use super::display::display_from_fields;
use super::model::{Track, TrackField, TrackId, TrackMetadata, TrackRecord};

pub struct Library {
    tracks: Vec<Track>,
    by_path: HashMap<PathBuf, TrackId>,

    /// Discovery order of the latest scan.
    catalog: Vec<TrackId>,
    in_catalog: HashSet<TrackId>,

    display_fields: Vec<TrackDisplayField>,
    display_separator: String,
}

impl Default for Library {
    fn default() -> Self {
        Self::new(&LibrarySettings::default())
    }
}

impl Library {
    pub fn new(settings: &LibrarySettings) -> Self {
        Self {
            tracks: Vec::new(),
            by_path: HashMap::new(),
            catalog: Vec::new(),
            in_catalog: HashSet::new(),
            display_fields: settings.display_fields.clone(),
            display_separator: settings.display_separator.clone(),
        }
    }

    /// Return the id for `path`, registering a placeholder track if it is new.
    pub fn intern(&mut self, path: &Path) -> TrackId {
        if let Some(&id) = self.by_path.get(path) {
            return id;
        }
        self.insert(path.to_path_buf(), TrackMetadata::placeholder(path))
    }

    /// Return the id for `record.path`, registering it with the record's
    /// metadata if it is new. Known tracks keep their current metadata.
    pub fn intern_record(&mut self, record: &TrackRecord) -> TrackId {
        if let Some(&id) = self.by_path.get(&record.path) {
            return id;
        }
        self.insert(record.path.clone(), record.metadata())
    }

    fn insert(&mut self, path: PathBuf, meta: TrackMetadata) -> TrackId {
        let id = TrackId(self.tracks.len());
        let mut track = Track::new(path.clone(), meta);
        track.display = display_from_fields(&track, &self.display_fields, &self.display_separator);
        self.tracks.push(track);
        self.by_path.insert(path, id);
        id
    }

    /// Replace the catalog with `paths` (discovery order), registering
    /// placeholders for new paths. Duplicates keep their first position.
    pub fn replace_catalog(&mut self, paths: &[PathBuf]) -> &[TrackId] {
        self.catalog.clear();
        self.in_catalog.clear();
        for path in paths {
            let id = self.intern(path);
            if self.in_catalog.insert(id) {
                self.catalog.push(id);
            }
        }
        &self.catalog
    }

    /// Apply a metadata result for `path`.
    ///
    /// Returns `None` without touching anything when `path` is no longer part
    /// of the catalog (the result is stale).
    pub fn apply_metadata(&mut self, path: &Path, meta: TrackMetadata) -> Option<TrackId> {
        let id = *self.by_path.get(path)?;
        if !self.in_catalog.contains(&id) {
            return None;
        }
        self.update(id, |t| t.apply(meta));
        Some(id)
    }

    /// Set one tag field on the track registered for `path`.
    pub fn set_field(&mut self, path: &Path, field: TrackField, value: &str) -> Result<TrackId> {
        let id = self
            .id_of(path)
            .ok_or_else(|| Error::UnknownTrack(path.to_path_buf()))?;
        let value = value.trim().to_string();
        self.update(id, |t| t.set_field(field, value));
        Ok(id)
    }

    fn update(&mut self, id: TrackId, f: impl FnOnce(&mut Track)) {
        let Some(track) = self.tracks.get_mut(id.0) else {
            return;
        };
        f(track);
        track.display = display_from_fields(track, &self.display_fields, &self.display_separator);
    }

    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.tracks.get(id.0)
    }

    pub fn id_of(&self, path: &Path) -> Option<TrackId> {
        self.by_path.get(path).copied()
    }

    pub fn record(&self, id: TrackId) -> Option<TrackRecord> {
        self.get(id).map(Track::record)
    }

    /// Catalog ids in discovery order.
    pub fn catalog(&self) -> &[TrackId] {
        &self.catalog
    }

    pub fn in_catalog(&self, id: TrackId) -> bool {
        self.in_catalog.contains(&id)
    }

    /// Catalog tracks in discovery order.
    pub fn catalog_tracks(&self) -> impl Iterator<Item = (TrackId, &Track)> + '_ {
        self.catalog
            .iter()
            .filter_map(|&id| self.get(id).map(|t| (id, t)))
    }

    pub fn catalog_len(&self) -> usize {
        self.catalog.len()
    }

    /// Total number of registered tracks (catalog plus tracks only known from
    /// saved playlists or the queue).
    pub fn registry_len(&self) -> usize {
        self.tracks.len()
    }
}
