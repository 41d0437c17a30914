//! Named playlists.
//!
//! Playlists hold `TrackId`s, so they see metadata edits like every other
//! container. They are independent of the catalog: a playlist may keep
//! tracks the latest scan no longer found.

use std::collections::BTreeMap;

use crate::library::{Library, TrackField, TrackId};

/// Name of the playlist built from play history.
pub const RECOMMENDED: &str = "Recommended";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playlists {
    lists: BTreeMap<String, Vec<TrackId>>,
}

impl Playlists {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace `name`. Blank names are rejected.
    pub fn set(&mut self, name: &str, tracks: Vec<TrackId>) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.lists.insert(name.to_string(), tracks);
        true
    }

    /// Append `tracks` to `name`, creating it when missing.
    pub fn add_tracks(&mut self, name: &str, tracks: &[TrackId]) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.lists
            .entry(name.to_string())
            .or_default()
            .extend_from_slice(tracks);
        true
    }

    /// Save a snapshot of the queue as `name`. An empty queue saves nothing.
    pub fn save_queue(&mut self, name: &str, queue: &[TrackId]) -> bool {
        if queue.is_empty() {
            return false;
        }
        self.set(name, queue.to_vec())
    }

    /// One playlist per distinct value of `field` over the catalog, named
    /// `"Artist: X"` (or `"Unknown artist"` for empty values). Returns how
    /// many playlists were written.
    pub fn group_by(&mut self, field: TrackField, library: &Library) -> usize {
        let mut groups: BTreeMap<String, Vec<TrackId>> = BTreeMap::new();
        for (id, track) in library.catalog_tracks() {
            let value = track.field(field).trim();
            let name = if value.is_empty() {
                format!("Unknown {field}")
            } else {
                format!("{}: {value}", capitalize(field.as_str()))
            };
            groups.entry(name).or_default().push(id);
        }

        let written = groups.len();
        self.lists.extend(groups);
        written
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.lists.remove(name.trim()).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&[TrackId]> {
        self.lists.get(name.trim()).map(Vec::as_slice)
    }

    /// Playlists in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TrackId])> {
        self.lists.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.lists.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
