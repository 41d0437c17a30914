//! The play queue: what plays now and what plays next.
//!
//! The queue holds `TrackId`s into the library registry plus a current
//! index. The index is `None` exactly when the queue is empty; every
//! operation keeps it in bounds otherwise.

use crate::library::TrackId;

use super::types::Direction;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackQueue {
    items: Vec<TrackId>,
    index: Option<usize>,
}

impl PlaybackQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the queue wholesale. `start` is clamped into bounds.
    pub fn set_from_track_list(&mut self, tracks: Vec<TrackId>, start: usize) {
        self.index = clamp_index(start, tracks.len());
        self.items = tracks;
    }

    /// Queue `track` followed by the rest of `catalog` after it, wrapping
    /// around to the tracks before it. A track outside the catalog plays
    /// on its own.
    pub fn play_track(&mut self, track: TrackId, catalog: &[TrackId]) {
        let items = match catalog.iter().position(|&id| id == track) {
            Some(k) => {
                let mut rotated = Vec::with_capacity(catalog.len());
                rotated.extend_from_slice(&catalog[k..]);
                rotated.extend_from_slice(&catalog[..k]);
                rotated
            }
            None => vec![track],
        };
        self.set_from_track_list(items, 0);
    }

    /// Move one step in `direction`. Returns false when already at the end
    /// in that direction (or empty); there is no wraparound.
    pub fn advance(&mut self, direction: Direction) -> bool {
        let Some(i) = self.index else {
            return false;
        };
        let next = match direction {
            Direction::Forward if i + 1 < self.items.len() => i + 1,
            Direction::Backward if i > 0 => i - 1,
            _ => return false,
        };
        self.index = Some(next);
        true
    }

    /// Adopt a manually reordered list of the queue's tracks.
    ///
    /// The index follows the now-playing track when it is still present,
    /// otherwise the old index is clamped to the new length. An empty list
    /// leaves the queue untouched.
    pub fn rebuild_from_external_order(&mut self, order: Vec<TrackId>) {
        if order.is_empty() {
            return;
        }
        let playing = self.current();
        let followed = playing.and_then(|id| order.iter().position(|&x| x == id));
        let index = followed.or_else(|| clamp_index(self.index.unwrap_or(0), order.len()));

        self.items = order;
        self.index = index;
    }

    /// Make the entry at `index` current. Out-of-range indices are ignored.
    pub fn jump_to(&mut self, index: usize) -> Option<TrackId> {
        let id = *self.items.get(index)?;
        self.index = Some(index);
        Some(id)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.index = None;
    }

    pub fn current(&self) -> Option<TrackId> {
        self.index.and_then(|i| self.items.get(i).copied())
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.index.is_some_and(|i| i + 1 < self.items.len())
    }

    pub fn tracks(&self) -> &[TrackId] {
        &self.items
    }

    pub fn position_of(&self, id: TrackId) -> Option<usize> {
        self.items.iter().position(|&x| x == id)
    }
}

fn clamp_index(index: usize, len: usize) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some(index.min(len - 1))
    }
}
