use super::lrc::LyricsDocument;

/// Remembers the highlighted line so the poll tick only reports changes.
#[derive(Debug, Default)]
pub struct LineTracker {
    current: Option<usize>,
}

impl LineTracker {
    /// Recompute the active line for `position`. Returns true when it moved.
    pub fn update(&mut self, doc: &LyricsDocument, position: f64) -> bool {
        let next = doc.active_index(position);
        if next == self.current {
            return false;
        }
        self.current = next;
        true
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn reset(&mut self) {
        self.current = None;
    }
}
