use crate::library::{Library, TrackId};

/// Fuzzy/subsequence match: return the character positions in `text`
/// that match `query`, or `None` if not matched. Case-insensitive.
pub fn fuzzy_match_positions(text: &str, query: &str) -> Option<Vec<usize>> {
    if query.is_empty() {
        return Some(Vec::new());
    }

    let mut positions: Vec<usize> = Vec::new();
    let mut text_iter = text.chars().enumerate();

    for qc in query.chars() {
        let qc_low = qc.to_lowercase().next().unwrap_or(qc);
        loop {
            match text_iter.next() {
                Some((ti, tc)) if tc.to_lowercase().next().unwrap_or(tc) == qc_low => {
                    positions.push(ti);
                    break;
                }
                Some(_) => continue,
                None => return None,
            }
        }
    }

    Some(positions)
}

/// Catalog tracks whose display string fuzzy-matches `query`, in catalog
/// order. Spaces in the query are ignored.
pub fn filter_catalog(library: &Library, query: &str) -> Vec<TrackId> {
    let query: String = query.chars().filter(|c| !c.is_whitespace()).collect();
    library
        .catalog_tracks()
        .filter(|(_, t)| fuzzy_match_positions(&t.display, &query).is_some())
        .map(|(id, _)| id)
        .collect()
}
