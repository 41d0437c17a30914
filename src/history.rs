//! Play history and the artist-frequency recommender.

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::library::{Library, Track, TrackId};

/// How many of the most-played artists feed the recommendations.
const TOP_ARTISTS: usize = 3;

/// One track start. Serialized with `time` as an ISO-8601 local timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub path: PathBuf,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    pub time: NaiveDateTime,
}

impl HistoryEntry {
    pub fn now(track: &Track) -> Self {
        Self {
            path: track.path.clone(),
            title: track.title.clone(),
            artist: track.artist.clone(),
            time: Local::now().naive_local(),
        }
    }
}

/// The most played artists, most frequent first; ties keep first-seen order.
pub fn top_artists(history: &[HistoryEntry], n: usize) -> Vec<String> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for entry in history {
        let artist = entry.artist.trim();
        if artist.is_empty() {
            continue;
        }
        let count = counts.entry(artist).or_insert(0);
        if *count == 0 {
            order.push(artist);
        }
        *count += 1;
    }

    // Stable sort keeps first-seen order among equal counts.
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order.into_iter().take(n).map(str::to_string).collect()
}

/// Catalog tracks by the three most played artists, in catalog order.
pub fn recommend(history: &[HistoryEntry], library: &Library) -> Vec<TrackId> {
    let top = top_artists(history, TOP_ARTISTS);
    if top.is_empty() {
        return Vec::new();
    }
    library
        .catalog_tracks()
        .filter(|(_, t)| top.iter().any(|a| a == t.artist.trim()))
        .map(|(id, _)| id)
        .collect()
}
