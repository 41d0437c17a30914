//! Tag reading and writing.
//!
//! `extract` never fails: unreadable files yield placeholder metadata. It
//! touches no shared state and is called from scan workers.

use std::path::Path;

use lofty::config::WriteOptions;
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::{Accessor, Tag};
use tracing::debug;

use crate::error::{Error, Result};

use super::model::{TrackField, TrackMetadata};

/// Decorations that video rips commonly carry in their title tag.
const DECORATIONS: [&str; 3] = ["(Lyrics)", "(Official Video)", "(Animated Video)"];

/// Strip known decorations from a raw title tag.
pub fn normalize_title(raw: &str) -> String {
    let mut title = raw.to_string();
    for d in DECORATIONS {
        title = title.replace(d, "");
    }
    title.trim().to_string()
}

fn non_empty(value: Option<std::borrow::Cow<'_, str>>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read title/artist/album/genre/duration from `path`.
pub fn extract(path: &Path) -> TrackMetadata {
    let mut meta = TrackMetadata::placeholder(path);

    let tagged = match lofty::read_from_path(path) {
        Ok(tagged) => tagged,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "unreadable tags, keeping placeholder");
            return meta;
        }
    };

    meta.duration = tagged.properties().duration().as_secs_f64();

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        if let Some(title) = non_empty(tag.title()).map(|t| normalize_title(&t)) {
            if !title.is_empty() {
                meta.title = title;
            }
        }
        if let Some(artist) = non_empty(tag.artist()) {
            meta.artist = artist;
        }
        if let Some(album) = non_empty(tag.album()) {
            meta.album = album;
        }
        if let Some(genre) = non_empty(tag.genre()) {
            meta.genre = genre;
        }
    }

    meta
}

/// Write one field into the file's primary tag, creating the tag if the
/// file has none.
pub fn write_field(path: &Path, field: TrackField, value: &str) -> Result<()> {
    let mut tagged = lofty::read_from_path(path)?;

    if tagged.primary_tag().is_none() {
        let tag_type = tagged.primary_tag_type();
        tagged.insert_tag(Tag::new(tag_type));
    }
    let tag = tagged
        .primary_tag_mut()
        .ok_or_else(|| Error::UnknownTrack(path.to_path_buf()))?;

    let value = value.trim().to_string();
    match field {
        TrackField::Title => tag.set_title(value),
        TrackField::Artist => tag.set_artist(value),
        TrackField::Album => tag.set_album(value),
        TrackField::Genre => tag.set_genre(value),
    }

    tagged.save_to_path(path, WriteOptions::default())?;
    debug!(path = %path.display(), %field, "tag written");
    Ok(())
}
