use crate::config::TrackDisplayField;

use super::model::Track;

/// Build a display string for a track according to the provided `fields` and separator.
///
/// This composes metadata fields (artist, title, album, genre, filename, path) in the
/// configured order and falls back to `title` when no parts were produced.
pub fn display_from_fields(track: &Track, fields: &[TrackDisplayField], sep: &str) -> String {
    let mut parts: Vec<String> = Vec::new();

    let mut push_trimmed = |value: &str| {
        let value = value.trim();
        if !value.is_empty() {
            parts.push(value.to_string());
        }
    };

    for f in fields {
        match f {
            TrackDisplayField::Title => push_trimmed(&track.title),
            TrackDisplayField::Artist => push_trimmed(&track.artist),
            TrackDisplayField::Album => push_trimmed(&track.album),
            TrackDisplayField::Genre => push_trimmed(&track.genre),
            TrackDisplayField::Filename => {
                if let Some(stem) = track.path.file_stem().and_then(|s| s.to_str()) {
                    push_trimmed(stem);
                }
            }
            TrackDisplayField::Path => push_trimmed(&track.path.display().to_string()),
        }
    }

    if parts.is_empty() {
        track.title.clone()
    } else {
        parts.join(sep)
    }
}

/// Format seconds as `m:ss`.
pub fn format_duration(secs: f64) -> String {
    if !secs.is_finite() || secs <= 0.0 {
        return "0:00".to_string();
    }
    let total = secs as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
