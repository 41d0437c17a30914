use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Handle to a track in the library registry.
///
/// Ids are only meaningful for the `Library` that issued them. The registry
/// never removes tracks, so an id stays valid for the lifetime of the library.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId(pub(crate) usize);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Tag values extracted from one audio file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackMetadata {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
    /// Seconds; 0 when unknown.
    pub duration: f64,
}

impl TrackMetadata {
    /// Placeholder values for `path`: title from the file stem, everything else empty.
    pub fn placeholder(path: &Path) -> Self {
        Self {
            title: file_stem_title(path),
            ..Self::default()
        }
    }
}

pub(crate) fn file_stem_title(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub path: PathBuf,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
    pub duration: f64,
    pub display: String,
}

impl Track {
    pub(crate) fn new(path: PathBuf, meta: TrackMetadata) -> Self {
        let mut track = Self {
            path,
            title: String::new(),
            artist: String::new(),
            album: String::new(),
            genre: String::new(),
            duration: 0.0,
            display: String::new(),
        };
        track.apply(meta);
        track
    }

    /// Overwrite tag fields with `meta`. The caller refreshes `display`.
    pub(crate) fn apply(&mut self, meta: TrackMetadata) {
        self.title = meta.title;
        self.artist = meta.artist;
        self.album = meta.album;
        self.genre = meta.genre;
        self.duration = meta.duration;
    }

    pub fn field(&self, field: TrackField) -> &str {
        match field {
            TrackField::Title => &self.title,
            TrackField::Artist => &self.artist,
            TrackField::Album => &self.album,
            TrackField::Genre => &self.genre,
        }
    }

    pub(crate) fn set_field(&mut self, field: TrackField, value: String) {
        match field {
            TrackField::Title => self.title = value,
            TrackField::Artist => self.artist = value,
            TrackField::Album => self.album = value,
            TrackField::Genre => self.genre = value,
        }
    }

    pub fn record(&self) -> TrackRecord {
        TrackRecord {
            path: self.path.clone(),
            title: self.title.clone(),
            artist: self.artist.clone(),
            album: self.album.clone(),
            genre: self.genre.clone(),
            duration: self.duration,
        }
    }
}

/// The user-editable tag fields of a track.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TrackField {
    Title,
    Artist,
    Album,
    Genre,
}

impl TrackField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Artist => "artist",
            Self::Album => "album",
            Self::Genre => "genre",
        }
    }
}

impl fmt::Display for TrackField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "artist" => Ok(Self::Artist),
            "album" => Ok(Self::Album),
            "genre" => Ok(Self::Genre),
            other => Err(format!("unknown track field: {other}")),
        }
    }
}

/// Serialized form of a track, as stored in state, playlist and liked-songs files.
///
/// Missing fields load as empty values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub path: PathBuf,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub duration: f64,
}

impl TrackRecord {
    pub(crate) fn metadata(&self) -> TrackMetadata {
        TrackMetadata {
            title: self.title.clone(),
            artist: self.artist.clone(),
            album: self.album.clone(),
            genre: self.genre.clone(),
            duration: self.duration,
        }
    }
}
