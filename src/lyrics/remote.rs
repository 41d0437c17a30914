use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use crate::config::LyricsSettings;
use crate::error::{Error, Result};

use super::lrc::LyricsDocument;

/// Result of a remote lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteLyrics {
    Synced(LyricsDocument),
    Plain(String),
    NotFound,
}

/// A remote lyrics lookup keyed by (artist, title).
///
/// Called from worker threads, never from the control loop.
pub trait LyricsSource: Send + Sync {
    fn fetch(&self, artist: &str, title: &str) -> Result<RemoteLyrics>;
}

/// Response from LRCLIB's `get` endpoint. Unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
struct LrclibResponse {
    #[serde(rename = "syncedLyrics")]
    synced_lyrics: Option<String>,
    lrc: Option<String>,
    #[serde(rename = "plainLyrics")]
    plain_lyrics: Option<String>,
    #[serde(default)]
    instrumental: bool,
}

/// Interpret a lookup response body.
///
/// Synced text wins when it contains at least one timed line; plain text is
/// the fallback. An empty body counts as "nothing found".
pub fn parse_response(body: &str) -> Result<RemoteLyrics> {
    let body = body.trim();
    let response: LrclibResponse = if body.is_empty() {
        LrclibResponse::default()
    } else {
        serde_json::from_str(body)?
    };

    let synced = response
        .synced_lyrics
        .filter(|s| !s.trim().is_empty())
        .or(response.lrc.filter(|s| !s.trim().is_empty()));
    if let Some(text) = synced {
        let doc = LyricsDocument::parse(&text);
        if !doc.is_empty() {
            return Ok(RemoteLyrics::Synced(doc));
        }
    }

    if let Some(plain) = response.plain_lyrics.filter(|s| !s.trim().is_empty()) {
        return Ok(RemoteLyrics::Plain(plain));
    }

    if response.instrumental {
        debug!("track is marked instrumental");
    }
    Ok(RemoteLyrics::NotFound)
}

/// Blocking LRCLIB client.
pub struct LrclibClient {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl LrclibClient {
    pub fn new(settings: &LyricsSettings) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(concat!("cadenza/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
        })
    }
}

impl LyricsSource for LrclibClient {
    fn fetch(&self, artist: &str, title: &str) -> Result<RemoteLyrics> {
        debug!(artist, title, endpoint = %self.endpoint, "remote lyrics lookup");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("artist_name", artist), ("track_name", title)])
            .send()?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(RemoteLyrics::NotFound);
        }
        if !status.is_success() {
            return Err(Error::LyricsStatus {
                status: status.as_u16(),
            });
        }

        parse_response(&response.text()?)
    }
}
