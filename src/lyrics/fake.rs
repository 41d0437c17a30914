//! Canned `LyricsSource` for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{Error, Result};

use super::remote::{LyricsSource, RemoteLyrics};

#[derive(Default)]
pub(crate) struct FakeSource {
    /// Keyed by (artist, title). Unknown keys are `NotFound`.
    pub answers: HashMap<(String, String), RemoteLyrics>,
    /// Titles whose lookup fails like a network error.
    pub failing: Vec<String>,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl FakeSource {
    pub fn with(artist: &str, title: &str, answer: RemoteLyrics) -> Self {
        let mut source = Self::default();
        source
            .answers
            .insert((artist.to_string(), title.to_string()), answer);
        source
    }
}

impl LyricsSource for FakeSource {
    fn fetch(&self, artist: &str, title: &str) -> Result<RemoteLyrics> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((artist.to_string(), title.to_string()));
        }
        if self.failing.iter().any(|t| t == title) {
            return Err(Error::LyricsStatus { status: 503 });
        }
        Ok(self
            .answers
            .get(&(artist.to_string(), title.to_string()))
            .cloned()
            .unwrap_or(RemoteLyrics::NotFound))
    }
}
