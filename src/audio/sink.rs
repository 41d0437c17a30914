//! Utilities for creating `rodio` sinks from audio files.
//!
//! The helper here encapsulates opening/decoding a file and preparing a
//! paused `Sink` at the requested start position.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::error::{Error, Result};

/// Create a paused `Sink` for `path` that starts playback at `start_at`.
///
/// Also returns the decoder's total duration when it can tell.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    path: &Path,
    start_at: Duration,
) -> Result<(Sink, Option<Duration>)> {
    let engine_err = |reason: String| Error::Engine {
        path: path.to_path_buf(),
        reason,
    };

    let file = File::open(path).map_err(|e| engine_err(e.to_string()))?;
    let decoder = Decoder::new(BufReader::new(file)).map_err(|e| engine_err(e.to_string()))?;
    let length = decoder.total_duration();

    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    let source = decoder.skip_duration(start_at);

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok((sink, length))
}
