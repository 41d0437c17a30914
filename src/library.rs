//! Music library: track model, the shared registry/catalog, tag reading and
//! folder scanning, and the background tag writer.
//!
//! Scanning happens in two phases. `discover` walks the folders and returns
//! paths, which the caller turns into placeholder catalog entries right
//! away. `spawn_enrichment` then reads tags on a worker thread and sends the
//! results back to the owner of the `Library`.

mod catalog;
mod display;
mod metadata;
mod model;
mod scan;
mod writer;

pub use catalog::Library;
pub use display::{display_from_fields, format_duration};
pub use metadata::{extract, normalize_title, write_field};
pub use model::{Track, TrackField, TrackId, TrackMetadata, TrackRecord};
pub use scan::{ScanEvent, discover, spawn_enrichment};
pub use writer::TagWriter;
