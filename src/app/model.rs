//! The control context: owns the library, queue, controller, playlists and
//! lyrics state, and applies every mutation to them.
//!
//! Workers never see any of this. They get immutable input (paths, an
//! artist/title pair) and send their results back as `AppEvent`s, which the
//! runtime feeds into `apply_scan`, `apply_lyrics` and friends.

use std::path::{Path, PathBuf};
use std::sync::mpsc::SyncSender;

use tracing::{debug, info, warn};

use crate::audio::{
    Direction, PlaybackController, PlaybackEngine, PlaybackQueue, PlayerState, TrackEnd,
};
use crate::config::{LibrarySettings, Settings};
use crate::error::{Error, Result};
use crate::history::{HistoryEntry, recommend};
use crate::library::{
    Library, ScanEvent, TagWriter, Track, TrackField, TrackId, TrackRecord, discover,
    spawn_enrichment,
};
use crate::lyrics::{
    LineTracker, LyricsReady, LyricsResolver, LyricsView, MissingLyricsReport, spawn_missing_check,
};
use crate::playlist::{Playlists, RECOMMENDED};
use crate::store::{PersistedState, Persistence};

use super::event::AppEvent;
use super::filter::filter_catalog;
use super::notify::{Notification, NotificationSink};

pub struct App<E> {
    library: Library,
    library_settings: LibrarySettings,
    folders: Vec<PathBuf>,
    scan_generation: u64,

    queue: PlaybackQueue,
    controller: PlaybackController<E>,
    playlists: Playlists,

    resolver: LyricsResolver,
    lyrics: LyricsView,
    /// Track the current `lyrics` belong to. Results for any other path are stale.
    lyrics_for: Option<PathBuf>,
    tracker: LineTracker,

    store: Box<dyn Persistence>,
    sink: Box<dyn NotificationSink>,
    tx: SyncSender<AppEvent>,
    writer: TagWriter,
}

impl<E: PlaybackEngine> App<E> {
    /// `tx` is the sending half of the channel the runtime drains into this app.
    pub fn new(
        settings: &Settings,
        engine: E,
        store: Box<dyn Persistence>,
        resolver: LyricsResolver,
        sink: Box<dyn NotificationSink>,
        tx: SyncSender<AppEvent>,
    ) -> Self {
        Self {
            library: Library::new(&settings.library),
            library_settings: settings.library.clone(),
            folders: settings.library.folders.clone(),
            scan_generation: 0,
            queue: PlaybackQueue::new(),
            controller: PlaybackController::new(engine, &settings.playback),
            playlists: Playlists::new(),
            resolver,
            lyrics: LyricsView::NotFound,
            lyrics_for: None,
            tracker: LineTracker::default(),
            store,
            sink,
            tx,
            writer: TagWriter::spawn(),
        }
    }

    fn notify(&mut self, notification: Notification) {
        self.sink.notify(notification);
    }

    /// Report a failed user action.
    pub fn report_error(&mut self, error: &Error) {
        self.notify(Notification::Error(error.to_string()));
    }

    fn notify_state(&mut self) {
        let state = self.controller.state();
        self.notify(Notification::PlaybackStateChanged(state));
    }

    fn notify_queue(&mut self) {
        let (len, index) = (self.queue.len(), self.queue.index());
        self.notify(Notification::QueueChanged { len, index });
    }

    // Persisted state

    /// Restore folders, playlists and the queue from the store.
    ///
    /// Saved folders win over configured ones. Nothing is scanned or played.
    pub fn restore_state(&mut self) {
        let state = self.store.load_state();
        if !state.folders.is_empty() {
            self.folders = state.folders.clone();
        }

        for (name, records) in &state.playlists {
            let ids = records.iter().map(|r| self.library.intern_record(r)).collect();
            self.playlists.set(name, ids);
        }

        if let Some(index) = state.queue_index() {
            let ids = state.queue.iter().map(|r| self.library.intern_record(r)).collect();
            self.queue.set_from_track_list(ids, index);
        }

        info!(
            folders = self.folders.len(),
            playlists = self.playlists.len(),
            queue = self.queue.len(),
            "state restored"
        );
        if !self.playlists.is_empty() {
            self.notify(Notification::PlaylistsChanged);
        }
        self.notify_queue();
    }

    pub fn snapshot(&self) -> PersistedState {
        let records = |ids: &[TrackId]| -> Vec<TrackRecord> {
            ids.iter().filter_map(|&id| self.library.record(id)).collect()
        };
        PersistedState {
            folders: self.folders.clone(),
            playlists: self
                .playlists
                .iter()
                .map(|(name, ids)| (name.to_string(), records(ids)))
                .collect(),
            queue: records(self.queue.tracks()),
            play_index: self.queue.index().unwrap_or(0) as i64,
        }
    }

    pub fn save_state(&mut self) -> Result<()> {
        let state = self.snapshot();
        self.store.save_state(&state)?;
        info!(queue = state.queue.len(), playlists = state.playlists.len(), "state saved");
        Ok(())
    }

    // Library

    /// Add `folder` and rescan. Returns false when it was already known.
    pub fn add_folder(&mut self, folder: PathBuf) -> bool {
        self.add_folders([folder]) == 1
    }

    /// Add every folder not already known, then rescan once if any were
    /// new. Returns how many were added.
    pub fn add_folders(&mut self, folders: impl IntoIterator<Item = PathBuf>) -> usize {
        let mut added = 0;
        for folder in folders {
            if self.contains_folder(&folder) {
                continue;
            }
            self.folders.push(folder);
            added += 1;
        }
        if added > 0 {
            self.rescan();
        }
        added
    }

    /// Replace the catalog with placeholders for every file under the
    /// folders, then enrich them in the background.
    pub fn rescan(&mut self) -> usize {
        self.scan_generation += 1;
        let generation = self.scan_generation;

        let paths = discover(&self.folders, &self.library_settings);
        let len = self.library.replace_catalog(&paths).len();
        self.notify(Notification::CatalogReplaced { len });

        if !paths.is_empty() {
            spawn_enrichment(paths, generation, self.tx.clone());
        }
        len
    }

    pub fn apply_scan(&mut self, event: ScanEvent) {
        match event {
            ScanEvent::Metadata {
                generation,
                path,
                metadata,
            } => {
                let Some(id) = self.library.apply_metadata(&path, metadata) else {
                    debug!(generation, path = %path.display(), "dropping metadata for removed track");
                    return;
                };
                self.row_changed(id);
            }
            ScanEvent::Finished { generation, total } => {
                info!(generation, total, "metadata scan finished");
            }
        }
    }

    fn row_changed(&mut self, id: TrackId) {
        let Some(track) = self.library.get(id) else {
            return;
        };
        let (path, display) = (track.path.clone(), track.display.clone());
        if self.is_now_playing(id) {
            self.notify(Notification::NowPlayingChanged {
                path: path.clone(),
                display: display.clone(),
            });
        }
        self.notify(Notification::RowUpdated { path, display });
    }

    /// Catalog tracks matching `query`, in catalog order.
    pub fn filter(&self, query: &str) -> Vec<TrackId> {
        filter_catalog(&self.library, query)
    }

    /// Edit one tag field. The change is visible through every container
    /// at once; the file's tag is rewritten in the background.
    pub fn edit_field(&mut self, id: TrackId, field: TrackField, value: &str) -> Result<()> {
        let path = self
            .library
            .get(id)
            .map(|t| t.path.clone())
            .ok_or(Error::UnknownTrackId(id))?;
        self.library.set_field(&path, field, value)?;
        self.row_changed(id);

        self.writer.submit(path, field, value);
        Ok(())
    }

    // Playback

    fn is_now_playing(&self, id: TrackId) -> bool {
        self.controller.state() != PlayerState::Idle && self.queue.current() == Some(id)
    }

    /// The queue entry that is loaded in the controller, if any.
    pub fn now_playing(&self) -> Option<(TrackId, &Track)> {
        let id = self.queue.current()?;
        if !self.is_now_playing(id) {
            return None;
        }
        self.library.get(id).map(|t| (id, t))
    }

    /// Load and play the current queue entry.
    fn start_current(&mut self) -> bool {
        let Some(id) = self.queue.current() else {
            return false;
        };
        let Some(track) = self.library.get(id) else {
            return false;
        };
        let (path, duration, display) = (track.path.clone(), track.duration, track.display.clone());

        if let Err(e) = self.controller.load(&path, duration) {
            self.report_error(&e);
            self.notify_state();
            self.set_lyrics(None, LyricsView::NotFound);
            return false;
        }
        self.controller.play();
        self.record_play(id);

        self.notify(Notification::NowPlayingChanged { path, display });
        self.notify_state();
        self.notify_queue();
        self.load_lyrics(id);
        true
    }

    fn record_play(&mut self, id: TrackId) {
        let Some(track) = self.library.get(id) else {
            return;
        };
        let entry = HistoryEntry::now(track);
        if let Err(e) = self.store.append_history(&entry) {
            warn!(error = %e, "failed to append play history");
        }
    }

    /// Play `id` followed by the rest of the catalog, wrapping around.
    pub fn activate_track(&mut self, id: TrackId) -> bool {
        self.queue.play_track(id, self.library.catalog());
        self.start_current()
    }

    /// Activate the catalog row at `row`.
    pub fn activate_row(&mut self, row: usize) -> bool {
        match self.library.catalog().get(row).copied() {
            Some(id) => self.activate_track(id),
            None => false,
        }
    }

    /// Replace the queue with a playlist and start it from the top.
    pub fn play_playlist(&mut self, name: &str) -> bool {
        let Some(tracks) = self.playlists.get(name).map(<[TrackId]>::to_vec) else {
            return false;
        };
        if tracks.is_empty() {
            return false;
        }
        self.queue.set_from_track_list(tracks, 0);
        self.start_current()
    }

    /// Play the queue entry at `index`.
    pub fn activate_queue_row(&mut self, index: usize) -> bool {
        if self.queue.jump_to(index).is_none() {
            return false;
        }
        self.start_current()
    }

    /// Resume, or start the current queue entry when nothing is loaded.
    pub fn play(&mut self) -> bool {
        match self.controller.state() {
            PlayerState::Idle => self.start_current(),
            PlayerState::Paused => {
                self.controller.play();
                self.notify_state();
                true
            }
            PlayerState::Playing => false,
        }
    }

    pub fn pause(&mut self) -> bool {
        let changed = self.controller.pause();
        if changed {
            self.notify_state();
        }
        changed
    }

    pub fn toggle(&mut self) -> bool {
        match self.controller.state() {
            PlayerState::Playing => self.pause(),
            _ => self.play(),
        }
    }

    pub fn stop(&mut self) {
        self.controller.stop();
        self.notify_state();
    }

    /// Step forward. At the end of the queue this does nothing.
    pub fn next(&mut self) -> bool {
        if !self.queue.advance(Direction::Forward) {
            return false;
        }
        self.start_current()
    }

    /// Restart the track when it has played past the restart threshold,
    /// otherwise step back (the first entry restarts from its beginning).
    pub fn previous(&mut self) -> bool {
        if self.queue.is_empty() {
            return false;
        }
        if self.controller.past_restart_threshold() {
            return match self.controller.seek(0.0) {
                Ok(()) => true,
                Err(e) => {
                    self.report_error(&e);
                    false
                }
            };
        }
        self.queue.advance(Direction::Backward);
        self.start_current()
    }

    pub fn seek(&mut self, seconds: f64) -> Result<()> {
        self.controller.seek(seconds)
    }

    pub fn scrub(&mut self, seconds: f64) {
        self.controller.scrub_to(seconds);
    }

    pub fn release_scrub(&mut self) -> Result<()> {
        self.controller.release_scrub()
    }

    pub fn toggle_repeat(&mut self) -> bool {
        let on = self.controller.toggle_repeat();
        info!(repeat = on, "repeat toggled");
        on
    }

    pub fn set_volume(&mut self, percent: u8) {
        self.controller.set_volume(percent);
    }

    /// Adopt a manual reorder of the queue. An empty order is ignored.
    pub fn reorder_queue(&mut self, order: Vec<TrackId>) {
        if order.is_empty() {
            return;
        }
        self.queue.rebuild_from_external_order(order);
        self.notify_queue();
    }

    /// Drag queue row `from` to `to`.
    pub fn move_queue_row(&mut self, from: usize, to: usize) -> bool {
        let mut order = self.queue.tracks().to_vec();
        if from >= order.len() || to >= order.len() {
            return false;
        }
        let id = order.remove(from);
        order.insert(to, id);
        self.reorder_queue(order);
        true
    }

    /// Periodic poll: end of track, then the lyric highlight.
    pub fn tick(&mut self) {
        match self.controller.poll() {
            Ok(Some(TrackEnd::Repeated)) => {
                if let Some(id) = self.queue.current() {
                    self.record_play(id);
                }
                self.tracker.reset();
            }
            Ok(Some(TrackEnd::Advance)) => {
                if self.queue.advance(Direction::Forward) {
                    self.start_current();
                } else {
                    debug!("end of queue");
                    self.notify_state();
                }
            }
            Ok(None) => {}
            Err(e) => {
                self.report_error(&e);
                self.notify_state();
            }
        }
        self.update_highlight();
    }

    fn update_highlight(&mut self) {
        let LyricsView::Timed(doc) = &self.lyrics else {
            return;
        };
        let position = self.controller.position_seconds();
        if !self.tracker.update(doc, position) {
            return;
        }
        let index = self.tracker.current();
        let text = index
            .and_then(|i| doc.line(i))
            .map(|l| l.text.clone())
            .unwrap_or_default();
        self.notify(Notification::LyricsLineChanged { index, text });
    }

    // Lyrics

    fn set_lyrics(&mut self, path: Option<PathBuf>, view: LyricsView) {
        self.lyrics_for = path;
        self.lyrics = view.clone();
        self.tracker.reset();
        self.notify(Notification::LyricsChanged(view));
    }

    fn load_lyrics(&mut self, id: TrackId) {
        let Some(track) = self.library.get(id) else {
            return;
        };
        let path = track.path.clone();
        let view = self
            .resolver
            .resolve(&path, &track.artist, &track.title, &self.tx);
        self.set_lyrics(Some(path), view);
    }

    /// Apply a background lyrics result if it is still for the playing track.
    pub fn apply_lyrics(&mut self, ready: LyricsReady) {
        if self.lyrics_for.as_deref() != Some(ready.path.as_path()) {
            debug!(path = %ready.path.display(), "dropping lyrics for a track no longer playing");
            return;
        }
        self.set_lyrics(Some(ready.path), ready.view);
    }

    /// Check every catalog track for lyrics in the background.
    pub fn check_missing_lyrics(&mut self) {
        let records = self
            .library
            .catalog()
            .iter()
            .filter_map(|&id| self.library.record(id))
            .collect();
        spawn_missing_check(records, self.resolver.source(), self.tx.clone());
    }

    pub fn apply_lyrics_report(&mut self, report: MissingLyricsReport) {
        if let Err(e) = self.store.save_missing_report(&report.missing) {
            self.report_error(&e);
        }
        self.notify(Notification::MissingLyrics {
            checked: report.checked,
            missing: report.missing.len(),
        });
    }

    // Playlists and likes

    pub fn like(&mut self, id: TrackId) -> Result<bool> {
        let record = self
            .library
            .record(id)
            .ok_or(Error::UnknownTrackId(id))?;
        let added = self.store.like(&record)?;
        if added {
            info!(path = %record.path.display(), "liked");
        }
        Ok(added)
    }

    pub fn save_queue_as(&mut self, name: &str) -> bool {
        let saved = self.playlists.save_queue(name, self.queue.tracks());
        if saved {
            self.notify(Notification::PlaylistsChanged);
        }
        saved
    }

    pub fn add_to_playlist(&mut self, name: &str, id: TrackId) -> bool {
        let added = self.playlists.add_tracks(name, &[id]);
        if added {
            self.notify(Notification::PlaylistsChanged);
        }
        added
    }

    pub fn group_playlists(&mut self, field: TrackField) -> usize {
        let written = self.playlists.group_by(field, &self.library);
        if written > 0 {
            self.notify(Notification::PlaylistsChanged);
        }
        written
    }

    /// Build the Recommended playlist from play history.
    pub fn build_recommended(&mut self) -> usize {
        let history = self.store.load_history();
        if history.is_empty() {
            self.notify(Notification::Error("no listening history yet".to_string()));
            return 0;
        }
        let ids = recommend(&history, &self.library);
        let len = ids.len();
        self.playlists.set(RECOMMENDED, ids);
        self.notify(Notification::PlaylistsChanged);
        len
    }

    // Accessors

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn queue(&self) -> &PlaybackQueue {
        &self.queue
    }

    pub fn controller(&self) -> &PlaybackController<E> {
        &self.controller
    }

    pub fn playlists(&self) -> &Playlists {
        &self.playlists
    }

    pub fn lyrics(&self) -> &LyricsView {
        &self.lyrics
    }

    pub fn lyric_line(&self) -> Option<usize> {
        self.tracker.current()
    }

    pub fn folders(&self) -> &[PathBuf] {
        &self.folders
    }

    pub fn store(&self) -> &dyn Persistence {
        self.store.as_ref()
    }

    pub fn contains_folder(&self, folder: &Path) -> bool {
        self.folders.iter().any(|f| f == folder)
    }

    #[cfg(test)]
    pub(crate) fn library_mut(&mut self) -> &mut Library {
        &mut self.library
    }

    #[cfg(test)]
    pub(crate) fn engine_mut(&mut self) -> &mut E {
        self.controller.engine_mut()
    }
}
