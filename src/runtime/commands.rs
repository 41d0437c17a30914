//! Dispatch of parsed commands onto the app, plus the plain-text views
//! (`list`, `queue`, `status`, ...) printed to stdout.

use std::collections::HashSet;

use crate::app::{App, Command, HELP};
use crate::audio::PlaybackEngine;
use crate::library::{TrackId, format_duration};
use crate::lyrics::LyricsView;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn execute<E: PlaybackEngine>(app: &mut App<E>, cmd: Command) -> Flow {
    match cmd {
        Command::AddFolder(folder) => {
            if !app.add_folder(folder.clone()) {
                println!("{} is already in the library", folder.display());
            }
        }
        Command::Rescan => {
            app.rescan();
        }
        Command::List(query) => print_catalog(app, query.as_deref()),
        Command::Play(None) => {
            if !app.play() {
                println!("nothing to play");
            }
        }
        Command::Play(Some(row)) => {
            if app.library().catalog().get(row).is_none() {
                println!("no catalog row {row}");
            } else {
                app.activate_row(row);
            }
        }
        Command::Pause => {
            app.pause();
        }
        Command::Toggle => {
            app.toggle();
        }
        Command::Stop => app.stop(),
        Command::Next => {
            if !app.next() {
                println!("end of queue");
            }
        }
        Command::Previous => {
            app.previous();
        }
        Command::Seek(seconds) => {
            if let Err(e) = app.seek(seconds) {
                app.report_error(&e);
            }
        }
        Command::Scrub(seconds) => app.scrub(seconds),
        Command::Release => {
            if let Err(e) = app.release_scrub() {
                app.report_error(&e);
            }
        }
        Command::Repeat => {
            let on = app.toggle_repeat();
            println!("repeat {}", if on { "on" } else { "off" });
        }
        Command::Volume(percent) => app.set_volume(percent),
        Command::Queue => print_queue(app),
        Command::Jump(index) => {
            if !app.activate_queue_row(index) {
                println!("no queue row {index}");
            }
        }
        Command::Move { from, to } => {
            if !app.move_queue_row(from, to) {
                println!("queue rows out of range");
            }
        }
        Command::Edit { row, field, value } => match catalog_id(app, row) {
            Some(id) => {
                if let Err(e) = app.edit_field(id, field, &value) {
                    app.report_error(&e);
                }
            }
            None => println!("no catalog row {row}"),
        },
        Command::Like => match app.now_playing().map(|(id, _)| id) {
            Some(id) => match app.like(id) {
                Ok(true) => println!("liked"),
                Ok(false) => println!("already liked"),
                Err(e) => app.report_error(&e),
            },
            None => println!("nothing is playing"),
        },
        Command::SaveQueue(name) => {
            if !app.save_queue_as(&name) {
                println!("queue is empty");
            }
        }
        Command::Group(field) => {
            let written = app.group_playlists(field);
            println!("{written} playlists by {field}");
        }
        Command::Recommend => {
            let len = app.build_recommended();
            if len > 0 {
                println!("{len} recommended tracks");
            }
        }
        Command::PlayPlaylist(name) => {
            if !app.play_playlist(&name) {
                println!("no playlist {name:?} or it is empty");
            }
        }
        Command::AddToPlaylist { row, name } => match catalog_id(app, row) {
            Some(id) => {
                if !app.add_to_playlist(&name, id) {
                    println!("invalid playlist name");
                }
            }
            None => println!("no catalog row {row}"),
        },
        Command::Playlists => {
            for (name, tracks) in app.playlists().iter() {
                println!("{name} ({})", tracks.len());
            }
        }
        Command::Lyrics => print_lyrics(app),
        Command::CheckLyrics => {
            app.check_missing_lyrics();
            println!("checking lyrics in the background");
        }
        Command::Status => print_status(app),
        Command::Help => println!("{HELP}"),
        Command::Quit => return Flow::Quit,
    }
    Flow::Continue
}

fn catalog_id<E: PlaybackEngine>(app: &App<E>, row: usize) -> Option<TrackId> {
    app.library().catalog().get(row).copied()
}

fn print_catalog<E: PlaybackEngine>(app: &App<E>, query: Option<&str>) {
    let matches: Option<HashSet<TrackId>> = query.map(|q| app.filter(q).into_iter().collect());
    for (row, (id, track)) in app.library().catalog_tracks().enumerate() {
        if matches.as_ref().is_some_and(|m| !m.contains(&id)) {
            continue;
        }
        println!("{row:>4}  {}  [{}]", track.display, format_duration(track.duration));
    }
}

fn print_queue<E: PlaybackEngine>(app: &App<E>) {
    let current = app.queue().index();
    for (i, &id) in app.queue().tracks().iter().enumerate() {
        let marker = if Some(i) == current { '>' } else { ' ' };
        let display = app.library().get(id).map_or("", |t| t.display.as_str());
        println!("{marker}{i:>3}  {display}");
    }
}

fn print_status<E: PlaybackEngine>(app: &App<E>) {
    let controller = app.controller();
    let now = app
        .now_playing()
        .map_or_else(|| "-".to_string(), |(_, t)| t.display.clone());
    println!(
        "{}  {now}  {}/{}  volume {}%  repeat {}  queue {}/{}",
        controller.state(),
        format_duration(controller.position_seconds()),
        format_duration(controller.length_seconds()),
        controller.volume(),
        if controller.repeat() { "on" } else { "off" },
        app.queue().index().map_or(0, |i| i + 1),
        app.queue().len(),
    );
}

fn print_lyrics<E: PlaybackEngine>(app: &App<E>) {
    match app.lyrics() {
        LyricsView::Searching => println!("searching..."),
        LyricsView::NotFound => println!("no lyrics"),
        LyricsView::Plain(text) => println!("{text}"),
        LyricsView::Timed(doc) => {
            let active = app.lyric_line();
            for (i, line) in doc.lines.iter().enumerate() {
                let marker = if Some(i) == active { '>' } else { ' ' };
                println!("{marker} [{}] {}", format_duration(line.time), line.text);
            }
        }
    }
}
