//! Line-oriented commands accepted by the headless front end.
//!
//! Rows are 0-based positions: catalog rows for `play`/`edit`/`add-to`,
//! queue rows for `jump`/`move`.

use std::path::PathBuf;
use std::str::FromStr;

use crate::library::TrackField;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddFolder(PathBuf),
    Rescan,
    /// List catalog rows, optionally fuzzy-filtered.
    List(Option<String>),
    /// Without a row: resume. With a row: play that catalog track and the
    /// rest of the catalog after it.
    Play(Option<usize>),
    Pause,
    Toggle,
    Stop,
    Next,
    Previous,
    Seek(f64),
    /// Move the position slider without seeking yet.
    Scrub(f64),
    /// Let go of the slider.
    Release,
    Repeat,
    Volume(u8),
    Queue,
    Jump(usize),
    Move { from: usize, to: usize },
    Edit {
        row: usize,
        field: TrackField,
        value: String,
    },
    Like,
    SaveQueue(String),
    Group(TrackField),
    Recommend,
    PlayPlaylist(String),
    AddToPlaylist { row: usize, name: String },
    Playlists,
    Lyrics,
    CheckLyrics,
    Status,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  add <folder>            add a library folder and rescan
  rescan                  rescan all folders
  list [query]            list catalog rows (fuzzy filter)
  play [row]              resume, or play catalog row
  pause | toggle | stop
  next | prev
  seek <secs>             jump to a position
  scrub <secs> | release  drag / let go of the position slider
  repeat                  toggle repeat-one
  volume <0-100>
  queue                   show the queue
  jump <row>              play queue row
  move <from> <to>        reorder the queue
  edit <row> <field> <value>   field: title|artist|album|genre
  like                    like the playing track
  save-queue <name>       save the queue as a playlist
  group artist|genre      build playlists per artist or genre
  recommend               build the Recommended playlist
  playlists               list playlists
  playlist <name>         play a playlist
  add-to <row> <name>     add catalog row to a playlist
  lyrics                  show lyrics of the playing track
  check-lyrics            report tracks without lyrics
  status
  quit";

fn arg<T: FromStr>(value: Option<&str>, what: &str) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("missing {what}"))?;
    value
        .parse()
        .map_err(|_| format!("invalid {what}: {value}"))
}

/// `s` with its first `n` whitespace-separated words removed.
fn after_words(s: &str, n: usize) -> &str {
    let mut s = s.trim_start();
    for _ in 0..n {
        let end = s.find(char::is_whitespace).unwrap_or(s.len());
        s = s[end..].trim_start();
    }
    s
}

fn rest(value: &str, what: &str) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        Err(format!("missing {what}"))
    } else {
        Ok(value.to_string())
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, tail) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let tail = tail.trim();
        let mut words = tail.split_whitespace();

        let cmd = match verb.to_ascii_lowercase().as_str() {
            "add" => Self::AddFolder(PathBuf::from(rest(tail, "folder")?)),
            "rescan" => Self::Rescan,
            "list" | "ls" => Self::List((!tail.is_empty()).then(|| tail.to_string())),
            "play" => Self::Play(words.next().map(|w| arg(Some(w), "row")).transpose()?),
            "pause" => Self::Pause,
            "toggle" => Self::Toggle,
            "stop" => Self::Stop,
            "next" | "n" => Self::Next,
            "prev" | "previous" | "p" => Self::Previous,
            "seek" => Self::Seek(arg(words.next(), "seconds")?),
            "scrub" => Self::Scrub(arg(words.next(), "seconds")?),
            "release" => Self::Release,
            "repeat" => Self::Repeat,
            "volume" | "vol" => Self::Volume(arg(words.next(), "volume")?),
            "queue" | "q" => Self::Queue,
            "jump" => Self::Jump(arg(words.next(), "row")?),
            "move" => Self::Move {
                from: arg(words.next(), "row")?,
                to: arg(words.next(), "row")?,
            },
            "edit" => {
                let row = arg(words.next(), "row")?;
                let field = arg(words.next(), "field")?;
                // Value is everything after the field, spaces included.
                let value = after_words(tail, 2).trim_end().to_string();
                Self::Edit { row, field, value }
            }
            "like" => Self::Like,
            "save-queue" => Self::SaveQueue(rest(tail, "playlist name")?),
            "group" => {
                let field: TrackField = arg(words.next(), "field")?;
                if !matches!(field, TrackField::Artist | TrackField::Genre) {
                    return Err(format!("can only group by artist or genre, not {field}"));
                }
                Self::Group(field)
            }
            "recommend" => Self::Recommend,
            "playlist" => Self::PlayPlaylist(rest(tail, "playlist name")?),
            "add-to" => {
                let row = arg(words.next(), "row")?;
                Self::AddToPlaylist {
                    row,
                    name: rest(after_words(tail, 1), "playlist name")?,
                }
            }
            "playlists" => Self::Playlists,
            "lyrics" => Self::Lyrics,
            "check-lyrics" => Self::CheckLyrics,
            "status" => Self::Status,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            "" => return Err("empty command".to_string()),
            other => return Err(format!("unknown command: {other}")),
        };
        Ok(cmd)
    }
}
