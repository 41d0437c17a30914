//! Application module: the control context and the messages that reach it.
//!
//! `App` in `app::model` owns the library, queue, controller, playlists and
//! lyrics state. Workers and the command reader talk to it through
//! `AppEvent`s; it reports back through a `NotificationSink`.

mod command;
mod event;
mod filter;
mod model;
mod notify;

pub use command::{Command, HELP};
pub use event::AppEvent;
pub use filter::{filter_catalog, fuzzy_match_positions};
pub use model::App;
pub use notify::{LogSink, Notification, NotificationSink};
