use std::{env, path::PathBuf};

use crate::error::{Error, Result};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `CADENZA__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("CADENZA")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: &str| {
            Err(Error::ConfigInvalid {
                message: message.to_string(),
            })
        };

        if self.playback.poll_interval_ms == 0 {
            return invalid("playback.poll_interval_ms must be >= 1");
        }
        if self.playback.volume > 100 {
            return invalid("playback.volume must be <= 100");
        }
        if !self.playback.restart_threshold_secs.is_finite()
            || self.playback.restart_threshold_secs < 0.0
        {
            return invalid("playback.restart_threshold_secs must be a non-negative number");
        }
        if self.lyrics.timeout_secs == 0 {
            return invalid("lyrics.timeout_secs must be >= 1");
        }
        if self.runtime.channel_capacity == 0 {
            return invalid("runtime.channel_capacity must be >= 1");
        }
        Ok(())
    }

    /// Directory holding persisted state, history and liked songs.
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .or_else(default_data_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Resolve the config path from `CADENZA_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("CADENZA_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/cadenza/config.toml`
/// or `~/.config/cadenza/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_home("XDG_CONFIG_HOME", ".config").map(|d| d.join("cadenza").join("config.toml"))
}

/// `$XDG_DATA_HOME/cadenza` or `~/.local/share/cadenza`.
pub fn default_data_dir() -> Option<PathBuf> {
    xdg_home("XDG_DATA_HOME", ".local/share").map(|d| d.join("cadenza"))
}

fn xdg_home(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(xdg) = env::var_os(var) {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}
