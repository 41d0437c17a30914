use tracing::warn;

use crate::config;

/// Load settings, falling back to defaults when the file is unreadable or invalid.
pub fn load_settings() -> config::Settings {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(e) = s.validate() {
                warn!(error = %e, "invalid config, using defaults");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            warn!(error = %e, "failed to load config, using defaults");
            config::Settings::default()
        }
    }
}
