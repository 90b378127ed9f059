//! Settings for the wayfarer navigation engine.
//!
//! [`Settings`] holds the engine configuration with sensible defaults.
//! There is deliberately no process-wide settings singleton: a `Settings`
//! value is constructed once at application start (from defaults, a TOML
//! string, or by hand) and passed to whatever needs it.

use serde::{Deserialize, Serialize};

use crate::error::{WayfarerError, WayfarerResult};

/// Engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Development mode: enables pretty, human-readable log output.
    pub debug: bool,
    /// Log filter directive (e.g. `"info"`, `"wayfarer=debug"`).
    pub log_level: String,
    /// Where unauthenticated navigations are redirected. The original
    /// destination path is appended as a `url` query parameter.
    pub sign_in_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            log_level: "info".to_string(),
            sign_in_url: "/signin".to_string(),
        }
    }
}

impl Settings {
    /// Parses settings from a TOML document. Missing keys take their
    /// default values.
    ///
    /// # Errors
    ///
    /// Returns [`WayfarerError::ImproperlyConfigured`] if the document is
    /// not valid TOML or a key has the wrong type.
    pub fn from_toml_str(contents: &str) -> WayfarerResult<Self> {
        toml::from_str(contents)
            .map_err(|e| WayfarerError::ImproperlyConfigured(format!("Invalid settings: {e}")))
    }
}
