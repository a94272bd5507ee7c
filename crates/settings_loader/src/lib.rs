//! # Settings Loader
//!
//! Loads the consolidation settings (`settings.json`) into [`models::Settings`].
//! Every field of the file is optional, so a file only needs to name what it
//! overrides, and a missing file simply means "use the defaults".
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! // Load settings from a specific path
//! let settings = settings_loader::load_settings("config/axis.json")?;
//!
//! // Explicit path if given, then ./settings.json, then built-in defaults
//! let path = Some(PathBuf::from("settings.json"));
//! let settings = settings_loader::load_settings_with_fallback(path.as_ref())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use models::Settings;

pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Loads settings from a JSON file
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Reading settings file: {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&raw)
        .with_context(|| format!("Parsing settings JSON in {}", path.display()))?;
    Ok(settings)
}

/// Loads settings from the default location (settings.json in the current directory)
pub fn load_default_settings() -> Result<Settings> {
    load_settings(DEFAULT_SETTINGS_FILE)
}

/// Resolves settings in order: the explicit path, the default location, the built-in defaults.
///
/// An explicit path that exists but does not parse is an error; a path that
/// does not exist falls through to the next candidate.
pub fn load_settings_with_fallback(path: Option<&PathBuf>) -> Result<Settings> {
    if let Some(settings_path) = path {
        if settings_file_exists(settings_path) {
            return load_settings(settings_path);
        }
        tracing::warn!(
            "Settings file {} not found, trying {}",
            settings_path.display(),
            DEFAULT_SETTINGS_FILE
        );
    }

    if default_settings_exist() {
        return load_default_settings();
    }

    tracing::debug!("No settings file found, using built-in defaults");
    Ok(Settings::default())
}

/// Checks if a settings file exists at the given path
pub fn settings_file_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists() && path.as_ref().is_file()
}

/// Checks if the default settings file (settings.json) exists
pub fn default_settings_exist() -> bool {
    settings_file_exists(DEFAULT_SETTINGS_FILE)
}
