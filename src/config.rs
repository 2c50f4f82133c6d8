//! Editor settings
//!
//! Stored as JSON at `~/.config/skinedit/settings.json`. A missing file
//! means defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Number of undo steps kept when nothing is configured
pub const DEFAULT_MAX_UNDOS: usize = 30;

/// Settings file name
pub const SETTINGS_FILE_NAME: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Maximum number of entries each undo history retains
    pub max_undos: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_undos: DEFAULT_MAX_UNDOS,
        }
    }
}

impl Settings {
    /// Get the settings file path (~/.config/skinedit/settings.json)
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("skinedit")
            .join(SETTINGS_FILE_NAME)
    }

    /// Load settings from the default location
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from a specific file (for testing)
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings: Settings = match fs::read_to_string(path) {
            Ok(json) => serde_json::from_str(&json)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Settings::default(),
            Err(e) => return Err(e.into()),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_undos == 0 {
            return Err(ConfigError::InvalidMaxUndos(self.max_undos));
        }
        Ok(())
    }
}

/// Errors that can occur while loading or saving settings
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("max_undos must be at least 1, got {0}")]
    InvalidMaxUndos(usize),
}
