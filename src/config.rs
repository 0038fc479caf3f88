//! Match configuration
//!
//! Persisted as a small JSON file. Every field has a default, so a partial
//! file (or no file at all) is valid.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_SCORE_LIMIT, DEFAULT_TIME_LIMIT_MINUTES};
use crate::error::ConfigError;

/// Settings for a headless match session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Built-in map name (`classic`) or a path to a map file
    pub stadium: String,

    // === Match limits ===
    /// Goals needed to win (0 = no score limit)
    pub score_limit: u32,
    /// Match length in minutes (0 = no time limit)
    pub time_limit_minutes: u32,

    // === Recording ===
    /// Save an action recording when a match stops
    pub enable_recorder: bool,
    pub recording_folder: PathBuf,

    /// Fallback log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            stadium: "classic".to_string(),

            score_limit: DEFAULT_SCORE_LIMIT,
            time_limit_minutes: DEFAULT_TIME_LIMIT_MINUTES,

            enable_recorder: false,
            recording_folder: PathBuf::from("recordings"),

            log_level: "info".to_string(),
        }
    }
}

impl GameConfig {
    /// Read a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Read a config file if one was given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::info!("Using default config");
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Config saved to {}", path.display());
        Ok(())
    }
}
