//! Configuration file handling for glyphfall.
//!
//! The config lives at `<config dir>/glyphfall/config.toml`. Every key is
//! optional; a missing file means "all defaults".
//!
//! ```toml
//! [rain]
//! scale_factor = 4.0
//! font_size = 16
//! color = "cyan"
//!
//! [rain.pacing]
//! mode = "throttled"
//! fps = 20
//!
//! [cursor]
//! interactive_selector = "a, button"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use glyphfall_core::{CursorSettings, RainSettings, SettingsError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONFIG_FILE: &str = "config.toml";

/// Errors raised while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),
    #[error("invalid setting")]
    Invalid(#[from] SettingsError),
}

/// Logging options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Full application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rain: RainSettings,
    pub cursor: CursorSettings,
    pub log: LogSettings,
}

impl Config {
    /// Load the config from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::warn!("no home directory, using default config");
                Ok(Self::default())
            }
        }
    }

    /// Load the config from `path`, falling back to defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config = Self::from_toml_str(&contents)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.rain.validate()?;
        self.cursor.validate()
    }
}

/// Project directories for glyphfall, if a home directory can be found.
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "glyphfall")
}

/// Default location of the config file.
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}
