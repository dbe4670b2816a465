//! Configuration management for tagbox.
//!
//! Settings are read from a TOML file in the platform config directory
//! (`~/.config/tagbox/config.toml` on Linux). A missing default file is not
//! an error; an explicitly requested one is.

mod settings;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use settings::{Settings, StyleOverrides, StyleSpec};

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine configuration directory")]
    NoConfigDir,

    /// The config file could not be read.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// The config file is not valid TOML for our schema.
    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The config parsed but its values are unusable.
    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Config {
    /// Widget settings, stored at the top level of the file.
    pub settings: Settings,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns defaults when the file does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::parse(&contents)?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Parse and validate configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.settings.validate()?;
        Ok(config)
    }

    /// Path of the default config file.
    pub fn config_path() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("tagbox").join("config.toml"))
    }
}
