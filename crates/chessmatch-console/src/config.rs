//! Configuration file loading for the console.
//!
//! Settings live in a TOML file, `chessmatch.toml` in the current directory
//! unless another path is given on the command line.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Console settings. Every field may be omitted.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Draw pieces and highlighted squares with ANSI colors.
    pub color: bool,
    /// List captured pieces under the board.
    pub show_captured: bool,
    /// Maximum level of log events written to stderr.
    pub log_level: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        ConsoleConfig {
            color: true,
            show_captured: true,
            log_level: "warn".to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Loads the configuration from `path`.
    ///
    /// A missing file is not an error and yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default path to the configuration file.
    pub fn default_path() -> PathBuf {
        PathBuf::from("chessmatch.toml")
    }
}
