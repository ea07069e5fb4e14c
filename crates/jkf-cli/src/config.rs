//! Configuration file loading for the `jkf` command.
//!
//! Settings live in `jkf.toml` in the current directory. Every field has a
//! default, so a missing file or an empty one behaves the same.

use jkf_notation::Format;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or interpreting configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// `default_format` names no known format.
    #[error("Unknown default format: {0}")]
    UnknownFormat(String),
}

/// Settings for the `jkf` command.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct JkfConfig {
    /// Target of `convert` when `--to` is not given. Defaults to "kif".
    #[serde(default = "default_format")]
    pub default_format: String,
    /// Pretty-print JKF output. Defaults to true.
    #[serde(default = "default_pretty_json")]
    pub pretty_json: bool,
}

fn default_format() -> String {
    "kif".to_string()
}

fn default_pretty_json() -> bool {
    true
}

impl Default for JkfConfig {
    fn default() -> Self {
        JkfConfig {
            default_format: default_format(),
            pretty_json: default_pretty_json(),
        }
    }
}

impl JkfConfig {
    /// Loads [`Self::config_path()`], or the defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads the configuration at `path`, or the defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns `jkf.toml` in the current working directory.
    pub fn config_path() -> PathBuf {
        PathBuf::from("jkf.toml")
    }

    /// The format named by `default_format`.
    pub fn target_format(&self) -> Result<Format, ConfigError> {
        self.default_format
            .parse()
            .map_err(|_| ConfigError::UnknownFormat(self.default_format.clone()))
    }
}
