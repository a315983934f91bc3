//! Configuration surface for external-command invocations
//!
//! Hosts hand this library a handful of values — a timeout, a capture
//! toggle, a scratch directory — usually sourced from a settings file they
//! own. This crate models that surface as a TOML `[defaults]` section with
//! built-in fallbacks, so embedders can load a file or construct the values
//! programmatically. Per-request values always win; the config only supplies
//! defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default timeout for an invocation, in seconds.
pub const DEFAULT_TIMEOUT_DELAY_SECS: u64 = 3;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found at {path}")]
    NotFound { path: String },

    #[error("Invalid configuration file: {0}")]
    InvalidFile(String),

    #[error("Invalid configuration value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Configuration for external-command invocations.
///
/// # Example
///
/// ```toml
/// [defaults]
/// timeout_delay = 5
/// capture_output = true
/// scratch_dir = "/tmp/extcmd"
/// ```
///
/// All keys are optional; accessors apply the documented defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
}

/// The `[defaults]` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Defaults {
    /// Seconds before a captured invocation is killed (default: 3)
    pub timeout_delay: Option<u64>,
    /// Whether to capture subprocess output (default: true)
    pub capture_output: Option<bool>,
    /// Directory for temp-file-mode scratch files (default: host temp dir)
    pub scratch_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.display().to_string(),
                }
            } else {
                ConfigError::InvalidFile(format!("{}: {err}", path.display()))
            }
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text and validate it.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::InvalidFile(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check configured values for consistency.
    ///
    /// A zero timeout would kill every invocation before it starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.defaults.timeout_delay == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "timeout_delay".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    /// The invocation timeout, defaulting to 3 seconds.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(
            self.defaults
                .timeout_delay
                .unwrap_or(DEFAULT_TIMEOUT_DELAY_SECS),
        )
    }

    /// Whether subprocess output is captured, defaulting to true.
    #[must_use]
    pub fn capture_output(&self) -> bool {
        self.defaults.capture_output.unwrap_or(true)
    }

    /// The scratch directory for temp-file mode, if one is configured.
    ///
    /// `None` means the host's temp directory is used.
    #[must_use]
    pub fn scratch_dir(&self) -> Option<&Path> {
        self.defaults.scratch_dir.as_deref()
    }
}
