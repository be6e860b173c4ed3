//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::WatchResult;

use super::loader::{self, ConfigWarning};

/// Default extension filter
pub const DEFAULT_EXTENSION: &str = ".txt";

/// Default polling interval in seconds
pub const DEFAULT_INTERVAL_SECS: f64 = 1.0;

/// `[watch]` table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchConfig {
    /// Seconds between polling cycles
    #[serde(default = "default_interval")]
    pub interval: f64,

    /// Only files whose name ends with this suffix are tracked
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Append log lines to this file as well as stderr
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            extension: default_extension(),
            log_file: None,
        }
    }
}

fn default_interval() -> f64 {
    DEFAULT_INTERVAL_SECS
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub watch: WatchConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> WatchResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> WatchResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Resolve config from an explicit path, the working directory, the user
    /// config directory, or defaults, then apply environment overrides.
    pub fn resolve(explicit: Option<&Path>) -> WatchResult<(Self, Vec<ConfigWarning>)> {
        loader::resolve(explicit)
    }

    /// Apply environment variable overrides (DIRWATCH_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }
}
