//! Configuration module for dirwatch
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (DIRWATCH_*)
//! 3. Config file (`--config`, `./dirwatch.toml`, or `~/.config/dirwatch/config.toml`)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{ConfigWarning, PROJECT_CONFIG_FILE};
pub use types::{Config, WatchConfig, DEFAULT_EXTENSION, DEFAULT_INTERVAL_SECS};
