//! Watch options

use std::path::PathBuf;
use std::time::Duration;

use crate::config::{WatchConfig, DEFAULT_EXTENSION, DEFAULT_INTERVAL_SECS};
use crate::error::{WatchError, WatchResult};

/// Wait after a failed directory listing before the next attempt
pub const DIRECTORY_BACKOFF: Duration = Duration::from_secs(2);

/// Watch options
#[derive(Debug, Clone, PartialEq)]
pub struct WatchOptions {
    /// Directory to poll (not recursive)
    pub directory: PathBuf,
    /// Filename suffix a file must end with to be tracked
    pub extension: String,
    /// Substring reported when found on a line
    pub magic_word: String,
    /// Pause between polling cycles
    pub interval: Duration,
    /// Extra pause after the directory could not be listed
    pub backoff: Duration,
}

impl WatchOptions {
    /// Create new watch options with default extension and interval
    pub fn new(directory: impl Into<PathBuf>, magic_word: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            magic_word: magic_word.into(),
            interval: Duration::from_secs_f64(DEFAULT_INTERVAL_SECS),
            backoff: DIRECTORY_BACKOFF,
        }
    }

    /// Build options from resolved config, validating interval and magic word
    pub fn from_config(
        directory: impl Into<PathBuf>,
        magic_word: impl Into<String>,
        config: &WatchConfig,
    ) -> WatchResult<Self> {
        let options = Self::new(directory, magic_word)
            .with_extension(config.extension.clone())
            .with_interval(interval_from_secs(config.interval)?);
        options.validate()?;
        Ok(options)
    }

    /// Set the extension filter
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Set the polling interval
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the directory backoff
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Reject an empty magic word
    pub fn validate(&self) -> WatchResult<()> {
        if self.magic_word.is_empty() {
            return Err(WatchError::EmptyMagicWord);
        }
        Ok(())
    }
}

/// Convert an interval in (fractional) seconds, keeping sub-second precision
pub fn interval_from_secs(secs: f64) -> WatchResult<Duration> {
    Duration::try_from_secs_f64(secs).map_err(|_| WatchError::InvalidInterval(secs))
}
