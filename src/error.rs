//! Error types for dirwatch
//!
//! Library errors use `thiserror`; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for dirwatch operations
pub type WatchResult<T> = Result<T, WatchError>;

/// Main error type for dirwatch operations
#[derive(Error, Debug)]
pub enum WatchError {
    /// The watched directory is missing or cannot be listed
    #[error("directory unavailable: {path}: {source}")]
    DirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A tracked file could not be opened or read
    #[error("cannot read {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file could not be parsed
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Polling interval is negative or not finite
    #[error("invalid polling interval {0}: must be a finite, non-negative number of seconds")]
    InvalidInterval(f64),

    /// Magic word is empty
    #[error("magic word must not be empty")]
    EmptyMagicWord,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WatchError {
    /// Whether the driver should back off before the next listing attempt
    pub fn is_directory_unavailable(&self) -> bool {
        matches!(self, WatchError::DirectoryUnavailable { .. })
    }
}
