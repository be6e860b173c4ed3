//! dirwatch - polling directory watcher
//!
//! Polls a directory at a fixed interval, tracks files matching an extension
//! filter, and reports every new line containing a magic word. Each file is
//! resumed from the last line already scanned.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;

// Re-exports for convenience
pub use application::watch::{scan_file, MagicMatch, PollCycle, WatchDriver, WatchOptions};
pub use config::Config;
pub use domain::ports::{Clock, DirectoryLister, NotificationSink, WatchEvent};
pub use domain::{StopHandle, Watchlist};
pub use error::{WatchError, WatchResult};
pub use infrastructure::{JsonEventSink, LocalDirectory, LogSink, SystemClock};
