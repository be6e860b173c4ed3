//! Watch Use Case
//!
//! This module implements the polling watch loop. It orchestrates:
//! - Directory listing and watchlist reconciliation
//! - Incremental magic-word scanning (resume from the last scanned line)
//! - Interval sleep, directory backoff, and cooperative shutdown
//!
//! ## Architecture
//!
//! - `WatchDriver` - Main loop, RUNNING until a stop is requested
//! - `PollCycle` - One list/reconcile/scan pass; owns the `Watchlist`
//! - `scan_file` - Line scanner returning the new line count
//!
//! ## Usage
//!
//! ```ignore
//! let options = WatchOptions::new("logs", "ERROR");
//! let mut driver = WatchDriver::new(options, SystemClock::new(), stop);
//! let uptime = driver.run(&LogSink::new());
//! ```

mod cycle;
mod driver;
mod options;
mod scanner;

#[cfg(test)]
mod tests;

pub use cycle::{CycleReport, PollCycle};
pub use driver::{DriverState, WatchDriver};
pub use options::{interval_from_secs, WatchOptions, DIRECTORY_BACKOFF};
pub use scanner::{scan_file, MagicMatch};
