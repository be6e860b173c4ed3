//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (watchlist, ports)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `WatchDriver` - Polls a directory and reports magic-word hits

pub mod watch;

pub use watch::{
    scan_file, CycleReport, DriverState, MagicMatch, PollCycle, WatchDriver, WatchOptions,
};
