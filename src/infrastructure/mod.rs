//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Directory listing
//! - `events/` - Notification sinks (log, NDJSON)
//! - `clock` - System clock with interruptible sleep

pub mod clock;
pub mod events;
pub mod fs;

// Re-export for convenience
pub use clock::SystemClock;
pub use events::{JsonEventSink, LogSink};
pub use fs::{list_directory, LocalDirectory};
