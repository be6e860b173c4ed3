//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod clock;
pub mod directory;
pub mod watch_events;

pub use clock::Clock;
pub use directory::DirectoryLister;
pub use watch_events::{EventLevel, NoopSink, NotificationSink, WatchEvent};
