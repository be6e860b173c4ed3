//! Domain Layer
//!
//! Pure watch state and the ports the polling loop talks through.
//!
//! ## Structure
//!
//! - `watchlist` - Tracked files and their scan offsets
//! - `stop` - Cooperative stop flag shared with the signal handler
//! - `ports/` - Interface definitions for infrastructure (sinks, clock)
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system directly
//! 2. **Ports & Adapters** - Logging and time go through trait-defined ports

pub mod ports;
pub mod stop;
pub mod watchlist;

pub use stop::StopHandle;
pub use watchlist::{Reconciliation, Watchlist};
