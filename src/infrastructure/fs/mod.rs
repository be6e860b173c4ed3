//! File System Implementations

mod local;

pub use local::{list_directory, LocalDirectory};
