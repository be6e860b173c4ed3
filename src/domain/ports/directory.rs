//! Directory port - abstraction over listing the watched directory
//!
//! Lets the poll cycle run against the local file system or a fake.

use std::path::Path;

use crate::error::WatchResult;

/// Lists the entries directly inside a directory
///
/// Implementations:
/// - `LocalDirectory` - `std::fs::read_dir`, failures mapped to `DirectoryUnavailable`
/// - test listers returning canned names or errors
pub trait DirectoryLister {
    /// Entry names (not paths) directly inside `dir`
    fn list(&self, dir: &Path) -> WatchResult<Vec<String>>;
}
