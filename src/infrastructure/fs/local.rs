//! Local directory listing

use std::path::Path;

use crate::domain::ports::DirectoryLister;
use crate::error::{WatchError, WatchResult};

/// `DirectoryLister` over the local file system
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalDirectory;

impl LocalDirectory {
    pub fn new() -> Self {
        Self
    }
}

impl DirectoryLister for LocalDirectory {
    fn list(&self, dir: &Path) -> WatchResult<Vec<String>> {
        list_directory(dir)
    }
}

/// List the names of all entries directly inside `dir`.
///
/// Subdirectories are listed like files. Names that are not valid UTF-8 are
/// skipped. Any failure to open or read the directory, including it vanishing
/// mid-listing, is reported as `DirectoryUnavailable`.
pub fn list_directory(dir: &Path) -> WatchResult<Vec<String>> {
    let unavailable = |source| WatchError::DirectoryUnavailable {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(unavailable)? {
        let entry = entry.map_err(unavailable)?;
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => log::debug!("skipping non UTF-8 entry {:?} in {}", raw, dir.display()),
        }
    }
    names.sort();
    Ok(names)
}
