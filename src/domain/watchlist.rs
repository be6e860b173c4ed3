//! Watchlist of tracked files and their scan offsets
//!
//! Maps a filename (relative to the watched directory) to the number of
//! lines already scanned. Reconciled against a fresh directory listing on
//! every poll cycle.

use std::collections::{BTreeMap, HashSet};

/// Outcome of reconciling the watchlist with a directory listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Names newly tracked, in listing order
    pub added: Vec<String>,
    /// Names dropped because they are no longer listed, sorted
    pub removed: Vec<String>,
}

impl Reconciliation {
    /// Check if the watchlist changed
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Tracked filename -> last scanned line count
#[derive(Debug, Clone, Default)]
pub struct Watchlist {
    entries: BTreeMap<String, usize>,
}

impl Watchlist {
    /// Create an empty watchlist
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Stored line offset for a tracked file
    pub fn offset(&self, name: &str) -> Option<usize> {
        self.entries.get(name).copied()
    }

    /// Record the line count returned by a scan.
    ///
    /// Ignored for names that are not tracked.
    pub fn set_offset(&mut self, name: &str, line: usize) {
        if let Some(slot) = self.entries.get_mut(name) {
            *slot = line;
        }
    }

    /// Tracked names in sorted order
    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Bring the watchlist in line with `listing`.
    ///
    /// Names ending with `extension` (exact, case-sensitive) that are not yet
    /// tracked are added at offset 0. Tracked names missing from `listing` are
    /// removed. The extension is only checked on add: a tracked name that is
    /// still listed stays tracked.
    pub fn reconcile<S>(&mut self, listing: &[S], extension: &str) -> Reconciliation
    where
        S: AsRef<str>,
    {
        let mut result = Reconciliation::default();

        for name in listing {
            let name = name.as_ref();
            if name.ends_with(extension) && !self.entries.contains_key(name) {
                self.entries.insert(name.to_string(), 0);
                result.added.push(name.to_string());
            }
        }

        let present: HashSet<&str> = listing.iter().map(|name| name.as_ref()).collect();
        self.entries.retain(|name, _| {
            let keep = present.contains(name.as_str());
            if !keep {
                result.removed.push(name.clone());
            }
            keep
        });

        result
    }
}
