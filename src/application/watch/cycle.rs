//! One polling cycle: list, reconcile, scan

use crate::domain::ports::{DirectoryLister, NotificationSink, WatchEvent};
use crate::domain::Watchlist;
use crate::error::WatchResult;
use crate::infrastructure::fs::LocalDirectory;

use super::options::WatchOptions;
use super::scanner::scan_file;

/// Summary of a single cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Files added to the watchlist
    pub added: usize,
    /// Files removed from the watchlist
    pub removed: usize,
    /// Files tracked after reconciliation
    pub tracked: usize,
    /// Files scanned successfully
    pub scanned: usize,
    /// Magic word hits
    pub matches: usize,
    /// Files that could not be read this cycle
    pub failed: usize,
}

impl CycleReport {
    pub fn to_event(&self) -> WatchEvent {
        WatchEvent::CycleComplete {
            tracked: self.tracked,
            scanned: self.scanned,
            matches: self.matches,
            failed: self.failed,
        }
    }
}

/// Owns the watchlist and runs cycles against the configured directory
#[derive(Debug)]
pub struct PollCycle<L: DirectoryLister = LocalDirectory> {
    options: WatchOptions,
    watchlist: Watchlist,
    lister: L,
}

impl PollCycle<LocalDirectory> {
    pub fn new(options: WatchOptions) -> Self {
        Self::with_lister(options, LocalDirectory::new())
    }
}

impl<L: DirectoryLister> PollCycle<L> {
    /// Create a cycle that lists the directory through `lister`
    pub fn with_lister(options: WatchOptions, lister: L) -> Self {
        Self {
            options,
            watchlist: Watchlist::new(),
            lister,
        }
    }

    pub fn options(&self) -> &WatchOptions {
        &self.options
    }

    pub fn watchlist(&self) -> &Watchlist {
        &self.watchlist
    }

    /// Run one cycle.
    ///
    /// Fails only when the lister fails, in which case the watchlist is left
    /// untouched. A file that cannot be read is reported
    /// through `sink` and keeps its previous offset.
    pub fn run_cycle<S>(&mut self, sink: &S) -> WatchResult<CycleReport>
    where
        S: NotificationSink + ?Sized,
    {
        let listing = self.lister.list(&self.options.directory)?;
        let diff = self.watchlist.reconcile(&listing, &self.options.extension);

        for file in &diff.added {
            sink.notify(&WatchEvent::FileAdded { file: file.clone() });
        }
        for file in &diff.removed {
            sink.notify(&WatchEvent::FileRemoved { file: file.clone() });
        }

        let mut report = CycleReport {
            added: diff.added.len(),
            removed: diff.removed.len(),
            tracked: self.watchlist.len(),
            ..CycleReport::default()
        };

        for name in self.watchlist.names() {
            let start = self.watchlist.offset(&name).unwrap_or(0);
            let path = self.options.directory.join(&name);
            let mut found = 0usize;

            let scanned = scan_file(&path, start, &self.options.magic_word, |hit| {
                found += 1;
                sink.notify(&WatchEvent::MagicFound {
                    file: hit.file.display().to_string(),
                    line: hit.line_number,
                    magic: hit.magic_word,
                });
            });

            match scanned {
                Ok(total) => {
                    self.watchlist.set_offset(&name, total);
                    report.scanned += 1;
                    report.matches += found;
                }
                Err(err) => {
                    report.failed += 1;
                    sink.notify(&WatchEvent::ScanFailed {
                        file: path.display().to_string(),
                        message: err.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }
}
