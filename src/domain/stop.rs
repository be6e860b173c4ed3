//! Cooperative stop flag

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared stop request.
///
/// Clones share one flag. The signal handler only sets it; the driver reads
/// it between ticks.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    requested: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the driver to stop at the next tick boundary
    pub fn request_stop(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }
}
