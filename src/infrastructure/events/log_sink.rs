//! Log Sink
//!
//! Forwards notifications to the `log` facade; formatting and destinations
//! are set up by `crate::logging`.

use crate::domain::ports::NotificationSink;

/// Log target used for watch notifications
pub const LOG_TARGET: &str = "dirwatch::watch";

/// Sink writing through `log::info!` and friends
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl LogSink {
    pub fn new() -> Self {
        Self
    }
}

impl NotificationSink for LogSink {
    fn info(&self, msg: &str) {
        log::info!(target: LOG_TARGET, "{}", msg);
    }

    fn warning(&self, msg: &str) {
        log::warn!(target: LOG_TARGET, "{}", msg);
    }

    fn error(&self, msg: &str) {
        log::error!(target: LOG_TARGET, "{}", msg);
    }

    fn debug(&self, msg: &str) {
        log::debug!(target: LOG_TARGET, "{}", msg);
    }
}
