//! Watch Event Port
//!
//! Everything the polling loop reports goes through a `NotificationSink`,
//! either as a typed `WatchEvent` or as a plain leveled message.

use std::time::Duration;

const BANNER_RULE: &str = "-------------------------------------------------------";

/// Severity of a watch event
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventLevel {
    Debug,
    Info,
    Warning,
    Error,
}

/// Event emitted while watching
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    /// Watch loop started
    WatchStarted {
        directory: String,
        extension: String,
        magic: String,
        interval_secs: f64,
        pid: u32,
        started_at: String,
    },
    /// File entered the watchlist
    FileAdded { file: String },
    /// File left the watchlist
    FileRemoved { file: String },
    /// Magic word found on a line (1-based)
    MagicFound {
        file: String,
        line: usize,
        magic: String,
    },
    /// A tracked file could not be scanned this tick
    ScanFailed { file: String, message: String },
    /// The watched directory could not be listed
    DirectoryUnavailable { directory: String, message: String },
    /// The watched directory can be listed again
    DirectoryRestored { directory: String },
    /// Any other error raised during a tick
    UnhandledError { message: String },
    /// Tick summary
    CycleComplete {
        tracked: usize,
        scanned: usize,
        matches: usize,
        failed: usize,
    },
    /// Stop was requested; the loop exits at this tick boundary
    StopRequested,
    /// Watch loop stopped
    Shutdown { uptime: String, uptime_secs: f64 },
}

impl WatchEvent {
    pub fn level(&self) -> EventLevel {
        match self {
            WatchEvent::CycleComplete { .. } => EventLevel::Debug,
            WatchEvent::ScanFailed { .. } | WatchEvent::UnhandledError { .. } => EventLevel::Error,
            WatchEvent::DirectoryUnavailable { .. } | WatchEvent::StopRequested => {
                EventLevel::Warning
            }
            _ => EventLevel::Info,
        }
    }

    /// Human-readable message for log output
    pub fn message(&self) -> String {
        match self {
            WatchEvent::WatchStarted {
                directory,
                extension,
                magic,
                interval_secs,
                pid,
                started_at,
            } => format!(
                "\n{rule}\n   Running dirwatch on {directory}\n   Looking for '{magic}' in *{extension} every {interval_secs}s\n   PID is {pid}\n   Started on {started_at}\n{rule}\n",
                rule = BANNER_RULE,
            ),
            WatchEvent::FileAdded { file } => format!("{} added to watchlist.", file),
            WatchEvent::FileRemoved { file } => format!("{} removed from watchlist.", file),
            WatchEvent::MagicFound { file, line, magic } => {
                format!("This file: {} found: {} on line: {}", file, magic, line)
            }
            WatchEvent::ScanFailed { file, message } => {
                format!("Skipping {} this cycle: {}", file, message)
            }
            WatchEvent::DirectoryUnavailable { directory, message } => format!(
                "Directory {} is unavailable, retrying: {}",
                directory, message
            ),
            WatchEvent::DirectoryRestored { directory } => {
                format!("Directory {} is available again.", directory)
            }
            WatchEvent::UnhandledError { message } => format!("UNHANDLED ERROR: {}", message),
            WatchEvent::CycleComplete {
                tracked,
                scanned,
                matches,
                failed,
            } => format!(
                "Cycle complete: {} tracked, {} scanned, {} matches, {} failed",
                tracked, scanned, matches, failed
            ),
            WatchEvent::StopRequested => "Stop requested, shutting down.".to_string(),
            WatchEvent::Shutdown { uptime, .. } => format!(
                "\n{rule}\n   Stopped dirwatch\n   Uptime was {uptime}\n{rule}\n",
                rule = BANNER_RULE,
            ),
        }
    }

    /// Convert to JSON string with "command": "watch" field included
    pub fn to_json(&self) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("watch"));
            obj.insert("level".to_string(), serde_json::json!(self.level()));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Format an uptime as `H:MM:SS.mmm`
pub fn format_uptime(uptime: Duration) -> String {
    let total = uptime.as_secs();
    format!(
        "{}:{:02}:{:02}.{:03}",
        total / 3600,
        (total % 3600) / 60,
        total % 60,
        uptime.subsec_millis()
    )
}

/// Receiver for watch notifications
///
/// Implementations can be:
/// - LogSink: leveled log lines via the `log` facade
/// - JsonEventSink: NDJSON event stream for automation
/// - NoopSink: Silent operation
pub trait NotificationSink {
    fn info(&self, msg: &str);

    fn warning(&self, msg: &str);

    fn error(&self, msg: &str);

    fn debug(&self, _msg: &str) {}

    /// Handle a typed event. Defaults to routing its message by level.
    fn notify(&self, event: &WatchEvent) {
        let msg = event.message();
        match event.level() {
            EventLevel::Debug => self.debug(&msg),
            EventLevel::Info => self.info(&msg),
            EventLevel::Warning => self.warning(&msg),
            EventLevel::Error => self.error(&msg),
        }
    }
}

/// No-op sink for silent operation
pub struct NoopSink;

impl NotificationSink for NoopSink {
    fn info(&self, _msg: &str) {}

    fn warning(&self, _msg: &str) {}

    fn error(&self, _msg: &str) {}
}
