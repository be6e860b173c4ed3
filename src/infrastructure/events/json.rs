//! JSON Event Sink
//!
//! Outputs watch events as NDJSON for automation consumption.

use crate::domain::ports::{EventLevel, NotificationSink, WatchEvent};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_line(&self, line: &str) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }

    fn write_message(&self, level: EventLevel, message: &str) {
        let json = serde_json::json!({
            "event": "message",
            "command": "watch",
            "level": level,
            "message": message,
        });
        self.write_line(&json.to_string());
    }
}

impl NotificationSink for JsonEventSink {
    fn info(&self, msg: &str) {
        self.write_message(EventLevel::Info, msg);
    }

    fn warning(&self, msg: &str) {
        self.write_message(EventLevel::Warning, msg);
    }

    fn error(&self, msg: &str) {
        self.write_message(EventLevel::Error, msg);
    }

    fn notify(&self, event: &WatchEvent) {
        self.write_line(&event.to_json());
    }
}
