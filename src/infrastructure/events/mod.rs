//! Notification Sink Implementations
//!
//! Provides concrete implementations of NotificationSink:
//! - LogSink: leveled lines through the `log` facade
//! - JsonEventSink: NDJSON output for automation

mod json;
mod log_sink;

pub use json::JsonEventSink;
pub use log_sink::{LogSink, LOG_TARGET};
