//! Log entry structure

use super::log_context::LogContext;
use super::log_level::LogLevel;
use chrono::{DateTime, Local};
use serde::Serialize;

/// One dispatched log call.
///
/// The dispatcher builds a single entry per call and hands the same entry to
/// every matching sink, so all sinks render an identical line.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub channel: String,
    /// Context with the `channel` key already removed
    pub context: LogContext,
    pub timestamp: DateTime<Local>,
}

impl LogEntry {
    /// Build an entry, resolving the channel out of `context`
    pub fn new(level: LogLevel, message: impl Into<String>, mut context: LogContext) -> Self {
        let channel = context.take_channel();
        Self {
            level,
            message: message.into(),
            channel,
            context,
            timestamp: Local::now(),
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
