//! Canonical line rendering
//!
//! Produces `[<Y-m-d H:i:s>] <channel> <LEVEL>: <message>[ <json-context>]`.
//! `{key}` placeholders in the message are replaced from the context; context
//! entries that no placeholder consumed are appended as a compact JSON object.

use super::log_context::LogContext;
use super::log_entry::LogEntry;
use super::log_level::LogLevel;
use chrono::{DateTime, Local};

/// Default timestamp layout, `2025-01-08 10:30:45`
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders entries into log lines.
///
/// Pure: the only input besides the entry is the strftime layout, so output is
/// deterministic for a fixed `entry.timestamp`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFormatter {
    timestamp_format: String,
}

impl Default for LineFormatter {
    fn default() -> Self {
        Self {
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl LineFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom strftime-compatible timestamp layout
    #[must_use]
    pub fn with_timestamp_format(mut self, format_str: impl Into<String>) -> Self {
        self.timestamp_format = format_str.into();
        self
    }

    pub fn timestamp_format(&self) -> &str {
        &self.timestamp_format
    }

    /// Render an entry without a trailing newline
    pub fn format(&self, entry: &LogEntry) -> String {
        self.render(
            &entry.timestamp,
            &entry.channel,
            entry.level,
            &entry.message,
            &entry.context,
        )
    }

    fn render(
        &self,
        timestamp: &DateTime<Local>,
        channel: &str,
        level: LogLevel,
        message: &str,
        context: &LogContext,
    ) -> String {
        let (message, remaining) = interpolate(message, context);
        let mut line = format!(
            "[{}] {} {}: {}",
            timestamp.format(&self.timestamp_format),
            channel,
            level.to_str(),
            message
        );

        if !remaining.is_empty() {
            // Serializing string keys and FieldValues cannot fail
            if let Ok(json) = serde_json::to_string(&remaining) {
                line.push(' ');
                line.push_str(&json);
            }
        }
        line
    }
}

/// Render a line for `level`, `message` and a raw `context`.
///
/// Reads the local clock for the timestamp; use [`format_at`] for
/// deterministic output. The `channel` key is resolved out of the context
/// (default `application`) and never appears in the JSON tail.
pub fn format(level: LogLevel, message: &str, context: &LogContext) -> String {
    format_at(level, message, context, Local::now())
}

/// Render a line stamped with `timestamp` instead of the current time
pub fn format_at(
    level: LogLevel,
    message: &str,
    context: &LogContext,
    timestamp: DateTime<Local>,
) -> String {
    let entry = LogEntry::new(level, message, context.clone()).with_timestamp(timestamp);
    LineFormatter::default().format(&entry)
}

/// Replace `{key}` tokens from `context` in a single left-to-right pass.
///
/// Returns the interpolated message and the context entries that no token
/// consumed. Tokens without a matching key are left verbatim, and text
/// substituted in is never rescanned.
pub fn interpolate(message: &str, context: &LogContext) -> (String, LogContext) {
    if context.is_empty() {
        return (message.to_string(), LogContext::new());
    }

    let mut out = String::with_capacity(message.len());
    let mut consumed: Vec<&str> = Vec::new();
    let mut rest = message;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find(['{', '}']) {
            Some(close) if after.as_bytes()[close] == b'}' => {
                let key = &after[..close];
                match context.get(key) {
                    Some(value) => {
                        out.push_str(&value.to_string());
                        if !consumed.contains(&key) {
                            consumed.push(key);
                        }
                    }
                    None => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    let remaining = context
        .iter()
        .filter(|(k, _)| !consumed.contains(k))
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();

    (out, remaining)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_entry(level: LogLevel, message: &str, context: LogContext) -> LogEntry {
        let ts = Local
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime");
        LogEntry::new(level, message, context).with_timestamp(ts)
    }

    #[test]
    fn test_format_at_is_deterministic() {
        let ts = Local
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime");
        let ctx = LogContext::new()
            .with_field("user", "alice")
            .with_channel("auth");

        let first = format_at(LogLevel::Info, "{user} signed in", &ctx, ts);
        let second = format_at(LogLevel::Info, "{user} signed in", &ctx, ts);
        assert_eq!(first, "[2025-01-08 10:30:45] auth INFO: alice signed in");
        assert_eq!(first, second);
    }

    #[test]
    fn test_plain_line() {
        let entry = fixed_entry(LogLevel::Error, "Something broke", LogContext::new());
        assert_eq!(
            LineFormatter::new().format(&entry),
            "[2025-01-08 10:30:45] application ERROR: Something broke"
        );
    }

    #[test]
    fn test_placeholders_consumed() {
        let ctx = LogContext::new().with_field("value", "emergency");
        let entry = fixed_entry(LogLevel::Emergency, "This is an {value}", ctx);
        assert_eq!(
            LineFormatter::new().format(&entry),
            "[2025-01-08 10:30:45] application EMERGENCY: This is an emergency"
        );
    }

    #[test]
    fn test_unused_context_appended_as_json() {
        let ctx = LogContext::new()
            .with_field("id", 42)
            .with_field("user", "alice")
            .with_channel("payments");
        let entry = fixed_entry(LogLevel::Info, "Order {id} placed", ctx);
        assert_eq!(
            LineFormatter::new().format(&entry),
            r#"[2025-01-08 10:30:45] payments INFO: Order 42 placed {"user":"alice"}"#
        );
    }

    #[test]
    fn test_unmatched_tokens_verbatim() {
        let ctx = LogContext::new().with_field("a", 1);
        let (out, rest) = interpolate("{a} {b} {a} {", &ctx);
        assert_eq!(out, "1 {b} 1 {");
        assert!(rest.is_empty());
    }

    #[test]
    fn test_substituted_text_not_rescanned() {
        let ctx = LogContext::new()
            .with_field("a", "{b}")
            .with_field("b", "nope");
        let (out, rest) = interpolate("x={a}", &ctx);
        assert_eq!(out, "x={b}");
        assert_eq!(rest.len(), 1);
        assert!(rest.get("b").is_some());
    }

    #[test]
    fn test_nested_braces() {
        let ctx = LogContext::new().with_field("k", "v");
        let (out, _) = interpolate("{{k}}", &ctx);
        assert_eq!(out, "{v}");
    }

    #[test]
    fn test_custom_timestamp_format() {
        let entry = fixed_entry(LogLevel::Debug, "m", LogContext::new());
        let line = LineFormatter::new()
            .with_timestamp_format("%d/%m/%Y")
            .format(&entry);
        assert_eq!(line, "[08/01/2025] application DEBUG: m");
    }

    #[test]
    fn test_format_free_function() {
        let line = format(
            LogLevel::Warning,
            "disk {pct}% full",
            &LogContext::new().with_field("pct", 91).with_channel("ops"),
        );
        assert!(line.contains("] ops WARNING: disk 91% full"));
        assert!(!line.contains("channel"));
    }
}
