//! Sink and logger configuration
//!
//! A [`SinkConfig`] is a loosely typed bag of options, mirroring the JSON a
//! deployment would ship: the reserved keys `engine`, `className`, `levels`
//! and `channels`, plus whatever keys the chosen engine reads. Engines pull
//! their options through the typed accessors, which turn type mismatches into
//! configuration errors at construction time.

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;

const MEGABYTE: u64 = 1_048_576;
const GIGABYTE: u64 = 1_073_741_824;

/// Configuration for one named sink
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Shorthand engine token, e.g. `File`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,

    /// Name of a custom constructor registered with the sink registry
    #[serde(default, rename = "className", skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,

    /// Level allow-list; empty accepts every level
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub levels: Vec<String>,

    /// Channel allow-list; empty accepts every channel
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub channels: Vec<String>,

    /// Engine-specific keys
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

impl SinkConfig {
    /// Config resolved through an engine token (`Console`, `File`, `Email`, or a registered name)
    pub fn with_engine(engine: impl Into<String>) -> Self {
        Self {
            engine: Some(engine.into()),
            ..Self::default()
        }
    }

    /// Config resolved through a custom constructor name
    pub fn with_class(class_name: impl Into<String>) -> Self {
        Self {
            class_name: Some(class_name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_levels<I, S>(mut self, levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.levels = levels.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_channels<I, S>(mut self, channels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.channels = channels.into_iter().map(Into::into).collect();
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.options.get(key).filter(|v| !v.is_null())
    }

    /// String option; a non-string value is a configuration error
    pub fn string(&self, key: &str) -> Result<Option<&str>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(LoggerError::config(
                key,
                format!("expected a string, got `{}`", other),
            )),
        }
    }

    /// Unsigned integer option; accepts numbers and digit-only strings
    pub fn unsigned(&self, key: &str) -> Result<Option<u64>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Number(n)) => n.as_u64().map(Some).ok_or_else(|| {
                LoggerError::config(key, format!("expected a non-negative integer, got `{}`", n))
            }),
            Some(Value::String(s)) => s.trim().parse::<u64>().map(Some).map_err(|_| {
                LoggerError::config(key, format!("expected a non-negative integer, got `{}`", s))
            }),
            Some(other) => Err(LoggerError::config(
                key,
                format!("expected a non-negative integer, got `{}`", other),
            )),
        }
    }

    pub fn boolean(&self, key: &str) -> Result<Option<bool>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(LoggerError::config(
                key,
                format!("expected a boolean, got `{}`", other),
            )),
        }
    }

    /// Parsed level allow-list
    pub fn level_filter(&self) -> Result<Vec<LogLevel>> {
        self.levels
            .iter()
            .map(|name| {
                name.parse::<LogLevel>()
                    .map_err(|_| LoggerError::config("levels", format!("Invalid level `{}`", name)))
            })
            .collect()
    }
}

/// Parse a `size` option: a byte count, or `<digits>MB` / `<digits>GB`.
pub fn parse_size(value: &Value) -> Result<u64> {
    match value {
        Value::Number(n) => n.as_u64().ok_or_else(|| LoggerError::invalid_size(n)),
        Value::String(s) => parse_size_str(s),
        other => Err(LoggerError::invalid_size(other)),
    }
}

/// String form of [`parse_size`]
pub fn parse_size_str(value: &str) -> Result<u64> {
    let (digits, multiplier) = if let Some(d) = value.strip_suffix("GB") {
        (d, GIGABYTE)
    } else if let Some(d) = value.strip_suffix("MB") {
        (d, MEGABYTE)
    } else {
        (value, 1)
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LoggerError::invalid_size(value));
    }

    digits
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_mul(multiplier))
        .ok_or_else(|| LoggerError::invalid_size(value))
}

/// Named sink configurations in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoggerConfig {
    sinks: Vec<(String, SinkConfig)>,
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert)
    #[must_use]
    pub fn with_sink(mut self, name: impl Into<String>, config: SinkConfig) -> Self {
        self.insert(name, config);
        self
    }

    /// Insert or replace a named sink; a replaced sink keeps its position
    pub fn insert(&mut self, name: impl Into<String>, config: SinkConfig) {
        let name = name.into();
        match self.sinks.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = config,
            None => self.sinks.push((name, config)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<SinkConfig> {
        let idx = self.sinks.iter().position(|(n, _)| n == name)?;
        Some(self.sinks.remove(idx).1)
    }

    pub fn get(&self, name: &str) -> Option<&SinkConfig> {
        self.sinks.iter().find(|(n, _)| n == name).map(|(_, c)| c)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SinkConfig)> {
        self.sinks.iter().map(|(n, c)| (n.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn clear(&mut self) {
        self.sinks.clear();
    }

    /// Parse a JSON object of `name -> sink config`, keeping declaration order
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading logger configuration",
                format!("Failed to read '{}'", path.display()),
                e,
            )
        })?;
        Self::from_json_str(&raw)
    }
}

impl Serialize for LoggerConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sinks.len()))?;
        for (name, config) in &self.sinks {
            map.serialize_entry(name, config)?;
        }
        map.end()
    }
}

struct LoggerConfigVisitor;

impl<'de> Visitor<'de> for LoggerConfigVisitor {
    type Value = LoggerConfig;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of sink names to sink configurations")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
        let mut config = LoggerConfig::new();
        while let Some((name, sink)) = access.next_entry::<String, SinkConfig>()? {
            config.insert(name, sink);
        }
        Ok(config)
    }
}

impl<'de> Deserialize<'de> for LoggerConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(LoggerConfigVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_size_forms() {
        assert_eq!(parse_size(&json!(1024)).unwrap(), 1024);
        assert_eq!(parse_size(&json!("2048")).unwrap(), 2048);
        assert_eq!(parse_size(&json!("10MB")).unwrap(), 10_485_760);
        assert_eq!(parse_size(&json!("1GB")).unwrap(), 1_073_741_824);
    }

    #[test]
    fn test_parse_size_rejects_garbage() {
        for bad in ["1 foo", "MB", "10 MB", "-5", "1.5MB", "", "10KB", "10mb", "1gb", "5Mb"] {
            let err = parse_size_str(bad).unwrap_err();
            assert!(err.is_configuration(), "{} should be rejected", bad);
        }
        assert!(parse_size(&json!(-1)).is_err());
        assert!(parse_size(&json!(true)).is_err());
    }

    #[test]
    fn test_sink_config_from_json() {
        let config: SinkConfig = serde_json::from_value(json!({
            "engine": "File",
            "file": "/tmp/app.log",
            "size": "10MB",
            "rotate": 3,
            "levels": ["error", "critical"],
            "channels": ["payments"]
        }))
        .unwrap();

        assert_eq!(config.engine.as_deref(), Some("File"));
        assert_eq!(config.string("file").unwrap(), Some("/tmp/app.log"));
        assert_eq!(config.unsigned("rotate").unwrap(), Some(3));
        assert_eq!(
            config.level_filter().unwrap(),
            vec![LogLevel::Error, LogLevel::Critical]
        );
        assert_eq!(config.channels, vec!["payments".to_string()]);
        assert!(!config.options.contains_key("levels"));
    }

    #[test]
    fn test_class_name_key() {
        let config: SinkConfig = serde_json::from_value(json!({ "className": "memory" })).unwrap();
        assert_eq!(config.class_name.as_deref(), Some("memory"));
    }

    #[test]
    fn test_typed_accessor_mismatch() {
        let config = SinkConfig::with_engine("File").with_option("file", 12);
        assert!(config.string("file").unwrap_err().is_configuration());

        let config = SinkConfig::with_engine("Email").with_option("debug", "yes");
        assert!(config.boolean("debug").is_err());
    }

    #[test]
    fn test_invalid_level_in_filter() {
        let config = SinkConfig::with_engine("Console").with_levels(["debug", "verbose"]);
        assert!(config.level_filter().unwrap_err().is_configuration());
    }

    #[test]
    fn test_level_filter_rejects_uppercase() {
        let config = SinkConfig::with_engine("Console").with_levels(["CRITICAL"]);
        assert!(config.level_filter().unwrap_err().is_configuration());
    }

    #[test]
    fn test_logger_config_keeps_declaration_order() {
        let config = LoggerConfig::from_json_str(
            r#"{
                "zulu": { "engine": "Console" },
                "alpha": { "engine": "Console" },
                "mike": { "engine": "Console" }
            }"#,
        )
        .unwrap();

        let names: Vec<&str> = config.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["zulu", "alpha", "mike"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut config = LoggerConfig::new()
            .with_sink("a", SinkConfig::with_engine("Console"))
            .with_sink("b", SinkConfig::with_engine("Console"));
        config.insert("a", SinkConfig::with_engine("File"));

        let names: Vec<&str> = config.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(config.get("a").unwrap().engine.as_deref(), Some("File"));
    }
}
