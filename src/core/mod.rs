//! Core logger types and traits

pub mod config;
pub mod error;
pub mod facade;
pub mod formatter;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod registry;
pub mod sink;

pub use config::{parse_size, parse_size_str, LoggerConfig, SinkConfig};
pub use error::{LoggerError, Result};
pub use facade::LogFacade;
pub use formatter::{format_at, interpolate, LineFormatter, DEFAULT_TIMESTAMP_FORMAT};
pub use log_context::{FieldValue, LogContext, CHANNEL_KEY, DEFAULT_CHANNEL};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder, DEFAULT_SINK};
pub use metrics::LoggerMetrics;
pub use registry::{BuiltinEngine, SinkConstructor, SinkRegistry};
pub use sink::Sink;
