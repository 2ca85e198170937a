//! # Multisink Logger
//!
//! A severity-leveled logging library that formats each call once and fans
//! it out to any number of named sinks.
//!
//! ## Features
//!
//! - **Eight levels**: emergency through debug, addressed by name or enum
//! - **Placeholders**: `{key}` tokens are filled from the call's context and
//!   leftover context is appended as compact JSON
//! - **Per-sink filtering**: level and channel allow-lists
//! - **Built-in sinks**: console (colored on terminals), file with
//!   size-based rotation, and email over SMTP
//! - **Custom sinks**: register a constructor and reference it by name
//! - **Best-effort delivery**: a failing sink never fails the logging call
//!
//! ```
//! use multisink_logger::prelude::*;
//!
//! let logger = Logger::builder()
//!     .sink("console", SinkConfig::with_engine("Console"))
//!     .build();
//!
//! logger
//!     .info("order {id} shipped", LogContext::new().with_field("id", 1042).with_channel("orders"))
//!     .unwrap();
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        FieldValue, LineFormatter, LogContext, LogEntry, LogFacade, LogLevel, Logger,
        LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Result, Sink, SinkConfig,
        SinkRegistry,
    };
    pub use crate::sinks::{ConsoleSink, EmailSink, FileSink, RotationPolicy};
}

pub use crate::core::{
    BuiltinEngine, FieldValue, LineFormatter, LogContext, LogEntry, LogFacade, LogLevel, Logger,
    LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Result, Sink, SinkConfig,
    SinkRegistry, DEFAULT_CHANNEL, DEFAULT_SINK,
};
pub use crate::sinks::{ConsoleSink, EmailSink, FileSink, RotationPolicy};
