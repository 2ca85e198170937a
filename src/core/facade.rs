//! Application-level logging context
//!
//! A [`LogFacade`] is created once at startup and handed to whatever needs to
//! log. It owns the sink configuration and a lazily built [`Logger`]; every
//! configuration change drops the cached logger so the next call rebuilds it.

use super::{
    config::{LoggerConfig, SinkConfig},
    error::Result,
    log_context::LogContext,
    log_level::LogLevel,
    logger::Logger,
    registry::SinkRegistry,
    sink::Sink,
};
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::Arc;

/// Shared entry point for application logging
///
/// # Example
///
/// ```
/// use multisink_logger::prelude::*;
///
/// let log = LogFacade::new();
/// log.config("console", SinkConfig::with_engine("Console").with_option("stream", "stdout"));
///
/// log.info("worker {id} started", LogContext::new().with_field("id", 3)).unwrap();
/// log.write("warning", "queue is {pct}% full", LogContext::new().with_field("pct", 91)).unwrap();
///
/// log.reset();
/// assert!(log.configured().is_empty());
/// ```
#[derive(Default)]
pub struct LogFacade {
    config: RwLock<LoggerConfig>,
    registry: RwLock<SinkRegistry>,
    logger: Mutex<Option<Arc<Logger>>>,
}

impl LogFacade {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: LoggerConfig) -> Self {
        Self {
            config: RwLock::new(config),
            ..Self::default()
        }
    }

    /// Add or replace a named sink
    pub fn config(&self, name: impl Into<String>, config: SinkConfig) {
        self.config.write().insert(name, config);
        self.invalidate();
    }

    /// Remove a named sink, returning whether it was configured
    pub fn drop_config(&self, name: &str) -> bool {
        let removed = self.config.write().remove(name).is_some();
        if removed {
            self.invalidate();
        }
        removed
    }

    /// Names of the configured sinks
    pub fn configured(&self) -> Vec<String> {
        self.config
            .read()
            .iter()
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// Register a custom sink constructor for `className`/`engine` lookups
    pub fn register<F>(&self, name: impl Into<String>, constructor: F)
    where
        F: Fn(&SinkConfig) -> Result<Box<dyn Sink>> + Send + Sync + 'static,
    {
        self.registry.write().register(name, constructor);
        self.invalidate();
    }

    /// The current logger, built from the configuration if needed
    pub fn logger(&self) -> Arc<Logger> {
        let mut slot = self.logger.lock();
        if let Some(logger) = slot.as_ref() {
            return Arc::clone(logger);
        }

        let logger = Arc::new(
            Logger::builder()
                .config(self.config.read().clone())
                .registry(self.registry.read().clone())
                .build(),
        );
        *slot = Some(Arc::clone(&logger));
        logger
    }

    /// Log at a level given by name or as a [`LogLevel`]
    pub fn write(
        &self,
        level: impl AsRef<str>,
        message: impl fmt::Display,
        context: LogContext,
    ) -> Result<()> {
        self.logger().log(level, message, context)
    }

    /// Run `f` against a configured sink
    pub fn with_sink<R>(&self, name: &str, f: impl FnOnce(&mut dyn Sink) -> R) -> Result<R> {
        let logger = self.logger();
        let mut sink = logger.sink(name)?;
        let result = f(&mut *sink);
        Ok(result)
    }

    /// Clear every sink, custom constructor and the cached logger
    pub fn reset(&self) {
        self.config.write().clear();
        *self.registry.write() = SinkRegistry::new();
        self.invalidate();
    }

    fn invalidate(&self) {
        self.logger.lock().take();
    }

    pub fn emergency(&self, message: impl fmt::Display, context: LogContext) -> Result<()> {
        self.write(LogLevel::Emergency, message, context)
    }

    pub fn alert(&self, message: impl fmt::Display, context: LogContext) -> Result<()> {
        self.write(LogLevel::Alert, message, context)
    }

    pub fn critical(&self, message: impl fmt::Display, context: LogContext) -> Result<()> {
        self.write(LogLevel::Critical, message, context)
    }

    pub fn error(&self, message: impl fmt::Display, context: LogContext) -> Result<()> {
        self.write(LogLevel::Error, message, context)
    }

    pub fn warning(&self, message: impl fmt::Display, context: LogContext) -> Result<()> {
        self.write(LogLevel::Warning, message, context)
    }

    pub fn notice(&self, message: impl fmt::Display, context: LogContext) -> Result<()> {
        self.write(LogLevel::Notice, message, context)
    }

    pub fn info(&self, message: impl fmt::Display, context: LogContext) -> Result<()> {
        self.write(LogLevel::Info, message, context)
    }

    pub fn debug(&self, message: impl fmt::Display, context: LogContext) -> Result<()> {
        self.write(LogLevel::Debug, message, context)
    }
}

impl fmt::Debug for LogFacade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogFacade")
            .field("configured", &self.configured())
            .field("cached", &self.logger.lock().is_some())
            .finish()
    }
}
