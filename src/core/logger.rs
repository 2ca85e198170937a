//! Dispatcher routing each log call to the matching configured sinks

use super::{
    config::{LoggerConfig, SinkConfig},
    error::{LoggerError, Result},
    log_context::LogContext,
    log_entry::LogEntry,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    registry::SinkRegistry,
    sink::Sink,
};
use parking_lot::{MappedMutexGuard, Mutex, MutexGuard, RwLock};
use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Name given to the sink passed to [`Logger::with_config`]
pub const DEFAULT_SINK: &str = "default";

/// Failures are reported on the first occurrence and every this many after
const FAILURE_ALERT_INTERVAL: u64 = 1000;

thread_local! {
    /// Loggers currently dispatching on this thread, by address
    static DISPATCHING: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// Marks a logger as dispatching on the current thread until dropped
struct DispatchGuard(usize);

impl DispatchGuard {
    /// `None` if `logger` is already dispatching on this thread
    fn enter(logger: &Logger) -> Option<Self> {
        let key = logger as *const Logger as usize;
        DISPATCHING.with(|active| {
            let mut active = active.borrow_mut();
            if active.contains(&key) {
                None
            } else {
                active.push(key);
                Some(DispatchGuard(key))
            }
        })
    }
}

impl Drop for DispatchGuard {
    fn drop(&mut self) {
        let key = self.0;
        let _ = DISPATCHING.try_with(|active| active.borrow_mut().retain(|k| *k != key));
    }
}

/// A constructed sink together with its allow-lists
struct LoadedSink {
    name: String,
    levels: Vec<LogLevel>,
    channels: Vec<String>,
    sink: Box<dyn Sink>,
}

impl LoadedSink {
    fn accepts(&self, level: LogLevel, channel: &str) -> bool {
        (self.levels.is_empty() || self.levels.contains(&level))
            && (self.channels.is_empty() || self.channels.iter().any(|c| c == channel))
    }
}

/// Routes log calls to named sinks.
///
/// Sinks are built from their [`SinkConfig`] on first use and rebuilt after
/// any configuration change. Each call is rendered once and handed to every
/// sink whose level and channel allow-lists accept it, in configuration
/// order. Delivery failures are counted in [`LoggerMetrics`] and never
/// returned; invalid levels and configuration errors always are.
///
/// One lock covers the whole fan-out, so concurrent callers wait for the
/// slowest sink of the call ahead of them (an SMTP send can block for the
/// mail transport's timeout). A sink that logs through the logger currently
/// dispatching to it gets [`LoggerError::Reentrant`] instead of a deadlock.
///
/// # Example
///
/// ```
/// use multisink_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .sink("errors", SinkConfig::with_engine("Console").with_levels(["error", "critical"]))
///     .build();
///
/// logger.error("disk {disk} is full", LogContext::new().with_field("disk", "/var")).unwrap();
/// assert!(logger.log("verbose", "nope", LogContext::new()).is_err());
/// ```
pub struct Logger {
    config: RwLock<LoggerConfig>,
    registry: SinkRegistry,
    /// `None` until the sinks are built; reset by every configuration change
    loaded: Mutex<Option<Vec<LoadedSink>>>,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Logger with no sinks configured
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(LoggerConfig::new())
    }

    /// Logger over a set of named sinks, built lazily on the first call
    #[must_use]
    pub fn from_config(config: LoggerConfig) -> Self {
        Self::with_registry(config, SinkRegistry::new())
    }

    /// Logger resolving engines through a registry with custom sinks
    #[must_use]
    pub fn with_registry(config: LoggerConfig, registry: SinkRegistry) -> Self {
        Self {
            config: RwLock::new(config),
            registry,
            loaded: Mutex::new(None),
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    /// Logger with one sink named `default`, built immediately so that
    /// configuration errors surface here rather than on the first call
    pub fn with_config(config: SinkConfig) -> Result<Self> {
        let logger = Self::from_config(LoggerConfig::new().with_sink(DEFAULT_SINK, config));
        logger.load()?;
        Ok(logger)
    }

    /// Insert or replace a named sink; loaded sinks are discarded
    pub fn configure(&self, name: impl Into<String>, config: SinkConfig) {
        self.config.write().insert(name, config);
        self.invalidate();
    }

    /// Remove a named sink; loaded sinks are discarded if it existed
    pub fn remove(&self, name: &str) -> Option<SinkConfig> {
        let removed = self.config.write().remove(name);
        if removed.is_some() {
            self.invalidate();
        }
        removed
    }

    /// Snapshot of the current configuration
    pub fn config(&self) -> LoggerConfig {
        self.config.read().clone()
    }

    /// Build every configured sink now if they are not already loaded
    pub fn load(&self) -> Result<()> {
        let mut loaded = self.loaded.lock();
        if loaded.is_none() {
            *loaded = Some(self.build_sinks()?);
        }
        Ok(())
    }

    /// Whether the sinks are currently built
    pub fn is_loaded(&self) -> bool {
        self.loaded.lock().is_some()
    }

    fn invalidate(&self) {
        // Dropping the sinks releases their files and streams
        self.loaded.lock().take();
    }

    fn build_sinks(&self) -> Result<Vec<LoadedSink>> {
        let config = self.config.read();
        config
            .iter()
            .map(|(name, sink_config)| {
                Ok(LoadedSink {
                    name: name.to_string(),
                    levels: sink_config.level_filter()?,
                    channels: sink_config.channels.clone(),
                    sink: self.registry.build(name, sink_config)?,
                })
            })
            .collect()
    }

    /// Log `message` at `level`, given as a canonical name or a [`LogLevel`].
    ///
    /// An unknown level fails with [`LoggerError::InvalidLevel`] before any
    /// sink is touched. Placeholders `{key}` in the message are replaced from
    /// `context`, and a `channel` entry selects the channel.
    pub fn log(
        &self,
        level: impl AsRef<str>,
        message: impl fmt::Display,
        context: LogContext,
    ) -> Result<()> {
        let level: LogLevel = level.as_ref().parse()?;
        self.dispatch(level, message.to_string(), context)
    }

    fn dispatch(&self, level: LogLevel, message: String, context: LogContext) -> Result<()> {
        let _guard = DispatchGuard::enter(self).ok_or(LoggerError::Reentrant)?;
        let mut loaded = self.loaded.lock();
        if loaded.is_none() {
            *loaded = Some(self.build_sinks()?);
        }
        let sinks = loaded.get_or_insert_with(Vec::new);

        self.metrics.record_call();
        let entry = LogEntry::new(level, message, context);

        for loaded_sink in sinks.iter_mut() {
            if !loaded_sink.accepts(level, &entry.channel) {
                self.metrics.record_filtered();
                continue;
            }
            Self::deliver(loaded_sink, &entry, &self.metrics);
        }
        Ok(())
    }

    /// Hand one entry to one sink, isolating its errors and panics
    fn deliver(loaded_sink: &mut LoadedSink, entry: &LogEntry, metrics: &LoggerMetrics) {
        let result = panic::catch_unwind(AssertUnwindSafe(|| loaded_sink.sink.log(entry)));

        let failure = match result {
            Ok(Ok(())) => {
                metrics.record_delivered();
                return;
            }
            Ok(Err(e)) => e.to_string(),
            Err(panic_info) => format!("panicked: {}", panic_message(&*panic_info)),
        };

        let previous = metrics.record_failed();
        if previous == 0 || (previous + 1) % FAILURE_ALERT_INTERVAL == 0 {
            eprintln!(
                "[LOGGER WARN] Sink `{}` failed ({} failures so far): {}",
                loaded_sink.name,
                previous + 1,
                failure
            );
        }
    }

    /// Borrow a configured sink, building the sinks if needed.
    ///
    /// Fails with [`LoggerError::SinkNotFound`] if `name` was never
    /// configured. The dispatcher is blocked while the guard is held, so
    /// logging through this logger on the same thread deadlocks.
    pub fn sink(&self, name: &str) -> Result<MappedMutexGuard<'_, dyn Sink>> {
        if !self.config.read().contains(name) {
            return Err(LoggerError::not_found(name));
        }

        let mut loaded = self.loaded.lock();
        if loaded.is_none() {
            *loaded = Some(self.build_sinks()?);
        }

        MutexGuard::try_map(loaded, |slot| {
            slot.as_mut()
                .and_then(|sinks| sinks.iter_mut().find(|s| s.name == name))
                .map(|s| s.sink.as_mut())
        })
        .map_err(|_| LoggerError::not_found(name))
    }

    /// Names of the configured sinks in dispatch order
    pub fn sink_names(&self) -> Vec<String> {
        self.config
            .read()
            .iter()
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// Get the logger metrics for detailed observability
    ///
    /// # Example
    ///
    /// ```
    /// use multisink_logger::prelude::*;
    ///
    /// let logger = Logger::new();
    /// logger.info("nobody is listening", LogContext::new()).unwrap();
    ///
    /// let metrics = logger.metrics();
    /// assert_eq!(metrics.calls(), 1);
    /// assert_eq!(metrics.delivered_count(), 0);
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Flush every loaded sink, returning the first failure
    pub fn flush(&self) -> Result<()> {
        let mut loaded = self.loaded.lock();
        let mut first_error = None;
        for loaded_sink in loaded.iter_mut().flatten() {
            if let Err(e) = loaded_sink.sink.flush() {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    #[inline]
    pub fn emergency(&self, message: impl fmt::Display, context: LogContext) -> Result<()> {
        self.dispatch(LogLevel::Emergency, message.to_string(), context)
    }

    #[inline]
    pub fn alert(&self, message: impl fmt::Display, context: LogContext) -> Result<()> {
        self.dispatch(LogLevel::Alert, message.to_string(), context)
    }

    #[inline]
    pub fn critical(&self, message: impl fmt::Display, context: LogContext) -> Result<()> {
        self.dispatch(LogLevel::Critical, message.to_string(), context)
    }

    #[inline]
    pub fn error(&self, message: impl fmt::Display, context: LogContext) -> Result<()> {
        self.dispatch(LogLevel::Error, message.to_string(), context)
    }

    #[inline]
    pub fn warning(&self, message: impl fmt::Display, context: LogContext) -> Result<()> {
        self.dispatch(LogLevel::Warning, message.to_string(), context)
    }

    #[inline]
    pub fn notice(&self, message: impl fmt::Display, context: LogContext) -> Result<()> {
        self.dispatch(LogLevel::Notice, message.to_string(), context)
    }

    #[inline]
    pub fn info(&self, message: impl fmt::Display, context: LogContext) -> Result<()> {
        self.dispatch(LogLevel::Info, message.to_string(), context)
    }

    #[inline]
    pub fn debug(&self, message: impl fmt::Display, context: LogContext) -> Result<()> {
        self.dispatch(LogLevel::Debug, message.to_string(), context)
    }
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("sinks", &self.sink_names())
            .field("loaded", &self.is_loaded())
            .field("metrics", &self.metrics)
            .finish()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER WARN] Failed to flush sinks during shutdown: {}", e);
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use multisink_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .sink("console", SinkConfig::with_engine("Console"))
///     .sink(
///         "payments",
///         SinkConfig::with_engine("Console")
///             .with_option("stream", "stdout")
///             .with_channels(["payments"]),
///     )
///     .build();
///
/// assert_eq!(logger.sink_names(), vec!["console", "payments"]);
/// ```
#[derive(Debug, Default)]
pub struct LoggerBuilder {
    config: LoggerConfig,
    registry: SinkRegistry,
}

impl LoggerBuilder {
    /// Create a new builder with no sinks
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a named sink
    #[must_use = "builder methods return a new value"]
    pub fn sink(mut self, name: impl Into<String>, config: SinkConfig) -> Self {
        self.config.insert(name, config);
        self
    }

    /// Replace the whole configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Register a custom sink constructor
    #[must_use = "builder methods return a new value"]
    pub fn register<F>(mut self, name: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(&SinkConfig) -> Result<Box<dyn Sink>> + Send + Sync + 'static,
    {
        self.registry.register(name, constructor);
        self
    }

    /// Replace the registry
    #[must_use = "builder methods return a new value"]
    pub fn registry(mut self, registry: SinkRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Build the Logger; sinks are constructed on first use
    pub fn build(self) -> Logger {
        Logger::with_registry(self.config, self.registry)
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::formatter::LineFormatter;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Weak;

    /// Renders into a shared buffer and counts constructions
    #[derive(Clone, Default)]
    struct Recorder {
        lines: Arc<Mutex<Vec<String>>>,
        built: Arc<AtomicUsize>,
    }

    impl Recorder {
        fn lines(&self) -> Vec<String> {
            self.lines.lock().clone()
        }

        fn builds(&self) -> usize {
            self.built.load(Ordering::SeqCst)
        }

        fn registry(&self) -> SinkRegistry {
            let recorder = self.clone();
            let mut registry = SinkRegistry::new();
            registry.register("Recording", move |_config| {
                recorder.built.fetch_add(1, Ordering::SeqCst);
                Ok(Box::new(RecordingSink {
                    lines: Arc::clone(&recorder.lines),
                }) as Box<dyn Sink>)
            });
            registry.register("Failing", |_config| Ok(Box::new(FailingSink) as Box<dyn Sink>));
            registry.register("Panicking", |_config| {
                Ok(Box::new(PanickingSink) as Box<dyn Sink>)
            });
            registry
        }
    }

    struct RecordingSink {
        lines: Arc<Mutex<Vec<String>>>,
    }

    impl Sink for RecordingSink {
        fn log(&mut self, entry: &LogEntry) -> Result<()> {
            self.lines.lock().push(LineFormatter::new().format(entry));
            Ok(())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    struct FailingSink;

    impl Sink for FailingSink {
        fn log(&mut self, _entry: &LogEntry) -> Result<()> {
            Err(LoggerError::writer("device unavailable"))
        }

        fn flush(&mut self) -> Result<()> {
            Err(LoggerError::writer("device unavailable"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct PanickingSink;

    impl Sink for PanickingSink {
        fn log(&mut self, _entry: &LogEntry) -> Result<()> {
            panic!("sink exploded");
        }

        fn name(&self) -> &str {
            "panicking"
        }
    }

    /// Logs back through the logger that owns it
    struct EchoSink {
        logger: Arc<Mutex<Weak<Logger>>>,
        nested: Arc<Mutex<Option<Result<()>>>>,
    }

    impl Sink for EchoSink {
        fn log(&mut self, _entry: &LogEntry) -> Result<()> {
            if let Some(logger) = self.logger.lock().upgrade() {
                *self.nested.lock() = Some(logger.info("echo", LogContext::new()));
            }
            Ok(())
        }

        fn name(&self) -> &str {
            "echo"
        }
    }

    fn recording() -> SinkConfig {
        SinkConfig::with_class("Recording")
    }

    #[test]
    fn test_sink_logging_through_own_logger_is_rejected() {
        let handle: Arc<Mutex<Weak<Logger>>> = Arc::new(Mutex::new(Weak::new()));
        let nested: Arc<Mutex<Option<Result<()>>>> = Arc::new(Mutex::new(None));

        let (sink_handle, sink_nested) = (Arc::clone(&handle), Arc::clone(&nested));
        let logger = Arc::new(
            Logger::builder()
                .register("Echo", move |_config| {
                    Ok(Box::new(EchoSink {
                        logger: Arc::clone(&sink_handle),
                        nested: Arc::clone(&sink_nested),
                    }) as Box<dyn Sink>)
                })
                .sink("echo", SinkConfig::with_class("Echo"))
                .build(),
        );
        *handle.lock() = Arc::downgrade(&logger);

        logger.info("outer", LogContext::new()).unwrap();
        assert!(matches!(*nested.lock(), Some(Err(LoggerError::Reentrant))));
        assert_eq!(logger.metrics().calls(), 1);
        assert_eq!(logger.metrics().delivered_count(), 1);

        // The guard is released once the outer call returns
        logger.info("again", LogContext::new()).unwrap();
        assert_eq!(logger.metrics().calls(), 2);
    }

    #[test]
    fn test_sink_may_log_through_another_logger() {
        let recorder = Recorder::default();
        let inner = Arc::new(
            Logger::builder()
                .registry(recorder.registry())
                .sink("a", recording())
                .build(),
        );
        let nested: Arc<Mutex<Option<Result<()>>>> = Arc::new(Mutex::new(None));

        let (target, sink_nested) = (Arc::clone(&inner), Arc::clone(&nested));
        let outer = Logger::builder()
            .register("Echo", move |_config| {
                Ok(Box::new(EchoSink {
                    logger: Arc::new(Mutex::new(Arc::downgrade(&target))),
                    nested: Arc::clone(&sink_nested),
                }) as Box<dyn Sink>)
            })
            .sink("echo", SinkConfig::with_class("Echo"))
            .build();

        outer.info("outer", LogContext::new()).unwrap();
        assert!(matches!(*nested.lock(), Some(Ok(()))));
        assert_eq!(recorder.lines().len(), 1);
    }

    #[test]
    fn test_fan_out_renders_identical_lines() {
        let recorder = Recorder::default();
        let logger = Logger::builder()
            .registry(recorder.registry())
            .sink("a", recording())
            .sink("b", recording())
            .sink("c", recording())
            .build();

        logger
            .warning("user {id} locked", LogContext::new().with_field("id", 7))
            .unwrap();

        let lines = recorder.lines();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l == &lines[0]));
        assert!(lines[0].ends_with("application WARNING: user 7 locked"));
        assert_eq!(logger.metrics().delivered_count(), 3);
    }

    #[test]
    fn test_invalid_level_touches_no_sink() {
        let recorder = Recorder::default();
        let logger = Logger::builder()
            .registry(recorder.registry())
            .sink("a", recording())
            .build();

        let err = logger.log("foo", "message", LogContext::new()).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidLevel { ref level } if level == "foo"));
        assert_eq!(recorder.builds(), 0);
        assert!(recorder.lines().is_empty());
        assert_eq!(logger.metrics().calls(), 0);
    }

    #[test]
    fn test_level_names_must_be_lowercase() {
        let recorder = Recorder::default();
        let logger = Logger::builder()
            .registry(recorder.registry())
            .sink("a", recording())
            .build();

        for name in ["NOTICE", "Debug"] {
            let err = logger.log(name, "a", LogContext::new()).unwrap_err();
            assert!(matches!(err, LoggerError::InvalidLevel { .. }));
        }
        assert!(recorder.lines().is_empty());

        logger.log("notice", "b", LogContext::new()).unwrap();
        assert_eq!(recorder.lines().len(), 1);
    }

    #[test]
    fn test_level_filter() {
        let recorder = Recorder::default();
        let logger = Logger::builder()
            .registry(recorder.registry())
            .sink("critical_only", recording().with_levels(["critical"]))
            .build();

        logger.debug("quiet", LogContext::new()).unwrap();
        logger.critical("loud", LogContext::new()).unwrap();

        let lines = recorder.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("CRITICAL: loud"));
        assert_eq!(logger.metrics().filtered_count(), 1);
    }

    #[test]
    fn test_channel_filter() {
        let recorder = Recorder::default();
        let logger = Logger::builder()
            .registry(recorder.registry())
            .sink("payments", recording().with_channels(["payments"]))
            .build();

        logger.info("default channel", LogContext::new()).unwrap();
        logger
            .info("charged", LogContext::new().with_channel("payments"))
            .unwrap();

        let lines = recorder.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("] payments INFO: charged"));
    }

    #[test]
    fn test_sinks_built_lazily_once() {
        let recorder = Recorder::default();
        let logger = Logger::builder()
            .registry(recorder.registry())
            .sink("a", recording())
            .build();

        assert!(!logger.is_loaded());
        logger.info("one", LogContext::new()).unwrap();
        logger.info("two", LogContext::new()).unwrap();
        assert!(logger.is_loaded());
        assert_eq!(recorder.builds(), 1);
    }

    #[test]
    fn test_configure_invalidates_loaded_sinks() {
        let recorder = Recorder::default();
        let logger = Logger::builder()
            .registry(recorder.registry())
            .sink("a", recording())
            .build();

        logger.info("one", LogContext::new()).unwrap();
        logger.configure("b", recording());
        assert!(!logger.is_loaded());

        logger.info("two", LogContext::new()).unwrap();
        assert_eq!(recorder.builds(), 3);
        assert_eq!(recorder.lines().len(), 3);

        assert!(logger.remove("b").is_some());
        assert!(logger.remove("b").is_none());
        logger.info("three", LogContext::new()).unwrap();
        assert_eq!(recorder.lines().len(), 4);
    }

    #[test]
    fn test_unresolvable_engine_surfaces_on_first_use() {
        let logger = Logger::builder()
            .sink("x", SinkConfig::with_engine("Syslog"))
            .build();

        let err = logger.info("m", LogContext::new()).unwrap_err();
        assert!(matches!(err, LoggerError::SinkResolution { .. }));
        assert!(!logger.is_loaded());
    }

    #[test]
    fn test_with_config_loads_eagerly() {
        let err = Logger::with_config(SinkConfig::with_engine("Syslog")).unwrap_err();
        assert!(matches!(err, LoggerError::SinkResolution { ref name, .. } if name == DEFAULT_SINK));

        let logger = Logger::with_config(SinkConfig::with_engine("Console")).unwrap();
        assert!(logger.is_loaded());
        assert_eq!(logger.sink(DEFAULT_SINK).unwrap().name(), "console");
    }

    #[test]
    fn test_bad_level_in_filter_is_configuration_error() {
        let recorder = Recorder::default();
        let logger = Logger::builder()
            .registry(recorder.registry())
            .sink("a", recording().with_levels(["fatal"]))
            .build();

        assert!(logger.info("m", LogContext::new()).unwrap_err().is_configuration());
    }

    #[test]
    fn test_failing_and_panicking_sinks_are_isolated() {
        let recorder = Recorder::default();
        let logger = Logger::builder()
            .registry(recorder.registry())
            .sink("broken", SinkConfig::with_class("Failing"))
            .sink("exploding", SinkConfig::with_class("Panicking"))
            .sink("ok", recording())
            .build();

        logger.error("still delivered", LogContext::new()).unwrap();

        assert_eq!(recorder.lines().len(), 1);
        assert_eq!(logger.metrics().failed_count(), 2);
        assert_eq!(logger.metrics().delivered_count(), 1);
        assert!(logger.flush().is_err());
    }

    #[test]
    fn test_sink_lookup() {
        let recorder = Recorder::default();
        let logger = Logger::builder()
            .registry(recorder.registry())
            .sink("a", recording())
            .build();

        assert_eq!(logger.sink("a").unwrap().name(), "recording");
        assert!(matches!(
            logger.sink("missing"),
            Err(LoggerError::SinkNotFound { ref name }) if name == "missing"
        ));
    }

    #[test]
    fn test_no_sinks_is_not_an_error() {
        let logger = Logger::default();
        logger.emergency("nobody listens", LogContext::new()).unwrap();
        assert_eq!(logger.metrics().calls(), 1);
        assert!(logger.flush().is_ok());
    }
}
