//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Level name outside the eight canonical levels
    #[error("Invalid level `{level}`")]
    InvalidLevel { level: String },

    /// Invalid or missing sink configuration
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Engine token or class name with no registered constructor
    #[error("Log engine for {name} could not be found (engine `{engine}`)")]
    SinkResolution { name: String, engine: String },

    /// Lookup of a sink name that was never configured
    #[error("The log configuration `{name}` does not exist")]
    SinkNotFound { name: String },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File sink error with path
    #[error("File sink error for '{path}': {message}")]
    FileSinkError { path: String, message: String },

    /// File rotation error
    #[error("File rotation failed for '{path}': {message}")]
    FileRotationError { path: String, message: String },

    /// Mail transport failure
    #[error("Mail transport error: {0}")]
    TransportError(String),

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),

    /// A sink logged through the logger that is currently dispatching to it
    #[error("Logger re-entered from one of its own sinks")]
    Reentrant,
}

impl LoggerError {
    /// Create an invalid level error
    pub fn invalid_level(level: impl Into<String>) -> Self {
        LoggerError::InvalidLevel {
            level: level.into(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an error for a size option that is neither bytes nor `<N>MB`/`<N>GB`
    pub fn invalid_size(value: impl std::fmt::Display) -> Self {
        LoggerError::config("size", format!("Invalid size format `{}`", value))
    }

    /// Create a sink resolution error
    pub fn resolution(name: impl Into<String>, engine: impl Into<String>) -> Self {
        LoggerError::SinkResolution {
            name: name.into(),
            engine: engine.into(),
        }
    }

    /// Create a sink-not-found error
    pub fn not_found(name: impl Into<String>) -> Self {
        LoggerError::SinkNotFound { name: name.into() }
    }

    /// Create a file sink error
    pub fn file_sink(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileSinkError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a file rotation error
    pub fn file_rotation(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileRotationError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a mail transport error
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        LoggerError::TransportError(msg.into())
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }

    /// Whether this error is raised while building sinks from configuration
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, LoggerError::InvalidConfiguration { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::invalid_level("foo");
        assert!(matches!(err, LoggerError::InvalidLevel { .. }));

        let err = LoggerError::config("FileSink", "Invalid path");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
        assert!(err.is_configuration());

        let err = LoggerError::invalid_size("1 foo");
        assert!(err.is_configuration());

        let err = LoggerError::file_sink("/var/log/app.log", "Permission denied");
        assert!(matches!(err, LoggerError::FileSinkError { .. }));
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::invalid_level("foo");
        assert_eq!(err.to_string(), "Invalid level `foo`");

        let err = LoggerError::file_rotation("/var/log/app.log", "Disk full");
        assert_eq!(
            err.to_string(),
            "File rotation failed for '/var/log/app.log': Disk full"
        );

        assert_eq!(
            LoggerError::Reentrant.to_string(),
            "Logger re-entered from one of its own sinks"
        );

        let err = LoggerError::not_found("audit");
        assert_eq!(err.to_string(), "The log configuration `audit` does not exist");

        let err = LoggerError::resolution("default", "Syslog");
        assert_eq!(
            err.to_string(),
            "Log engine for default could not be found (engine `Syslog`)"
        );
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("writing log file", "cannot write to file", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("writing log file"));
        assert!(err.to_string().contains("cannot write to file"));
    }
}
