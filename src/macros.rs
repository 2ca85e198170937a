//! Logging macros for ergonomic log message formatting.
//!
//! These macros format their arguments like `format!` and log the result with
//! an empty context. They evaluate to the `Result` of [`Logger::log`].
//!
//! [`Logger::log`]: crate::Logger::log
//!
//! # Examples
//!
//! ```
//! use multisink_logger::prelude::*;
//! use multisink_logger::info;
//!
//! let logger = Logger::new();
//!
//! info!(logger, "Server started").unwrap();
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port).unwrap();
//! ```
//!
//! Braces meant as placeholders must be escaped inside the format string:
//!
//! ```
//! # use multisink_logger::prelude::*;
//! # let logger = Logger::new();
//! use multisink_logger::notice;
//! notice!(logger, "value of {{key}} is {}", 1).unwrap();
//! ```

/// Log a message at a level given by name or as a `LogLevel`.
///
/// # Examples
///
/// ```
/// # use multisink_logger::prelude::*;
/// # let logger = Logger::new();
/// use multisink_logger::log;
/// log!(logger, LogLevel::Info, "Simple message").unwrap();
/// log!(logger, "error", "Error code: {}", 500).unwrap();
/// assert!(log!(logger, "loud", "rejected").is_err());
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+), $crate::LogContext::new())
    };
}

/// Log an emergency-level message.
#[macro_export]
macro_rules! emergency {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Emergency, $($arg)+)
    };
}

/// Log an alert-level message.
#[macro_export]
macro_rules! alert {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Alert, $($arg)+)
    };
}

/// Log a critical-level message.
///
/// # Examples
///
/// ```
/// # use multisink_logger::prelude::*;
/// # let logger = Logger::new();
/// use multisink_logger::critical;
/// critical!(logger, "Replica {} is unreachable", "db-2").unwrap();
/// ```
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use multisink_logger::prelude::*;
/// # let logger = Logger::new();
/// use multisink_logger::error;
/// error!(logger, "Failed to connect to database").unwrap();
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error").unwrap();
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log a notice-level message.
#[macro_export]
macro_rules! notice {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Notice, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use multisink_logger::prelude::*;
/// # let logger = Logger::new();
/// use multisink_logger::info;
/// info!(logger, "Application started").unwrap();
/// info!(logger, "Processing {} items", 100).unwrap();
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}
