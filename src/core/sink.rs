//! Sink trait for log output destinations

use super::{error::Result, log_entry::LogEntry};

/// A configured destination for rendered log lines.
///
/// `log` reports delivery failures through its `Result` so they can be
/// observed in tests and metrics; the dispatcher never propagates them to the
/// logging caller.
///
/// `log` runs while the dispatcher holds its lock, so a slow sink delays every
/// other caller of the same logger. Logging back through that logger from
/// inside `log` fails with [`LoggerError::Reentrant`].
///
/// [`LoggerError::Reentrant`]: super::error::LoggerError::Reentrant
pub trait Sink: Send {
    fn log(&mut self, entry: &LogEntry) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}
