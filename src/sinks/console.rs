//! Console sink implementation

use crate::core::config::SinkConfig;
use crate::core::error::{LoggerError, Result};
use crate::core::formatter::LineFormatter;
use crate::core::log_entry::LogEntry;
use crate::core::log_level::LogLevel;
use crate::core::sink::Sink;
use std::fmt;
use std::io::{self, IsTerminal, Write};

/// Stream a [`ConsoleSink`] writes to
pub enum ConsoleTarget {
    Stderr,
    Stdout,
    /// Any writer, e.g. an in-memory buffer; never treated as a terminal
    Writer(Box<dyn Write + Send>),
}

impl ConsoleTarget {
    fn is_terminal(&self) -> bool {
        match self {
            ConsoleTarget::Stderr => io::stderr().is_terminal(),
            ConsoleTarget::Stdout => io::stdout().is_terminal(),
            ConsoleTarget::Writer(_) => false,
        }
    }

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        match self {
            ConsoleTarget::Stderr => io::stderr().lock().write_all(bytes),
            ConsoleTarget::Stdout => io::stdout().lock().write_all(bytes),
            ConsoleTarget::Writer(w) => w.write_all(bytes),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            ConsoleTarget::Stderr => io::stderr().flush(),
            ConsoleTarget::Stdout => io::stdout().flush(),
            ConsoleTarget::Writer(w) => w.flush(),
        }
    }
}

impl fmt::Debug for ConsoleTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleTarget::Stderr => f.write_str("Stderr"),
            ConsoleTarget::Stdout => f.write_str("Stdout"),
            ConsoleTarget::Writer(_) => f.write_str("Writer(..)"),
        }
    }
}

/// Writes lines to a console stream, colorized per level when it is a terminal
pub struct ConsoleSink {
    target: ConsoleTarget,
    use_colors: bool,
    formatter: LineFormatter,
}

impl ConsoleSink {
    /// Console sink on standard error
    pub fn new() -> Self {
        Self::with_target(ConsoleTarget::Stderr)
    }

    /// Colors default to whether the target is an interactive terminal
    pub fn with_target(target: ConsoleTarget) -> Self {
        let use_colors = target.is_terminal();
        Self {
            target,
            use_colors,
            formatter: LineFormatter::default(),
        }
    }

    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self::with_target(ConsoleTarget::Writer(Box::new(writer)))
    }

    /// Build from the `stream` (`stderr` | `stdout`) and `colors` options
    pub fn from_config(config: &SinkConfig) -> Result<Self> {
        let target = match config.string("stream")? {
            None | Some("stderr") => ConsoleTarget::Stderr,
            Some("stdout") => ConsoleTarget::Stdout,
            Some(other) => {
                return Err(LoggerError::config(
                    "stream",
                    format!("Unknown console stream `{}`", other),
                ))
            }
        };

        let mut sink = Self::with_target(target);
        if let Some(colors) = config.boolean("colors")? {
            sink = sink.with_colors(colors);
        }
        Ok(sink)
    }

    /// Force colors on or off regardless of terminal detection
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: LineFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    #[must_use]
    pub fn uses_colors(&self) -> bool {
        self.use_colors
    }

    /// Render an entry as it will be written, without the trailing newline
    fn render(&self, entry: &LogEntry) -> String {
        let line = self.formatter.format(entry);
        if self.use_colors {
            colorize(entry.level, &line)
        } else {
            line
        }
    }
}

/// Wrap `line` in the level's ANSI foreground color
pub fn colorize(level: LogLevel, line: &str) -> String {
    format!("\x1b[{}m{}\x1b[0m", level.color_code().to_fg_str(), line)
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn log(&mut self, entry: &LogEntry) -> Result<()> {
        let mut output = self.render(entry);
        output.push('\n');
        self.target.write_all(output.as_bytes()).map_err(|e| {
            LoggerError::io_operation("writing to console", format!("{:?}", self.target), e)
        })
    }

    fn flush(&mut self) -> Result<()> {
        self.target.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

impl Drop for ConsoleSink {
    fn drop(&mut self) {
        // Best effort; the stream itself is released with the target
        let _ = self.target.flush();
    }
}
