//! File sink with size-triggered rotation
//!
//! Rotated backups are named `<file>.1` (newest) through `<file>.N` (oldest).
//! The size check always re-reads the file's metadata from disk, so growth by
//! other writers or external truncation is seen on the next call.

use crate::core::config::{parse_size, SinkConfig};
use crate::core::error::{LoggerError, Result};
use crate::core::formatter::LineFormatter;
use crate::core::log_entry::LogEntry;
use crate::core::sink::Sink;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Number of backups kept when `size` is set without `rotate`
pub const DEFAULT_MAX_BACKUPS: usize = 10;

/// When and how to rotate the live file
///
/// # Examples
///
/// ```
/// use multisink_logger::sinks::RotationPolicy;
///
/// // Rotate at 10 MB, keep three backups
/// let policy = RotationPolicy::new(10 * 1024 * 1024).with_max_backups(3);
/// assert_eq!(policy.max_backups, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Rotate once the live file is at least this large
    pub max_bytes: u64,
    /// Backups to retain; 0 deletes the live file instead of archiving it
    pub max_backups: usize,
}

impl RotationPolicy {
    #[must_use]
    pub fn new(max_bytes: u64) -> Self {
        Self {
            max_bytes,
            max_backups: DEFAULT_MAX_BACKUPS,
        }
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_backups(mut self, count: usize) -> Self {
        self.max_backups = count;
        self
    }
}

/// Appends formatted lines to a file, rotating it before a write once it is full
///
/// # Examples
///
/// ```no_run
/// use multisink_logger::sinks::{FileSink, RotationPolicy};
///
/// let sink = FileSink::new("/var/log/app.log")
///     .unwrap()
///     .with_rotation(RotationPolicy::new(1024 * 1024).with_max_backups(5));
/// ```
pub struct FileSink {
    path: PathBuf,
    rotation: Option<RotationPolicy>,
    file: Option<File>,
    formatter: LineFormatter,
}

impl FileSink {
    /// Open `path` for appending, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the parent directory does not exist or
    /// the file cannot be created.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.is_dir() {
                return Err(LoggerError::config(
                    "file",
                    format!(
                        "Unable to create log file '{}': directory '{}' does not exist",
                        path.display(),
                        parent.display()
                    ),
                ));
            }
        }

        let file = Self::open(&path).map_err(|e| {
            LoggerError::config(
                "file",
                format!("Unable to create log file '{}': {}", path.display(), e),
            )
        })?;

        Ok(Self {
            path,
            rotation: None,
            file: Some(file),
            formatter: LineFormatter::default(),
        })
    }

    /// Build from `file`, `size` and `rotate` options
    pub fn from_config(config: &SinkConfig) -> Result<Self> {
        let path = config
            .string("file")?
            .filter(|p| !p.is_empty())
            .ok_or_else(|| LoggerError::config("file", "File not provided"))?;

        let mut sink = Self::new(path)?;
        if let Some(size) = config.get("size") {
            let max_bytes = parse_size(size)?;
            let max_backups = match config.unsigned("rotate")? {
                Some(n) => usize::try_from(n)
                    .map_err(|_| LoggerError::config("rotate", format!("{} is out of range", n)))?,
                None => DEFAULT_MAX_BACKUPS,
            };
            sink = sink.with_rotation(RotationPolicy {
                max_bytes,
                max_backups,
            });
        }
        Ok(sink)
    }

    #[must_use]
    pub fn with_rotation(mut self, policy: RotationPolicy) -> Self {
        self.rotation = Some(policy);
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: LineFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn policy(&self) -> Option<&RotationPolicy> {
        self.rotation.as_ref()
    }

    fn open(path: &Path) -> std::io::Result<File> {
        OpenOptions::new().create(true).append(true).open(path)
    }

    /// Current on-disk size of the live file; a missing file counts as empty
    fn disk_size(&self) -> Result<u64> {
        match fs::metadata(&self.path) {
            Ok(meta) => Ok(meta.len()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(0),
            Err(e) => Err(LoggerError::io_operation(
                "checking log file size",
                self.path.display().to_string(),
                e,
            )),
        }
    }

    fn rotate_if_needed(&mut self) -> Result<()> {
        let Some(policy) = self.rotation else {
            return Ok(());
        };
        if self.disk_size()? >= policy.max_bytes {
            self.rotate(policy.max_backups)?;
        }
        Ok(())
    }

    /// Shift backups up by one and archive (or delete) the live file
    fn rotate(&mut self, max_backups: usize) -> Result<()> {
        // Release the handle before the live file is renamed away
        self.file = None;

        if max_backups == 0 {
            return match fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(LoggerError::file_rotation(
                    self.path.display().to_string(),
                    format!("Failed to delete log file: {}", e),
                )),
            };
        }

        for i in (1..=max_backups).rev() {
            let backup = self.backup_path(i);
            if !backup.exists() {
                continue;
            }
            let result = if i >= max_backups {
                fs::remove_file(&backup)
            } else {
                fs::rename(&backup, self.backup_path(i + 1))
            };
            result.map_err(|e| {
                LoggerError::file_rotation(
                    backup.display().to_string(),
                    format!("Failed to rotate backup file: {}", e),
                )
            })?;
        }

        if self.path.exists() {
            fs::rename(&self.path, self.backup_path(1)).map_err(|e| {
                LoggerError::file_rotation(
                    self.path.display().to_string(),
                    format!("Failed to rotate current log file: {}", e),
                )
            })?;
        }
        Ok(())
    }

    /// Get backup file path for given index
    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(format!(".{}", index));
        self.path.with_file_name(name)
    }

    /// Return a handle to the live file, reopening it if it was rotated or removed
    fn writer(&mut self) -> Result<&mut File> {
        if self.file.is_some() && !self.path.exists() {
            self.file = None;
        }
        if self.file.is_none() {
            let file = Self::open(&self.path).map_err(|e| {
                LoggerError::file_sink(
                    self.path.display().to_string(),
                    format!("Failed to open: {}", e),
                )
            })?;
            self.file = Some(file);
        }
        self.file
            .as_mut()
            .ok_or_else(|| LoggerError::writer("File writer not initialized"))
    }
}

impl Sink for FileSink {
    fn log(&mut self, entry: &LogEntry) -> Result<()> {
        let mut line = self.formatter.format(entry);
        line.push('\n');

        // A failed rotation must not cost the line: write first, report after
        let rotation = self.rotate_if_needed();

        let path = self.path.display().to_string();
        self.writer()?.write_all(line.as_bytes()).map_err(|e| {
            LoggerError::file_sink(path, format!("Failed to write log entry: {}", e))
        })?;

        rotation
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut file) = self.file {
            file.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}
