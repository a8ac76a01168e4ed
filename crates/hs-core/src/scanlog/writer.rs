//! Scan log writer.
//!
//! Owns the append-mode file handle for the lifetime of a run. Records are
//! flushed as they are written and the handle is released on drop.

use super::block::CommandBlock;
use super::ScanLogError;
use chrono::{DateTime, Local};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Timestamp layout of every record.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Fill used on both sides of a section banner.
pub const BANNER_FILL: &str = "====================";

/// Severity of a scan log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLevel {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for RecordLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordLevel::Info => write!(f, "INFO"),
            RecordLevel::Warning => write!(f, "WARNING"),
            RecordLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// Render one record line (without trailing newline).
pub fn format_record(timestamp: DateTime<Local>, level: RecordLevel, message: &str) -> String {
    format!(
        "{} - {} - {}",
        timestamp.format(TIMESTAMP_FORMAT),
        level,
        message
    )
}

/// The scan log handle.
pub struct ScanLog {
    /// Path to the log file.
    path: PathBuf,
    /// Buffered writer; None once closed.
    writer: Option<BufWriter<File>>,
    /// Records written by this handle.
    records_written: u64,
}

impl ScanLog {
    /// Open the scan log for appending, creating its directory if needed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ScanLogError> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ScanLogError::CreateDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| ScanLogError::Io {
                path: path.clone(),
                source: e,
            })?;

        Ok(ScanLog {
            path,
            writer: Some(BufWriter::new(file)),
            records_written: 0,
        })
    }

    /// Get the path to the scan log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of records written through this handle.
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Write a record at the given level.
    ///
    /// Multi-line messages become one timestamped record per line.
    pub fn write_record(&mut self, level: RecordLevel, message: &str) -> Result<(), ScanLogError> {
        let writer = self.writer.as_mut().ok_or_else(|| ScanLogError::Closed {
            path: self.path.clone(),
        })?;

        let now = Local::now();
        let mut written = 0;
        let mut lines = message.lines().peekable();
        if lines.peek().is_none() {
            writeln!(writer, "{}", format_record(now, level, "")).map_err(|e| ScanLogError::Io {
                path: self.path.clone(),
                source: e,
            })?;
            written += 1;
        }
        for line in lines {
            writeln!(writer, "{}", format_record(now, level, line)).map_err(|e| {
                ScanLogError::Io {
                    path: self.path.clone(),
                    source: e,
                }
            })?;
            written += 1;
        }
        writer.flush().map_err(|e| ScanLogError::Io {
            path: self.path.clone(),
            source: e,
        })?;

        self.records_written += written;
        Ok(())
    }

    /// Write an INFO record.
    pub fn info(&mut self, message: &str) -> Result<(), ScanLogError> {
        self.write_record(RecordLevel::Info, message)
    }

    /// Write a plain line; alias for [`ScanLog::info`].
    pub fn line(&mut self, text: &str) -> Result<(), ScanLogError> {
        self.info(text)
    }

    /// Write a WARNING record.
    pub fn warn(&mut self, message: &str) -> Result<(), ScanLogError> {
        self.write_record(RecordLevel::Warning, message)
    }

    /// Write an ERROR record.
    pub fn error(&mut self, message: &str) -> Result<(), ScanLogError> {
        self.write_record(RecordLevel::Error, message)
    }

    /// Write a banner delimiting a collection phase.
    pub fn section(&mut self, title: &str) -> Result<(), ScanLogError> {
        let banner = format!("{} {} {}", BANNER_FILL, title.to_uppercase(), BANNER_FILL);
        self.info(&banner)
    }

    /// Write the records of one command invocation.
    pub fn command_block(&mut self, block: &CommandBlock) -> Result<(), ScanLogError> {
        for record in block.records() {
            self.info(&record)?;
        }
        Ok(())
    }

    /// Flush any buffered writes.
    pub fn flush(&mut self) -> Result<(), ScanLogError> {
        if let Some(ref mut writer) = self.writer {
            writer.flush().map_err(|e| ScanLogError::Io {
                path: self.path.clone(),
                source: e,
            })?;
        }
        Ok(())
    }

    /// Close the writer (called automatically on drop, but can be called explicitly).
    pub fn close(&mut self) {
        if let Some(ref mut writer) = self.writer {
            let _ = writer.flush();
        }
        self.writer = None;
    }
}

impl std::fmt::Debug for ScanLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanLog")
            .field("path", &self.path)
            .field("open", &self.writer.is_some())
            .field("records_written", &self.records_written)
            .finish()
    }
}

impl Drop for ScanLog {
    fn drop(&mut self) {
        self.close();
    }
}
