//! Append-only scan log.
//!
//! The scan log is the audit trail of a run: every external command, its
//! exit status and (a bounded excerpt of) its output, delimited by section
//! banners for each collection phase. It is distinct from the diagnostic
//! `tracing` stream on stderr.
//!
//! # Design
//!
//! - **Format**: plain text, one timestamped record per line
//!   (`2026-01-15 14:30:22,517 - INFO - message`)
//! - **Append-only**: the file is opened with `append`; history across runs
//!   accumulates and is never truncated by hostscan
//! - **Flush per record**: already-written evidence survives a crash
//! - **Scoped handle**: [`ScanLog`] flushes and releases the file on drop
//!
//! # Usage
//!
//! ```ignore
//! use hs_core::scanlog::ScanLog;
//!
//! let mut log = ScanLog::open("logs/security_scan.log")?;
//! log.info("Scan started")?;
//! log.section("System info")?;
//! ```

mod block;
mod writer;

pub use block::{CommandBlock, ExitDisplay, EMPTY_OUTPUT_MARKER};
pub use writer::{format_record, RecordLevel, ScanLog, BANNER_FILL, TIMESTAMP_FORMAT};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while opening or writing the scan log.
#[derive(Debug, Error)]
pub enum ScanLogError {
    #[error("failed to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("scan log {path} is already closed")]
    Closed { path: PathBuf },
}

impl From<ScanLogError> for hs_common::Error {
    fn from(err: ScanLogError) -> Self {
        hs_common::Error::LogInit(err.to_string())
    }
}
