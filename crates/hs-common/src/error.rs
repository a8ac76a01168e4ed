//! Error types for hostscan.
//!
//! This module provides the top-level error taxonomy shared by all crates:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping, which drives the exit code
//!
//! Module-level errors (tool runner, scan log, preconditions, config) convert
//! into [`Error`] so the binary can map any failure onto an exit code.
//!
//! # Human-Facing Output
//!
//! The console never shows the technical message of a collection failure;
//! it prints a single line pointing at the scan log:
//! ```text
//! An error occurred during the scan. See the log file for details: logs/security_scan.log
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for hostscan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Wrong platform or insufficient privilege.
    Precondition,
    /// Scan log could not be created or written.
    Logging,
    /// Configuration file errors.
    Config,
    /// External command could not be spawned during collection.
    Collection,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Precondition => write!(f, "precondition"),
            ErrorCategory::Logging => write!(f, "logging"),
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Collection => write!(f, "collection"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for hostscan.
#[derive(Error, Debug)]
pub enum Error {
    // Precondition errors (10-19)
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("insufficient privilege: {0}")]
    InsufficientPrivilege(String),

    // Logging bootstrap errors (20-29)
    #[error("scan log unavailable: {0}")]
    LogInit(String),

    // Configuration errors (30-39)
    #[error("configuration error: {0}")]
    Config(String),

    // Collection errors (40-49)
    #[error("collection failed: {0}")]
    Collection(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Precondition errors
    /// - 20-29: Logging bootstrap errors
    /// - 30-39: Configuration errors
    /// - 40-49: Collection errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::UnsupportedPlatform(_) => 10,
            Error::InsufficientPrivilege(_) => 11,
            Error::LogInit(_) => 20,
            Error::Config(_) => 30,
            Error::Collection(_) => 40,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::UnsupportedPlatform(_) | Error::InsufficientPrivilege(_) => {
                ErrorCategory::Precondition
            }
            Error::LogInit(_) => ErrorCategory::Logging,
            Error::Config(_) => ErrorCategory::Config,
            Error::Collection(_) => ErrorCategory::Collection,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }
}
