//! Exit codes for the hostscan CLI.
//!
//! The process exit status is deliberately coarse: `0` for a completed scan
//! or a version query, `1` for everything else. The variants keep the
//! reason apart for logs and tests while mapping onto those two values.

use hs_common::ErrorCategory;

/// Outcome of a hostscan invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Scan completed and was presented, or version printed.
    Clean,

    /// Wrong platform or not running as root.
    PreconditionFailed,

    /// Scan log directory or file could not be opened.
    LogInitFailed,

    /// Config file missing, unreadable, or invalid.
    ConfigError,

    /// Error during collection or presentation.
    ScanFailed,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        match self {
            ExitCode::Clean => 0,
            _ => 1,
        }
    }

    pub fn is_success(self) -> bool {
        self == ExitCode::Clean
    }

    /// Get the code name as a string constant.
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK_CLEAN",
            ExitCode::PreconditionFailed => "ERR_PRECONDITION",
            ExitCode::LogInitFailed => "ERR_LOG_INIT",
            ExitCode::ConfigError => "ERR_CONFIG",
            ExitCode::ScanFailed => "ERR_SCAN",
        }
    }

    /// Exit code for an error of the given category.
    pub fn for_category(category: ErrorCategory) -> Self {
        match category {
            ErrorCategory::Precondition => ExitCode::PreconditionFailed,
            ErrorCategory::Logging => ExitCode::LogInitFailed,
            ErrorCategory::Config => ExitCode::ConfigError,
            ErrorCategory::Collection | ErrorCategory::Io => ExitCode::ScanFailed,
        }
    }
}

impl From<&hs_common::Error> for ExitCode {
    fn from(err: &hs_common::Error) -> Self {
        ExitCode::for_category(err.category())
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        // as_i32 is always 0 or 1
        std::process::ExitCode::from(code.as_i32() as u8)
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}
