//! Scan configuration as stored in `config.toml`.
//!
//! Every field has a default, so an empty file (or no file at all) yields
//! the behavior of a bare `hostscan` invocation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default scan log location, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "logs/security_scan.log";

/// Default number of output lines logged per command.
pub const DEFAULT_MAX_LOG_LINES: usize = 30;

/// Default bound on SUID search results.
pub const DEFAULT_SUID_LIMIT: usize = 20;

/// Default number of list entries shown on the console.
pub const DEFAULT_DISPLAY_LIMIT: usize = 15;

/// Tunables for a scan run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Append-only scan log path.
    pub log_file: PathBuf,

    /// Maximum output lines written to the log per command.
    pub max_log_lines: usize,

    /// Maximum SUID paths collected.
    pub suid_limit: usize,

    /// Maximum list entries printed per console section.
    pub display_limit: usize,

    /// Use the terse socket listing by default.
    pub quick: bool,

    /// Collect interface and routing information.
    pub network: bool,

    /// Run the SUID inventory.
    pub suid: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            max_log_lines: DEFAULT_MAX_LOG_LINES,
            suid_limit: DEFAULT_SUID_LIMIT,
            display_limit: DEFAULT_DISPLAY_LIMIT,
            quick: false,
            network: true,
            suid: false,
        }
    }
}

impl ScanConfig {
    /// Parse a config from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Override the log file path.
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = path.into();
        self
    }

    /// Override the SUID result bound.
    pub fn with_suid_limit(mut self, limit: usize) -> Self {
        self.suid_limit = limit;
        self
    }
}
