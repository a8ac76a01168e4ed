//! Record types produced by the collectors.

use serde::{Deserialize, Serialize};

/// Identity and kernel facts about the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Resolved invoking user, possibly annotated with elevation.
    pub user: String,
    pub hostname: String,
    /// Kernel release (`uname -r`).
    pub kernel: String,
    /// `uptime` line as printed by the tool.
    pub uptime: String,
}

/// Interface and routing listings, kept as opaque tool text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInfo {
    /// `ip a` output.
    pub interfaces: String,
    /// `ip r` output.
    pub routes: String,
}

impl NetworkInfo {
    /// Number of non-blank lines in the interface listing.
    pub fn interface_line_count(&self) -> usize {
        non_blank_lines(&self.interfaces).count()
    }

    /// Non-blank route lines, trimmed.
    pub fn route_lines(&self) -> Vec<String> {
        non_blank_lines(&self.routes).map(str::to_string).collect()
    }
}

/// Aggregate result of one scan.
///
/// Disabled collectors leave their field as `None`, which is distinct from
/// an enabled collector that found nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub system: SystemInfo,
    pub network: Option<NetworkInfo>,
    /// Listening sockets, one per line, header excluded.
    pub ports: Vec<String>,
    pub suid_files: Option<Vec<String>>,
}

pub(crate) fn non_blank_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty())
}
