//! Diagnostic collection.
//!
//! This module provides the evidence collection layer of a scan:
//! - Tool runner for external command execution
//! - Logged command runner (selection, truncation, scan log block)
//! - One collector per category: system identity, network, ports, SUID
//!
//! Each collector writes its section banner and then composes one or more
//! [`CommandRunner`] calls. Tool output formats are treated as opaque text.

mod identity;
mod network;
mod ports;
pub mod runner;
mod suid;
mod system;
pub mod tool_runner;
mod types;

pub use identity::{resolve_identity, IdentityEnv, UNKNOWN_USER};
pub use network::collect_network_info;
pub use ports::{collect_open_ports, parse_socket_lines, PortsMode};
pub use runner::{select_output, CommandResult, CommandRunner};
pub use suid::{collect_suid_files, suid_search_script};
pub use system::collect_system_info;
pub use tool_runner::{
    CommandExecutor, ToolConfig, ToolError, ToolOutput, ToolRunner, ToolSpec,
};
pub use types::{NetworkInfo, ScanResult, SystemInfo};

/// Section banner titles in collection order.
pub const SECTION_TITLES: [&str; 4] = [
    system::SECTION_TITLE,
    network::SECTION_TITLE,
    ports::SECTION_TITLE,
    suid::SECTION_TITLE,
];

/// Every program a collector may execute.
pub const COLLECTOR_COMMANDS: [&str; 6] = ["hostname", "uname", "uptime", "ip", "ss", "sh"];
