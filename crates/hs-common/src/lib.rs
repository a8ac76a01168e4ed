//! hostscan common types and errors.
//!
//! This crate provides foundational types shared across hostscan crates:
//! - Tool identity (name and version)
//! - Run identifiers
//! - Common error types
//! - Output format specifications

pub mod error;
pub mod id;
pub mod output;

pub use error::{Error, ErrorCategory, Result};
pub use id::RunId;
pub use output::OutputFormat;

/// Name printed by `--version` and written into the scan log header.
pub const TOOL_NAME: &str = "hostscan";

/// Tool version, shared by every crate in the workspace.
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");
