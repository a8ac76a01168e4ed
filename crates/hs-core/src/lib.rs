//! hostscan core library
//!
//! This library provides the diagnostic collection pipeline:
//! - Tool runner and logged command execution
//! - Append-only scan log
//! - Collectors (system identity, network, listening sockets, SUID files)
//! - Scan orchestration and phase tracking
//! - Console presentation (text and JSON)
//! - Platform/privilege preconditions, diagnostic logging, exit codes
//!
//! The binary entry point is in `main.rs`.

pub mod collect;
pub mod exit_codes;
pub mod logging;
pub mod precheck;
pub mod present;
pub mod scan;
pub mod scanlog;

// Scripted executor for tests
#[cfg(any(test, feature = "test-utils"))]
pub mod mock_executor;
