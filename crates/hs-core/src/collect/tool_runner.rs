//! Tool runner for external introspection commands.
//!
//! This module executes the OS tools the collectors depend on (hostname,
//! uname, ip, ss, find) and captures their raw output:
//!
//! - stdout and stderr captured separately, stdin closed
//! - non-zero exit is data, not an error
//! - spawn failures (missing binary, exec permission) are errors
//! - command names with shell metacharacters are rejected
//! - an optional allowlist restricts which commands may run
//! - C locale forced for stable tool output
//!
//! There is no timeout: a hung tool blocks the calling thread until it
//! exits.
//!
//! # Example
//!
//! ```ignore
//! use hs_core::collect::tool_runner::{ToolRunner, ToolSpec, CommandExecutor};
//!
//! let runner = ToolRunner::with_allowlist(["uname"]);
//! let output = runner.execute(&ToolSpec::from_argv(&["uname", "-r"])?)?;
//! println!("kernel: {}", output.stdout_str().trim());
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, error, info, instrument};

/// Errors that can occur during tool execution.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("command not found: {0}")]
    CommandNotFound(String),

    #[error("command failed to spawn: {command}: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("empty command line")]
    EmptyCommand,

    #[error("invalid command path: {0}")]
    InvalidPath(String),

    #[error("command not in allowlist: {0}")]
    NotAllowed(String),
}

/// Output from a tool execution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Command that was executed.
    pub command: String,

    /// Arguments passed to the command.
    pub args: Vec<String>,

    /// Standard output.
    pub stdout: Vec<u8>,

    /// Standard error.
    pub stderr: Vec<u8>,

    /// Exit code (None when killed by a signal).
    pub exit_code: Option<i32>,

    /// Terminating signal, if any.
    pub signal: Option<i32>,

    /// Execution duration.
    pub duration: Duration,
}

impl ToolOutput {
    /// Get stdout as string (lossy UTF-8 conversion).
    pub fn stdout_str(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }

    /// Get stderr as string (lossy UTF-8 conversion).
    pub fn stderr_str(&self) -> String {
        String::from_utf8_lossy(&self.stderr).to_string()
    }

    /// Check if the command succeeded (exit code 0).
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Configuration for the tool runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Force `LC_ALL=C` / `LANG=C` in the child environment.
    pub c_locale: bool,

    /// Allowed commands (empty = all allowed).
    pub allowed_commands: HashSet<String>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            c_locale: true,
            allowed_commands: HashSet::new(),
        }
    }
}

/// Specification for a tool to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSpec {
    /// Command to execute.
    pub command: String,

    /// Arguments to pass.
    pub args: Vec<String>,
}

impl ToolSpec {
    /// Create a new tool specification.
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    /// Build a specification from an argv slice (program first).
    pub fn from_argv<S: AsRef<str>>(argv: &[S]) -> Result<Self, ToolError> {
        let (command, args) = argv.split_first().ok_or(ToolError::EmptyCommand)?;
        Ok(Self {
            command: command.as_ref().to_string(),
            args: args.iter().map(|a| a.as_ref().to_string()).collect(),
        })
    }

    /// The command line as a single space-joined string.
    pub fn command_line(&self) -> String {
        std::iter::once(self.command.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Something that can run a [`ToolSpec`] to completion.
///
/// [`ToolRunner`] is the real implementation; tests substitute a scripted
/// executor so collectors can be exercised without the host's tools.
pub trait CommandExecutor {
    fn execute(&self, spec: &ToolSpec) -> Result<ToolOutput, ToolError>;
}

/// Runs external tools as blocking child processes.
#[derive(Debug, Default)]
pub struct ToolRunner {
    config: ToolConfig,
}

impl ToolRunner {
    /// Create a new tool runner with the given configuration.
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }

    /// Create a tool runner that only executes the named commands.
    pub fn with_allowlist<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(ToolConfig {
            allowed_commands: commands.into_iter().map(Into::into).collect(),
            ..ToolConfig::default()
        })
    }

    /// Run a tool from a specification.
    #[instrument(skip(self), fields(cmd = %spec.command))]
    pub fn run(&self, spec: &ToolSpec) -> Result<ToolOutput, ToolError> {
        self.validate_command(&spec.command)?;

        debug!(command = %spec.command, args = ?spec.args, "running tool");

        let start = Instant::now();
        let output = self
            .build_command(&spec.command, &spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                error!(command = %spec.command, error = %e, "failed to spawn");
                if e.kind() == ErrorKind::NotFound {
                    ToolError::CommandNotFound(spec.command.clone())
                } else {
                    ToolError::SpawnFailed {
                        command: spec.command.clone(),
                        source: e,
                    }
                }
            })?;
        let duration = start.elapsed();

        let exit_code = output.status.code();
        let signal = exit_signal(&output.status);

        info!(
            command = %spec.command,
            duration_ms = duration.as_millis() as u64,
            exit_code = ?exit_code,
            "tool execution complete"
        );

        Ok(ToolOutput {
            command: spec.command.clone(),
            args: spec.args.clone(),
            stdout: output.stdout,
            stderr: output.stderr,
            exit_code,
            signal,
            duration,
        })
    }

    /// Validate that a command is allowed and safe to execute.
    fn validate_command(&self, cmd: &str) -> Result<(), ToolError> {
        if cmd.is_empty() {
            return Err(ToolError::EmptyCommand);
        }

        // Check allowlist if configured
        if !self.config.allowed_commands.is_empty() {
            let basename = Path::new(cmd)
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(cmd);

            if !self.config.allowed_commands.contains(cmd)
                && !self.config.allowed_commands.contains(basename)
            {
                return Err(ToolError::NotAllowed(cmd.to_string()));
            }
        }

        // Reject commands with shell metacharacters
        if cmd.contains(['|', '&', ';', '$', '`', '\n', '\r']) {
            return Err(ToolError::InvalidPath(format!(
                "command contains shell metacharacters: {}",
                cmd
            )));
        }

        // Verify command exists if it's an absolute path
        if cmd.starts_with('/') && !Path::new(cmd).exists() {
            return Err(ToolError::CommandNotFound(cmd.to_string()));
        }

        Ok(())
    }

    fn build_command(&self, cmd: &str, args: &[String]) -> Command {
        let mut command = Command::new(cmd);
        command.args(args);
        if self.config.c_locale {
            command.env("LC_ALL", "C");
            command.env("LANG", "C");
        }
        command
    }
}

impl CommandExecutor for ToolRunner {
    fn execute(&self, spec: &ToolSpec) -> Result<ToolOutput, ToolError> {
        self.run(spec)
    }
}

#[cfg(unix)]
fn exit_signal(status: &std::process::ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn exit_signal(_status: &std::process::ExitStatus) -> Option<i32> {
    None
}
