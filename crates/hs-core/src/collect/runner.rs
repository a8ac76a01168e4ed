//! Logged command execution.
//!
//! [`CommandRunner`] pairs an executor with the scan log. Every invocation
//! writes one [`CommandBlock`] (bounded to `max_lines` output lines) and
//! hands the full selected text back to the caller.

use super::tool_runner::{CommandExecutor, ToolOutput, ToolSpec};
use crate::scan::ScanError;
use crate::scanlog::{CommandBlock, ExitDisplay, ScanLog};
use hs_config::DEFAULT_MAX_LOG_LINES;
use serde::Serialize;
use tracing::debug;

/// What a collector gets back from one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandResult {
    /// Selected output, trimmed, never truncated.
    pub raw_output: String,
    /// Exit code; `None` when the process was killed by a signal.
    pub exit_status: Option<i32>,
    /// Whether the log block omitted output lines.
    pub truncated: bool,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.exit_status == Some(0)
    }
}

/// Stdout when it has any bytes, stderr otherwise; trimmed.
pub fn select_output(output: &ToolOutput) -> String {
    let text = if output.stdout.is_empty() {
        output.stderr_str()
    } else {
        output.stdout_str()
    };
    text.trim().to_string()
}

/// Executes commands and records each one in the scan log.
pub struct CommandRunner<'a> {
    executor: &'a dyn CommandExecutor,
    log: &'a mut ScanLog,
    max_log_lines: usize,
}

impl<'a> CommandRunner<'a> {
    pub fn new(executor: &'a dyn CommandExecutor, log: &'a mut ScanLog) -> Self {
        Self {
            executor,
            log,
            max_log_lines: DEFAULT_MAX_LOG_LINES,
        }
    }

    /// Override the default per-command log bound.
    pub fn with_max_log_lines(mut self, max_lines: usize) -> Self {
        self.max_log_lines = max_lines;
        self
    }

    pub fn max_log_lines(&self) -> usize {
        self.max_log_lines
    }

    /// The scan log this runner writes to.
    pub fn log(&mut self) -> &mut ScanLog {
        &mut *self.log
    }

    /// Run `argv` with the default log bound.
    pub fn run<S: AsRef<str>>(&mut self, argv: &[S]) -> Result<CommandResult, ScanError> {
        self.run_with_limit(argv, self.max_log_lines)
    }

    /// Run `argv`, logging at most `max_lines` output lines.
    ///
    /// A non-zero exit is returned as data. Only spawn failures and scan
    /// log write failures are errors.
    pub fn run_with_limit<S: AsRef<str>>(
        &mut self,
        argv: &[S],
        max_lines: usize,
    ) -> Result<CommandResult, ScanError> {
        let spec = ToolSpec::from_argv(argv)?;
        let output = self.executor.execute(&spec)?;

        let raw_output = select_output(&output);
        let block = CommandBlock::new(
            spec.command_line(),
            ExitDisplay::from_parts(output.exit_code, output.signal),
            &raw_output,
            max_lines,
        );
        self.log.command_block(&block)?;

        debug!(
            command = %spec.command_line(),
            exit = %block.exit,
            bytes = raw_output.len(),
            truncated = block.is_truncated(),
            "command logged"
        );

        Ok(CommandResult {
            raw_output,
            exit_status: output.exit_code,
            truncated: block.is_truncated(),
        })
    }
}

impl std::fmt::Debug for CommandRunner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRunner")
            .field("log", &self.log.path())
            .field("max_log_lines", &self.max_log_lines)
            .finish()
    }
}
