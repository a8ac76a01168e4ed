//! Scripted command executor for testing.
//!
//! [`ScriptedExecutor`] answers [`ToolSpec`]s from a table keyed by the
//! joined command line, so collectors and the orchestrator can be driven
//! without the host's tools and without root.
//!
//! # Example
//!
//! ```ignore
//! use hs_core::mock_executor::ScriptedExecutor;
//!
//! let exec = ScriptedExecutor::new()
//!     .stdout(&["hostname"], "web-01")
//!     .failure(&["ss", "-tulpen"], 1, "Cannot open netlink socket")
//!     .missing("ip");
//! ```

use crate::collect::tool_runner::{CommandExecutor, ToolError, ToolOutput, ToolSpec};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

#[derive(Debug, Clone)]
struct Reply {
    stdout: String,
    stderr: String,
    exit_code: Option<i32>,
    signal: Option<i32>,
}

/// Executor that replays canned outputs.
///
/// Unscripted commands succeed with empty output unless the executor was
/// built with [`ScriptedExecutor::strict`].
#[derive(Debug, Default)]
pub struct ScriptedExecutor {
    replies: HashMap<String, Reply>,
    missing: HashSet<String>,
    strict: bool,
    calls: RefCell<Vec<String>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail unscripted commands with `CommandNotFound`.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Script a successful run printing `stdout`.
    pub fn stdout(self, argv: &[&str], stdout: &str) -> Self {
        self.reply(argv, stdout, "", Some(0), None)
    }

    /// Script a non-zero exit writing `stderr`.
    pub fn failure(self, argv: &[&str], code: i32, stderr: &str) -> Self {
        self.reply(argv, "", stderr, Some(code), None)
    }

    /// Script a run killed by `signal`.
    pub fn signaled(self, argv: &[&str], signal: i32) -> Self {
        self.reply(argv, "", "", None, Some(signal))
    }

    /// Script an arbitrary outcome.
    pub fn reply(
        mut self,
        argv: &[&str],
        stdout: &str,
        stderr: &str,
        exit_code: Option<i32>,
        signal: Option<i32>,
    ) -> Self {
        self.replies.insert(
            argv.join(" "),
            Reply {
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
                exit_code,
                signal,
            },
        );
        self
    }

    /// Make every invocation of `command` fail to spawn.
    pub fn missing(mut self, command: &str) -> Self {
        self.missing.insert(command.to_string());
        self
    }

    /// Command lines executed so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl CommandExecutor for ScriptedExecutor {
    fn execute(&self, spec: &ToolSpec) -> Result<ToolOutput, ToolError> {
        let line = spec.command_line();
        self.calls.borrow_mut().push(line.clone());

        if self.missing.contains(&spec.command) {
            return Err(ToolError::CommandNotFound(spec.command.clone()));
        }

        match self.replies.get(&line) {
            Some(reply) => Ok(ToolOutput {
                command: spec.command.clone(),
                args: spec.args.clone(),
                stdout: reply.stdout.as_bytes().to_vec(),
                stderr: reply.stderr.as_bytes().to_vec(),
                exit_code: reply.exit_code,
                signal: reply.signal,
                duration: Duration::from_millis(1),
            }),
            None if self.strict => Err(ToolError::CommandNotFound(spec.command.clone())),
            None => Ok(ToolOutput {
                command: spec.command.clone(),
                args: spec.args.clone(),
                exit_code: Some(0),
                ..ToolOutput::default()
            }),
        }
    }
}
