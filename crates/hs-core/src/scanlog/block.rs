//! Log block for a single command invocation.

use std::fmt;

/// Record written when a command produced no output at all.
pub const EMPTY_OUTPUT_MARKER: &str = "output: (empty)";

/// How the process ended, as shown in the block header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitDisplay {
    Code(i32),
    Signal(i32),
    Unknown,
}

impl ExitDisplay {
    pub fn from_parts(code: Option<i32>, signal: Option<i32>) -> Self {
        match (code, signal) {
            (Some(code), _) => ExitDisplay::Code(code),
            (None, Some(sig)) => ExitDisplay::Signal(sig),
            (None, None) => ExitDisplay::Unknown,
        }
    }
}

impl fmt::Display for ExitDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitDisplay::Code(code) => write!(f, "{}", code),
            ExitDisplay::Signal(sig) => write!(f, "killed by signal {}", sig),
            ExitDisplay::Unknown => write!(f, "unknown"),
        }
    }
}

/// The records logged for one command: header, at most `max_lines` output
/// lines, and an omitted-count line when output was cut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandBlock {
    pub command_line: String,
    pub exit: ExitDisplay,
    /// Output lines kept for the log.
    pub lines: Vec<String>,
    /// Output lines not written.
    pub omitted: usize,
}

impl CommandBlock {
    /// Build the block for `output`, keeping at most `max_lines` lines.
    pub fn new(
        command_line: impl Into<String>,
        exit: ExitDisplay,
        output: &str,
        max_lines: usize,
    ) -> Self {
        let total = if output.is_empty() {
            0
        } else {
            output.lines().count()
        };
        let lines: Vec<String> = output
            .lines()
            .take(max_lines)
            .map(str::to_string)
            .collect();
        let omitted = total - lines.len();

        Self {
            command_line: command_line.into(),
            exit,
            lines,
            omitted,
        }
    }

    /// Whether output lines were left out of the log.
    pub fn is_truncated(&self) -> bool {
        self.omitted > 0
    }

    /// The log records of this block, in write order.
    pub fn records(&self) -> Vec<String> {
        let mut records = Vec::with_capacity(self.lines.len() + 3);
        records.push(format!(
            "command: {} | exit status: {}",
            self.command_line, self.exit
        ));

        if self.lines.is_empty() && self.omitted == 0 {
            records.push(EMPTY_OUTPUT_MARKER.to_string());
            return records;
        }

        records.push("output:".to_string());
        records.extend(self.lines.iter().map(|l| format!("  {}", l)));
        if self.omitted > 0 {
            records.push(format!("... ({} more lines omitted)", self.omitted));
        }
        records
    }
}
