//! Listening socket collector.
//!
//! Runs `ss` and keeps one entry per listening socket. The column header
//! is dropped. A non-zero exit degrades to an empty list so error text on
//! stderr is never reported as a socket.

use super::runner::CommandRunner;
use super::types::non_blank_lines;
use crate::scan::ScanError;
use tracing::warn;

pub const SECTION_TITLE: &str = "Open ports";

/// Which `ss` form to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PortsMode {
    /// `ss -tuln`: numeric, no process attribution.
    Quick,
    /// `ss -tulpen`: with owning process, extended info.
    #[default]
    Full,
}

impl PortsMode {
    pub fn from_quick(quick: bool) -> Self {
        if quick {
            PortsMode::Quick
        } else {
            PortsMode::Full
        }
    }

    pub fn argv(self) -> &'static [&'static str] {
        match self {
            PortsMode::Quick => &["ss", "-tuln"],
            PortsMode::Full => &["ss", "-tulpen"],
        }
    }
}

fn is_header(line: &str) -> bool {
    line.starts_with("Netid") || line.starts_with("State")
}

/// Split `ss` output into socket lines.
pub fn parse_socket_lines(text: &str) -> Vec<String> {
    non_blank_lines(text)
        .filter(|l| !is_header(l))
        .map(str::to_string)
        .collect()
}

/// Collect listening sockets.
pub fn collect_open_ports(
    runner: &mut CommandRunner<'_>,
    mode: PortsMode,
) -> Result<Vec<String>, ScanError> {
    runner.log().section(SECTION_TITLE)?;

    let result = runner.run(mode.argv())?;
    if !result.success() {
        warn!(exit = ?result.exit_status, "socket listing failed, reporting no ports");
        runner
            .log()
            .warn("socket listing failed; ports reported as none")?;
        return Ok(Vec::new());
    }

    Ok(parse_socket_lines(&result.raw_output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_executor::ScriptedExecutor;
    use crate::scanlog::ScanLog;
    use tempfile::TempDir;

    const SS_QUICK: &str = "\
Netid State  Recv-Q Send-Q Local Address:Port Peer Address:Port
udp   UNCONN 0      0            0.0.0.0:68        0.0.0.0:*
tcp   LISTEN 0      128          0.0.0.0:22        0.0.0.0:*

tcp   LISTEN 0      128             [::]:22           [::]:*
";

    #[test]
    fn test_parse_drops_header_and_blanks() {
        let lines = parse_socket_lines(SS_QUICK);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("udp"));
        assert!(lines.iter().all(|l| !l.starts_with("Netid")));
    }

    #[test]
    fn test_parse_state_header() {
        let lines = parse_socket_lines("State Recv-Q Send-Q\nLISTEN 0 128 *:22 *:*\n");
        assert_eq!(lines, vec!["LISTEN 0 128 *:22 *:*"]);
    }

    #[test]
    fn test_mode_argv() {
        assert_eq!(PortsMode::from_quick(true).argv(), &["ss", "-tuln"]);
        assert_eq!(PortsMode::from_quick(false).argv(), &["ss", "-tulpen"]);
    }

    #[test]
    fn test_quick_mode_collects() {
        let tmp = TempDir::new().unwrap();
        let mut log = ScanLog::open(tmp.path().join("scan.log")).unwrap();
        let exec = ScriptedExecutor::new().strict().stdout(&["ss", "-tuln"], SS_QUICK);

        let ports = collect_open_ports(&mut CommandRunner::new(&exec, &mut log), PortsMode::Quick)
            .unwrap();
        assert_eq!(ports.len(), 3);
    }

    #[test]
    fn test_nonzero_exit_degrades_to_empty() {
        let tmp = TempDir::new().unwrap();
        let mut log = ScanLog::open(tmp.path().join("scan.log")).unwrap();
        let exec = ScriptedExecutor::new().failure(
            &["ss", "-tulpen"],
            1,
            "Cannot open netlink socket: Protocol not supported",
        );

        let ports = collect_open_ports(&mut CommandRunner::new(&exec, &mut log), PortsMode::Full)
            .unwrap();
        assert!(ports.is_empty());
        drop(log);

        let text = std::fs::read_to_string(tmp.path().join("scan.log")).unwrap();
        assert!(text.contains("Cannot open netlink socket"));
        assert!(text.contains(" - WARNING - socket listing failed"));
    }
}
