//! Live-system integration tests for ToolRunner and CommandRunner.
//!
//! These tests use real commands and avoid mocks/fakes. They are gated by
//! command availability so they can skip safely on minimal environments.

use hs_core::collect::{
    CommandExecutor, CommandRunner, ToolError, ToolOutput, ToolRunner, ToolSpec, COLLECTOR_COMMANDS,
};
use hs_core::scanlog::ScanLog;
use std::path::Path;
use tempfile::TempDir;

fn command_exists(cmd: &str) -> bool {
    if cmd.contains('/') {
        return Path::new(cmd).exists();
    }

    let Ok(path) = std::env::var("PATH") else {
        return false;
    };

    for dir in path.split(':') {
        if dir.is_empty() {
            continue;
        }
        let candidate = Path::new(dir).join(cmd);
        if candidate.exists() {
            return true;
        }
    }

    false
}

fn run(runner: &ToolRunner, argv: &[&str]) -> Result<ToolOutput, ToolError> {
    runner.execute(&ToolSpec::from_argv(argv)?)
}

#[test]
fn live_tool_runner_true() {
    if !command_exists("true") {
        eprintln!("skipping: true not found in PATH");
        return;
    }

    let runner = ToolRunner::default();
    let output = run(&runner, &["true"]).expect("run true");
    assert!(output.success());
    assert!(output.signal.is_none());
}

#[test]
fn live_tool_runner_false() {
    if !command_exists("false") {
        eprintln!("skipping: false not found in PATH");
        return;
    }

    let runner = ToolRunner::default();
    let output = run(&runner, &["false"]).expect("run false");
    assert!(!output.success());
    assert_eq!(output.exit_code, Some(1));
}

#[test]
#[cfg(unix)]
fn live_tool_runner_signal() {
    if !command_exists("sh") {
        eprintln!("skipping: sh not found in PATH");
        return;
    }

    let runner = ToolRunner::default();
    let output = run(&runner, &["sh", "-c", "kill -9 $$"]).expect("run sh");
    assert_eq!(output.exit_code, None);
    assert_eq!(output.signal, Some(9));
}

#[test]
fn live_tool_runner_missing_binary() {
    let runner = ToolRunner::default();
    match run(&runner, &["hostscan-definitely-missing-tool"]) {
        Err(ToolError::CommandNotFound(cmd)) => {
            assert_eq!(cmd, "hostscan-definitely-missing-tool")
        }
        other => panic!("expected CommandNotFound, got {:?}", other),
    }
}

#[test]
fn live_command_runner_logs_block() {
    if !command_exists("seq") {
        eprintln!("skipping: seq not found in PATH");
        return;
    }

    let tmp = TempDir::new().unwrap();
    let log_path = tmp.path().join("scan.log");
    let executor = ToolRunner::default();
    let mut log = ScanLog::open(&log_path).unwrap();

    let result = CommandRunner::new(&executor, &mut log)
        .run_with_limit(&["seq", "1", "50"], 10)
        .expect("run seq");
    drop(log);

    assert!(result.truncated);
    assert_eq!(result.raw_output.lines().count(), 50);

    let text = std::fs::read_to_string(&log_path).unwrap();
    assert!(text.contains("command: seq 1 50 | exit status: 0"));
    assert!(text.contains("... (40 more lines omitted)"));
    assert_eq!(text.lines().count(), 1 + 1 + 10 + 1);
}

#[test]
fn live_collector_runner_runs_uname() {
    if !command_exists("uname") {
        eprintln!("skipping: uname not found in PATH");
        return;
    }

    let runner = ToolRunner::with_allowlist(COLLECTOR_COMMANDS);
    let output = run(&runner, &["uname", "-r"]).expect("run uname");
    assert!(output.success());
    assert!(!output.stdout_str().trim().is_empty());

    match run(&runner, &["true"]) {
        Err(ToolError::NotAllowed(cmd)) => assert_eq!(cmd, "true"),
        other => panic!("expected NotAllowed, got {:?}", other),
    }
}
