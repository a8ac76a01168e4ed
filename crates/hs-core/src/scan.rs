//! Scan orchestration.
//!
//! [`Scanner`] decides which collectors run, runs them in a fixed order
//! (system, network, ports, SUID) and assembles the [`ScanResult`]. A run
//! moves through [`ScanPhase`]s; any error while collecting moves it to
//! [`ScanPhase::Failed`] and is written to the scan log with its source
//! chain before being returned.

use crate::collect::{
    collect_network_info, collect_open_ports, collect_suid_files, collect_system_info,
    CommandRunner, IdentityEnv, PortsMode, ScanResult, ToolError,
};
use crate::scanlog::{ScanLog, ScanLogError};
use hs_config::{ScanConfig, DEFAULT_SUID_LIMIT};
use serde::Serialize;
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;
use tracing::{debug, error, info};

/// Errors that abort a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("command execution failed: {0}")]
    Tool(#[from] ToolError),

    #[error("scan log write failed: {0}")]
    Log(#[from] ScanLogError),

    #[error(transparent)]
    Phase(#[from] PhaseError),
}

impl From<ScanError> for hs_common::Error {
    fn from(err: ScanError) -> Self {
        hs_common::Error::Collection(err.to_string())
    }
}

/// Lifecycle of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanPhase {
    #[default]
    Idle,
    PreconditionsChecked,
    LoggingInitialized,
    Collecting,
    Assembled,
    Presented,
    Terminal,
    Failed,
}

impl ScanPhase {
    /// Check if transition to target phase is valid.
    pub fn can_transition_to(&self, target: Self) -> bool {
        use ScanPhase::*;
        matches!(
            (self, target),
            (Idle, PreconditionsChecked)
                | (PreconditionsChecked, LoggingInitialized)
                | (LoggingInitialized, Collecting)
                | (Collecting, Assembled)
                | (Assembled, Presented)
                | (Presented, Terminal)
                | (Collecting | Assembled, Failed)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ScanPhase::Terminal | ScanPhase::Failed)
    }

    /// Move to `target`, rejecting illegal transitions.
    pub fn advance(&mut self, target: Self) -> Result<(), PhaseError> {
        if !self.can_transition_to(target) {
            return Err(PhaseError {
                from: *self,
                to: target,
            });
        }
        debug!(from = %self, to = %target, "scan phase transition");
        *self = target;
        Ok(())
    }
}

impl fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScanPhase::Idle => "idle",
            ScanPhase::PreconditionsChecked => "preconditions_checked",
            ScanPhase::LoggingInitialized => "logging_initialized",
            ScanPhase::Collecting => "collecting",
            ScanPhase::Assembled => "assembled",
            ScanPhase::Presented => "presented",
            ScanPhase::Terminal => "terminal",
            ScanPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Illegal phase transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid scan phase transition: {from} -> {to}")]
pub struct PhaseError {
    pub from: ScanPhase,
    pub to: ScanPhase,
}

/// Which collectors run and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Terse socket listing.
    pub quick: bool,
    pub network: bool,
    pub suid: bool,
    pub suid_limit: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            quick: false,
            network: true,
            suid: false,
            suid_limit: DEFAULT_SUID_LIMIT,
        }
    }
}

impl ScanOptions {
    pub fn from_config(config: &ScanConfig) -> Self {
        Self {
            quick: config.quick,
            network: config.network,
            suid: config.suid,
            suid_limit: config.suid_limit,
        }
    }

    pub fn ports_mode(&self) -> PortsMode {
        PortsMode::from_quick(self.quick)
    }
}

/// Runs the collectors and tracks the run's phase.
#[derive(Debug)]
pub struct Scanner {
    options: ScanOptions,
    identity: IdentityEnv,
    phase: ScanPhase,
}

impl Scanner {
    pub fn new(options: ScanOptions, identity: IdentityEnv) -> Self {
        Self {
            options,
            identity,
            phase: ScanPhase::Idle,
        }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    /// Record that platform and privilege checks passed (or were skipped).
    pub fn preconditions_checked(&mut self) -> Result<(), PhaseError> {
        self.phase.advance(ScanPhase::PreconditionsChecked)
    }

    /// Record that the scan log is open.
    pub fn logging_initialized(&mut self) -> Result<(), PhaseError> {
        self.phase.advance(ScanPhase::LoggingInitialized)
    }

    /// Record that the result was shown to the user.
    pub fn presented(&mut self) -> Result<(), PhaseError> {
        self.phase.advance(ScanPhase::Presented)
    }

    /// Close the run after presentation.
    pub fn finish(&mut self) -> Result<(), PhaseError> {
        self.phase.advance(ScanPhase::Terminal)
    }

    /// Mark the run failed after assembly (presentation errors).
    pub fn fail(&mut self) -> Result<(), PhaseError> {
        self.phase.advance(ScanPhase::Failed)
    }

    /// Run all enabled collectors in order and assemble the result.
    ///
    /// On error the phase becomes [`ScanPhase::Failed`] and the error is
    /// written to the scan log before it is returned.
    pub fn run(&mut self, runner: &mut CommandRunner<'_>) -> Result<ScanResult, ScanError> {
        self.phase.advance(ScanPhase::Collecting)?;
        info!(
            quick = self.options.quick,
            network = self.options.network,
            suid = self.options.suid,
            "collecting"
        );

        match self.collect(runner) {
            Ok(result) => {
                self.phase.advance(ScanPhase::Assembled)?;
                Ok(result)
            }
            Err(err) => {
                let failed_in = self.phase;
                self.phase.advance(ScanPhase::Failed)?;
                error!(phase = %failed_in, error = %err, "scan failed");
                if let Err(log_err) = log_failure(runner.log(), failed_in, &err) {
                    error!(error = %log_err, "could not record scan failure in scan log");
                }
                Err(err)
            }
        }
    }

    fn collect(&self, runner: &mut CommandRunner<'_>) -> Result<ScanResult, ScanError> {
        let system = collect_system_info(runner, &self.identity)?;

        let network = if self.options.network {
            Some(collect_network_info(runner)?)
        } else {
            None
        };

        let ports = collect_open_ports(runner, self.options.ports_mode())?;

        let suid_files = if self.options.suid {
            Some(collect_suid_files(runner, self.options.suid_limit)?)
        } else {
            None
        };

        Ok(ScanResult {
            system,
            network,
            ports,
            suid_files,
        })
    }
}

/// Write `err` and every error in its source chain at ERROR level.
pub fn log_failure(
    log: &mut ScanLog,
    phase: ScanPhase,
    err: &(dyn StdError + 'static),
) -> Result<(), ScanLogError> {
    log.error(&format!("Scan failed during {}: {}", phase, err))?;
    let mut source = err.source();
    while let Some(cause) = source {
        log.error(&format!("caused by: {}", cause))?;
        source = cause.source();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::SECTION_TITLES;
    use crate::mock_executor::ScriptedExecutor;
    use tempfile::TempDir;

    fn ready_scanner(options: ScanOptions) -> Scanner {
        let mut scanner = Scanner::new(options, IdentityEnv::default());
        scanner.preconditions_checked().unwrap();
        scanner.logging_initialized().unwrap();
        scanner
    }

    fn scripted_host() -> ScriptedExecutor {
        ScriptedExecutor::new()
            .stdout(&["hostname"], "web-01")
            .stdout(&["uname", "-r"], "6.8.0")
            .stdout(&["uptime"], "up 1 day")
            .stdout(&["ip", "a"], "1: lo")
            .stdout(&["ip", "r"], "default via 10.0.0.1")
            .stdout(&["ss", "-tulpen"], "Netid State\ntcp LISTEN 0 128 *:22 *:*")
    }

    #[test]
    fn test_phase_transitions() {
        let mut phase = ScanPhase::Idle;
        for next in [
            ScanPhase::PreconditionsChecked,
            ScanPhase::LoggingInitialized,
            ScanPhase::Collecting,
            ScanPhase::Assembled,
            ScanPhase::Presented,
            ScanPhase::Terminal,
        ] {
            phase.advance(next).unwrap();
        }
        assert!(phase.is_terminal());
    }

    #[test]
    fn test_illegal_transitions_rejected() {
        let mut phase = ScanPhase::Idle;
        let err = phase.advance(ScanPhase::Collecting).unwrap_err();
        assert_eq!(err.from, ScanPhase::Idle);
        assert_eq!(err.to, ScanPhase::Collecting);
        assert_eq!(phase, ScanPhase::Idle);

        assert!(!ScanPhase::Presented.can_transition_to(ScanPhase::Failed));
        assert!(!ScanPhase::Failed.can_transition_to(ScanPhase::Terminal));
        assert!(ScanPhase::Assembled.can_transition_to(ScanPhase::Failed));
    }

    #[test]
    fn test_default_run_order_and_sections() {
        let tmp = TempDir::new().unwrap();
        let mut log = ScanLog::open(tmp.path().join("scan.log")).unwrap();
        let exec = scripted_host();
        let mut scanner = ready_scanner(ScanOptions::default());

        let result = scanner
            .run(&mut CommandRunner::new(&exec, &mut log))
            .unwrap();

        assert_eq!(scanner.phase(), ScanPhase::Assembled);
        assert_eq!(
            exec.calls(),
            vec!["hostname", "uname -r", "uptime", "ip a", "ip r", "ss -tulpen"]
        );
        assert!(result.network.is_some());
        assert_eq!(result.ports.len(), 1);
        assert!(result.suid_files.is_none());
        drop(log);

        let text = std::fs::read_to_string(tmp.path().join("scan.log")).unwrap();
        let positions: Vec<usize> = SECTION_TITLES[..3]
            .iter()
            .map(|t| text.find(&t.to_uppercase()).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(!text.contains("SUID FILES"));
    }

    #[test]
    fn test_optional_collectors() {
        let tmp = TempDir::new().unwrap();
        let mut log = ScanLog::open(tmp.path().join("scan.log")).unwrap();
        let exec = scripted_host().stdout(&["ss", "-tuln"], "");
        let options = ScanOptions {
            quick: true,
            network: false,
            suid: true,
            suid_limit: 5,
        };
        let mut scanner = ready_scanner(options);

        let result = scanner
            .run(&mut CommandRunner::new(&exec, &mut log))
            .unwrap();

        assert!(result.network.is_none());
        assert!(result.ports.is_empty());
        assert_eq!(result.suid_files, Some(Vec::new()));
        let calls = exec.calls();
        assert!(!calls.iter().any(|c| c.starts_with("ip ")));
        assert!(calls.contains(&"ss -tuln".to_string()));
        assert_eq!(
            calls.last().unwrap(),
            "sh -c find / -perm -4000 -type f 2>/dev/null | head -n 5"
        );
    }

    #[test]
    fn test_ports_failure_does_not_abort() {
        let tmp = TempDir::new().unwrap();
        let mut log = ScanLog::open(tmp.path().join("scan.log")).unwrap();
        let exec = scripted_host().failure(&["ss", "-tulpen"], 1, "netlink: denied");
        let mut scanner = ready_scanner(ScanOptions {
            suid: true,
            ..ScanOptions::default()
        });

        let result = scanner
            .run(&mut CommandRunner::new(&exec, &mut log))
            .unwrap();

        assert!(result.ports.is_empty());
        assert!(result.suid_files.is_some());
        assert!(exec.calls().last().unwrap().starts_with("sh -c find"));
    }

    #[test]
    fn test_spawn_failure_fails_run_and_is_logged() {
        let tmp = TempDir::new().unwrap();
        let mut log = ScanLog::open(tmp.path().join("scan.log")).unwrap();
        let exec = scripted_host().missing("ss");
        let mut scanner = ready_scanner(ScanOptions::default());

        let err = scanner
            .run(&mut CommandRunner::new(&exec, &mut log))
            .unwrap_err();

        assert!(matches!(err, ScanError::Tool(ToolError::CommandNotFound(_))));
        assert_eq!(scanner.phase(), ScanPhase::Failed);
        drop(log);

        let text = std::fs::read_to_string(tmp.path().join("scan.log")).unwrap();
        assert!(text.contains(" - ERROR - Scan failed during collecting: command execution failed"));
        assert!(text.contains(" - ERROR - caused by: command not found: ss"));
    }

    #[test]
    fn test_run_requires_logging_initialized() {
        let tmp = TempDir::new().unwrap();
        let mut log = ScanLog::open(tmp.path().join("scan.log")).unwrap();
        let exec = scripted_host();
        let mut scanner = Scanner::new(ScanOptions::default(), IdentityEnv::default());

        let err = scanner
            .run(&mut CommandRunner::new(&exec, &mut log))
            .unwrap_err();
        assert!(matches!(err, ScanError::Phase(_)));
        assert!(exec.calls().is_empty());
    }

    #[test]
    fn test_options_from_config() {
        let config = ScanConfig {
            quick: true,
            suid: true,
            suid_limit: 7,
            ..ScanConfig::default()
        };
        let options = ScanOptions::from_config(&config);
        assert_eq!(options.ports_mode(), PortsMode::Quick);
        assert!(options.network);
        assert_eq!(options.suid_limit, 7);
    }
}
