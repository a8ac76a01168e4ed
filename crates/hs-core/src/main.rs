//! hostscan - read-only Linux host diagnostics
//!
//! The main entry point, handling:
//! - Platform and privilege preconditions
//! - Config resolution and CLI overrides
//! - Scan log bootstrap and run framing
//! - Collection, presentation, and exit status

use clap::{ArgAction, Parser};
use hs_common::{OutputFormat, RunId, TOOL_NAME, TOOL_VERSION};
use hs_config::{resolve_config, validate_config, ConfigError, ResolvedConfig, ScanConfig};
use hs_core::collect::{CommandRunner, IdentityEnv, ScanResult, ToolRunner, COLLECTOR_COMMANDS};
use hs_core::exit_codes::ExitCode;
use hs_core::logging::{init_logging, LogConfig, LogLevel};
use hs_core::precheck::check_preconditions;
use hs_core::present::render;
use hs_core::scan::{log_failure, ScanError, ScanOptions, Scanner};
use hs_core::scanlog::ScanLog;
use std::path::PathBuf;
use tracing::{debug, error, info};

/// Read-only Linux host diagnostics: identity, network, listening sockets
/// and SUID files, with an append-only scan log.
#[derive(Parser, Debug)]
#[command(name = "hostscan")]
#[command(author, version, about, long_about = None)]
#[command(disable_version_flag = true)]
struct Cli {
    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,

    /// Terse socket listing (no process attribution)
    #[arg(long)]
    quick: bool,

    /// Skip interface and routing collection
    #[arg(long)]
    no_network: bool,

    /// Enumerate SUID files (slow on large filesystems)
    #[arg(long)]
    suid: bool,

    /// Maximum number of SUID files collected
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    suid_limit: Option<u32>,

    /// Scan log path
    #[arg(long, value_name = "PATH", env = "HOSTSCAN_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Config file path (default: $HOSTSCAN_CONFIG, then XDG, then /etc/hostscan)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Console output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Increase diagnostic verbosity on stderr (--verbose, --verbose --verbose)
    #[arg(long, action = ArgAction::Count)]
    verbose: u8,

    /// Silence diagnostic output on stderr
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Skip the platform and root checks
    #[arg(long, hide = true)]
    skip_preconditions: bool,
}

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig::from_env(LogLevel::from_flags(cli.verbose, cli.quiet), None);
    init_logging(&log_config);

    let exit_code = run(&cli);
    debug!(exit = %exit_code, "exiting");
    std::process::exit(exit_code.as_i32());
}

fn run(cli: &Cli) -> ExitCode {
    if cli.skip_preconditions {
        debug!("precondition checks skipped");
    } else if let Err(err) = check_preconditions() {
        println!("{}", err.console_line());
        return exit_for(&hs_common::Error::from(err));
    }

    let config = match load_config(cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {}", err);
            return exit_for(&hs_common::Error::Config(err.to_string()));
        }
    };

    let mut scanner = Scanner::new(
        ScanOptions::from_config(&config),
        IdentityEnv::from_process_env(),
    );

    let mut log = match open_scan_log(&config, &mut scanner) {
        Ok(log) => log,
        Err(err) => {
            eprintln!("Error: {}", err);
            return exit_for(&err);
        }
    };

    let executor = ToolRunner::with_allowlist(COLLECTOR_COMMANDS);
    let result = {
        let mut runner =
            CommandRunner::new(&executor, &mut log).with_max_log_lines(config.max_log_lines);
        scanner.run(&mut runner)
    };

    let result = match result {
        Ok(result) => result,
        // already written to the scan log by the scanner
        Err(err) => {
            report_failure(&log);
            return exit_for(&hs_common::Error::from(err));
        }
    };

    match finish_report(cli.format, config.display_limit, &result, &mut log) {
        Ok(report) => {
            print!("{}", report);
            if let Err(err) = scanner.presented().and_then(|()| scanner.finish()) {
                error!(error = %err, "scan phase out of order after presentation");
            }
            info!("scan finished");
            ExitCode::Clean
        }
        Err(err) => {
            let phase = scanner.phase();
            if let Err(phase_err) = scanner.fail() {
                error!(error = %phase_err, "could not mark scan failed");
            }
            if let Err(log_err) = log_failure(&mut log, phase, &err) {
                error!(error = %log_err, "could not record failure in scan log");
            }
            report_failure(&log);
            debug!(error_code = err.code(), "report not shown");
            ExitCode::ScanFailed
        }
    }
}

/// Exit code for a failed run, with the stable error code in diagnostics.
fn exit_for(err: &hs_common::Error) -> ExitCode {
    let code = ExitCode::from(err);
    debug!(
        error_code = err.code(),
        category = %err.category(),
        exit = %code,
        "run failed"
    );
    code
}

/// Open the scan log and write the run header.
fn open_scan_log(config: &ScanConfig, scanner: &mut Scanner) -> hs_common::Result<ScanLog> {
    scanner.preconditions_checked().map_err(ScanError::from)?;

    let mut log = ScanLog::open(&config.log_file)?;
    let run_id = RunId::new();
    log.info(&format!(
        "Scan started ({} {}, run {})",
        TOOL_NAME, TOOL_VERSION, run_id
    ))?;
    log.info(&format!(
        "options: quick={} network={} suid={} suid_limit={}",
        config.quick, config.network, config.suid, config.suid_limit
    ))?;

    scanner.logging_initialized().map_err(ScanError::from)?;
    info!(run_id = %run_id, log_file = %config.log_file.display(), "scan started");
    Ok(log)
}

/// Render the report and write the closing record.
///
/// Nothing is printed here: once the report reaches stdout the run can no
/// longer fail.
fn finish_report(
    format: OutputFormat,
    display_limit: usize,
    result: &ScanResult,
    log: &mut ScanLog,
) -> hs_common::Result<String> {
    let report = render(result, format, display_limit, log.path())?;
    log.info("Scan finished successfully")?;
    Ok(report)
}

fn report_failure(log: &ScanLog) {
    println!(
        "An error occurred during the scan. See the log file for details: {}",
        log.path().display()
    );
}

/// Resolve the config file, then apply environment and CLI overrides.
fn load_config(cli: &Cli) -> Result<ScanConfig, ConfigError> {
    let ResolvedConfig {
        mut config,
        path,
        source,
    } = resolve_config(cli.config.as_deref())?;
    debug!(source = %source, path = ?path, "config resolved");

    if let Some(log_file) = &cli.log_file {
        config.log_file = log_file.clone();
    }
    if let Some(limit) = cli.suid_limit {
        config.suid_limit = limit as usize;
    }
    config.quick |= cli.quick;
    config.suid |= cli.suid;
    if cli.no_network {
        config.network = false;
    }

    validate_config(&config)?;
    Ok(config)
}
