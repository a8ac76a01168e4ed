//! System identity collector.

use super::identity::{resolve_identity, IdentityEnv};
use super::runner::CommandRunner;
use super::types::SystemInfo;
use crate::scan::ScanError;

pub const SECTION_TITLE: &str = "System info";

/// Collect user, hostname, kernel release and uptime.
pub fn collect_system_info(
    runner: &mut CommandRunner<'_>,
    identity: &IdentityEnv,
) -> Result<SystemInfo, ScanError> {
    runner.log().section(SECTION_TITLE)?;

    let user = resolve_identity(identity);
    runner.log().info(&format!("user: {}", user))?;

    let hostname = runner.run(&["hostname"])?.raw_output;
    let kernel = runner.run(&["uname", "-r"])?.raw_output;
    let uptime = runner.run(&["uptime"])?.raw_output;

    Ok(SystemInfo {
        user,
        hostname,
        kernel,
        uptime,
    })
}
