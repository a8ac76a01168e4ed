//! Network interface and routing collector.

use super::runner::CommandRunner;
use super::types::NetworkInfo;
use crate::scan::ScanError;

pub const SECTION_TITLE: &str = "Network info";

/// Collect `ip a` and `ip r` listings.
pub fn collect_network_info(runner: &mut CommandRunner<'_>) -> Result<NetworkInfo, ScanError> {
    runner.log().section(SECTION_TITLE)?;

    let interfaces = runner.run(&["ip", "a"])?.raw_output;
    let routes = runner.run(&["ip", "r"])?.raw_output;

    Ok(NetworkInfo { interfaces, routes })
}
