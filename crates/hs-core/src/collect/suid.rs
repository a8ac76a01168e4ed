//! SUID file inventory.
//!
//! Best-effort: the search runs through `sh -c` so unreadable directories
//! can be silenced with `2>/dev/null` and the result bounded with `head`.
//! Paths the scan cannot read are simply absent from the result.

use super::runner::CommandRunner;
use super::types::non_blank_lines;
use crate::scan::ScanError;

pub const SECTION_TITLE: &str = "SUID files";

/// Shell pipeline listing at most `limit` set-UID regular files.
pub fn suid_search_script(limit: usize) -> String {
    format!(
        "find / -perm -4000 -type f 2>/dev/null | head -n {}",
        limit
    )
}

/// Collect up to `limit` SUID file paths.
pub fn collect_suid_files(
    runner: &mut CommandRunner<'_>,
    limit: usize,
) -> Result<Vec<String>, ScanError> {
    runner.log().section(SECTION_TITLE)?;

    let script = suid_search_script(limit);
    let result = runner.run(&["sh", "-c", script.as_str()])?;

    Ok(non_blank_lines(&result.raw_output)
        .take(limit)
        .map(str::to_string)
        .collect())
}
