//! Console rendering of a [`ScanResult`].
//!
//! Text output shows each field under a fixed label and bounds every list
//! to `display_limit` entries. JSON output is the serialized result, with
//! disabled sections as `null`.

use crate::collect::ScanResult;
use hs_common::OutputFormat;
use std::fmt::Write as _;
use std::path::Path;

/// Shown in place of an empty scalar field.
pub const UNAVAILABLE: &str = "(unavailable)";

/// Shown for an empty list.
pub const NONE_FOUND: &str = "- none found";

fn scalar(value: &str) -> &str {
    if value.trim().is_empty() {
        UNAVAILABLE
    } else {
        value
    }
}

/// Render at most `limit` entries, each indented, followed by the count
/// of entries left out. An empty list renders `empty_line`.
pub fn render_list(items: &[String], limit: usize, empty_line: &str) -> Vec<String> {
    if items.is_empty() {
        return vec![empty_line.to_string()];
    }

    let mut lines: Vec<String> = items
        .iter()
        .take(limit)
        .map(|item| format!("  {}", item))
        .collect();
    if items.len() > limit {
        lines.push(format!("  ... {} more", items.len() - limit));
    }
    lines
}

/// Human-readable report.
pub fn render_text(result: &ScanResult, display_limit: usize, log_path: &Path) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Scan complete ===");
    let _ = writeln!(out);

    let system = &result.system;
    let _ = writeln!(out, "System information:");
    let _ = writeln!(out, "- User: {}", scalar(&system.user));
    let _ = writeln!(out, "- Hostname: {}", scalar(&system.hostname));
    let _ = writeln!(out, "- Kernel: {}", scalar(&system.kernel));
    let _ = writeln!(out, "- Uptime: {}", scalar(&system.uptime));

    if let Some(network) = &result.network {
        let _ = writeln!(out);
        let _ = writeln!(out, "Network:");
        let _ = writeln!(
            out,
            "- Interfaces: {} lines captured",
            network.interface_line_count()
        );
        let _ = writeln!(out, "- Routes:");
        for line in render_list(&network.route_lines(), display_limit, "  - none found") {
            let _ = writeln!(out, "{}", line);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Open ports:");
    for line in render_list(&result.ports, display_limit, NONE_FOUND) {
        let _ = writeln!(out, "{}", line);
    }

    if let Some(files) = &result.suid_files {
        let _ = writeln!(out);
        let _ = writeln!(out, "SUID files (excerpt):");
        let empty = format!("{} (or insufficient permission)", NONE_FOUND);
        for line in render_list(files, display_limit, &empty) {
            let _ = writeln!(out, "{}", line);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Log file: {}", log_path.display());
    out
}

/// Pretty-printed JSON report.
pub fn render_json(result: &ScanResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

/// Render in the requested format.
pub fn render(
    result: &ScanResult,
    format: OutputFormat,
    display_limit: usize,
    log_path: &Path,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_text(result, display_limit, log_path)),
        OutputFormat::Json => render_json(result).map(|json| format!("{}\n", json)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::{NetworkInfo, SystemInfo};

    fn ports(n: usize) -> Vec<String> {
        (0..n)
            .map(|i| format!("tcp LISTEN 0 128 0.0.0.0:{} 0.0.0.0:*", 8000 + i))
            .collect()
    }

    fn sample() -> ScanResult {
        ScanResult {
            system: SystemInfo {
                user: "alice (via elevation)".into(),
                hostname: "web-01".into(),
                kernel: "6.8.0-45-generic".into(),
                uptime: String::new(),
            },
            network: None,
            ports: Vec::new(),
            suid_files: None,
        }
    }

    #[test]
    fn test_list_bounded_with_remainder() {
        let lines = render_list(&ports(20), 15, NONE_FOUND);
        assert_eq!(lines.len(), 16);
        assert!(lines[0].ends_with("0.0.0.0:8000 0.0.0.0:*"));
        assert_eq!(lines[15], "  ... 5 more");
    }

    #[test]
    fn test_list_at_limit_has_no_remainder() {
        let lines = render_list(&ports(15), 15, NONE_FOUND);
        assert_eq!(lines.len(), 15);
        assert!(!lines.iter().any(|l| l.contains("more")));
    }

    #[test]
    fn test_empty_ports_says_none_found() {
        let text = render_text(&sample(), 15, Path::new("logs/security_scan.log"));
        let after = text.split("Open ports:\n").nth(1).unwrap();
        assert!(after.starts_with("- none found\n"));
    }

    #[test]
    fn test_twenty_ports_show_fifteen_and_five_more() {
        let mut result = sample();
        result.ports = ports(20);
        let text = render_text(&result, 15, Path::new("scan.log"));

        assert_eq!(text.matches("tcp LISTEN").count(), 15);
        assert!(text.contains("... 5 more"));
    }

    #[test]
    fn test_scalars_and_log_path() {
        let text = render_text(&sample(), 15, Path::new("logs/security_scan.log"));
        assert!(text.starts_with("=== Scan complete ===\n"));
        assert!(text.contains("- User: alice (via elevation)\n"));
        assert!(text.contains("- Uptime: (unavailable)\n"));
        assert!(text.ends_with("Log file: logs/security_scan.log\n"));
    }

    #[test]
    fn test_disabled_sections_absent() {
        let text = render_text(&sample(), 15, Path::new("scan.log"));
        assert!(!text.contains("Network:"));
        assert!(!text.contains("SUID files"));
    }

    #[test]
    fn test_enabled_but_empty_suid() {
        let mut result = sample();
        result.suid_files = Some(Vec::new());
        let text = render_text(&result, 15, Path::new("scan.log"));
        assert!(text.contains("SUID files (excerpt):\n- none found (or insufficient permission)\n"));
    }

    #[test]
    fn test_network_summary() {
        let mut result = sample();
        result.network = Some(NetworkInfo {
            interfaces: "1: lo\n    inet 127.0.0.1/8\n2: eth0\n".into(),
            routes: "default via 10.0.0.1 dev eth0\n".into(),
        });
        let text = render_text(&result, 15, Path::new("scan.log"));
        assert!(text.contains("- Interfaces: 3 lines captured\n"));
        assert!(text.contains("- Routes:\n  default via 10.0.0.1 dev eth0\n"));
    }

    #[test]
    fn test_json_distinguishes_disabled_and_empty() {
        let mut result = sample();
        let json: serde_json::Value = serde_json::from_str(&render_json(&result).unwrap()).unwrap();
        assert!(json["suid_files"].is_null());

        result.suid_files = Some(Vec::new());
        let json: serde_json::Value = serde_json::from_str(&render_json(&result).unwrap()).unwrap();
        assert_eq!(json["suid_files"], serde_json::json!([]));
        assert_eq!(json["system"]["hostname"], "web-01");
    }
}
