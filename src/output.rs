//! Console output.
//!
//! Everything the user reads goes through here. Results go to stdout;
//! errors and warnings go to stderr.

use crate::config::BUILD_INFO;
use crate::scanner::ScanReport;
use crate::types::ScanTarget;
use chrono::{DateTime, Local};
use console::style;
use std::fs;
use std::path::Path;

const RULE_WIDTH: usize = 50;

/// Build the logo block: the decorative file (if any) plus version details.
pub fn render_logo(logo: Option<&Path>) -> String {
    let mut out = String::new();

    if let Some(path) = logo {
        match fs::read_to_string(path) {
            Ok(text) => {
                out.push_str(&text);
                if !text.ends_with('\n') {
                    out.push('\n');
                }
            }
            Err(_) => out.push_str("(logo?)\n"),
        }
    }

    out.push_str(&format!(
        "\nVersion:\t{}\nAuthor(s):\t{}\nLast Mod.: {}\n",
        BUILD_INFO.version, BUILD_INFO.authors, BUILD_INFO.last_modified
    ));
    out
}

/// Print the logo block.
pub fn print_logo(logo: Option<&Path>) {
    println!("{}", render_logo(logo));
}

/// Print the banner shown before probing starts.
pub fn print_scan_header(target: &ScanTarget, started_at: DateTime<Local>) {
    let rule = "-".repeat(RULE_WIDTH);
    println!("{}", style(&rule).dim());
    println!("Scanning target {}", style(target).bold());
    println!("Time started: {}", started_at.format("%Y-%m-%d %H:%M:%S%.6f"));
    println!("{}", style(&rule).dim());
}

/// The result lines for a finished scan, without styling.
pub fn render_results(report: &ScanReport) -> Vec<String> {
    if report.all_closed() {
        return vec!["All ports are closed!".to_string()];
    }

    let mut lines = vec![String::new(), "Results:".to_string(), String::new()];
    lines.extend(
        report
            .open_ports
            .iter()
            .map(|port| format!("Port {} is open", port)),
    );
    lines
}

/// One-line summary of what was probed.
pub fn render_summary(report: &ScanReport) -> String {
    format!(
        "{} ports probed in {} ({:.2}s)",
        report.ports_scanned,
        report.range,
        report.duration_ms as f64 / 1000.0
    )
}

/// Print scan results.
pub fn print_results(report: &ScanReport) {
    println!("{}", style(render_summary(report)).dim());
    for line in render_results(report) {
        if report.all_closed() {
            println!("{}", style(line).yellow());
        } else if line.starts_with("Port ") {
            println!("{}", style(line).green());
        } else {
            println!("{}", style(line).bold());
        }
    }
    println!();
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}
