//! Shared end-of-run summary printing

use colored::Colorize;

use crate::validator::ScanReport;

/// Print the scan summary: counts, then every violation with its path.
///
/// Always printed before the process exits, whatever the mode.
pub(crate) fn print_summary(report: &ScanReport) {
    println!();
    println!("{}", "Summary".bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("  Scanned: {}", report.scanned);
    println!("  Valid:   {}", report.entries.len());
    println!("  Invalid: {}", report.invalid_files());

    if !report.violations.is_empty() {
        println!();
        println!("{}", "Violations".bold());
        for violation in &report.violations {
            println!(
                "  {} {}: {}",
                "✗".red().bold(),
                violation.path.display(),
                violation.kind
            );
        }
    }
}
