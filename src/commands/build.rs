//! Build command: scan, validate, and write (or preview) the route table.
//! Usage: rudder [--dry-run | --backup]

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use super::summary::print_summary;
use crate::router::{self, RouteTable};
use crate::validator;

/// Execute the build.
///
/// # Arguments
/// * `skills_dir` - Root directory to scan
/// * `dry_run` - Print the would-be table instead of writing it
/// * `backup` - Copy the existing table to a timestamped sibling before
///   overwriting; a failed backup aborts without touching the table
///
/// # Returns
/// The process exit code: 0 on success, 1 when any validation violation
/// was recorded. Valid entries are still written either way.
pub fn execute(skills_dir: &Path, dry_run: bool, backup: bool) -> Result<u8> {
    let report = validator::scan(skills_dir)?;
    print_summary(&report);

    let table = RouteTable::from_entries(&report.entries);

    if dry_run {
        println!();
        println!("{}", "--- Router content (dry run) ---".dimmed());
        print!("{}", table.render());
        println!("{}", "--- End ---".dimmed());
    } else {
        if backup {
            router::backup(skills_dir)?;
        }
        let written = router::write(skills_dir, &table)?;
        println!();
        println!(
            "{} Router written to {} ({} route(s))",
            "✓".green().bold(),
            written.display(),
            table.len()
        );
    }

    Ok(if report.is_clean() { 0 } else { 1 })
}
