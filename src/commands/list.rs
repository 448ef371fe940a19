//! List command: human-readable skill summary, never writes.
//! Usage: rudder --list

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use super::summary::print_summary;
use crate::skills::SkillEntry;
use crate::validator;

const MAX_DESC_COLUMN: usize = 60;

/// Print every valid skill with its description and helper directories.
///
/// Returns the process exit code: 0, or 1 when any violation was recorded.
pub fn execute(skills_dir: &Path) -> Result<u8> {
    let report = validator::scan(skills_dir)?;
    print_summary(&report);

    println!();
    if report.entries.is_empty() {
        println!("No skills found.");
    } else {
        print_table(&report.entries);
    }

    Ok(if report.is_clean() { 0 } else { 1 })
}

fn print_table(entries: &[SkillEntry]) {
    let name_width = entries
        .iter()
        .map(|entry| entry.name.len())
        .max()
        .unwrap_or(0)
        .max("SKILL".len());

    println!(
        "{}",
        format!("{:<name_width$}  DESCRIPTION", "SKILL").bold()
    );
    println!("{}  {}", "-".repeat(name_width), "-".repeat(50));

    for entry in entries {
        let helpers = if entry.helpers.is_empty() {
            String::new()
        } else {
            format!(" [{}]", entry.helpers.join(", ")).dimmed().to_string()
        };
        println!(
            "{:<name_width$}  {}{}",
            entry.name,
            truncate(&entry.description, MAX_DESC_COLUMN),
            helpers
        );
    }

    println!();
    println!("Total: {} skill(s)", entries.len());
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max - 3).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}
