//! Validate command: discovery + parse + validate, zero writes.
//! Usage: rudder --validate (usable as a pre-commit check)

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use super::summary::print_summary;
use crate::validator;

/// Check every skill and report, without building the router.
///
/// Returns the process exit code: 0 when every skill is valid (including
/// zero skills found), 1 otherwise.
pub fn execute(skills_dir: &Path) -> Result<u8> {
    let report = validator::scan(skills_dir)?;
    print_summary(&report);

    println!();
    if report.is_clean() {
        println!("{}", "All skills valid".green().bold());
        Ok(0)
    } else {
        println!(
            "{}",
            format!(
                "Validation completed with {} violation(s)",
                report.violations.len()
            )
            .red()
            .bold()
        );
        Ok(1)
    }
}
