//! Route table rendering and the canonical output file.
//!
//! The table is rebuilt wholly from the validated entries on every run and
//! written to `<skills-root>/_router/SKILL.md`. Entries are sorted by name
//! so unchanged input always produces byte-identical output.

use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::skills::discovery::{ROUTER_DIR, SKILL_FILE};
use crate::skills::SkillEntry;

/// The generated index mapping skill name to path
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<(String, PathBuf)>,
}

impl RouteTable {
    /// Build a table from validated entries, sorted by name
    pub fn from_entries(entries: &[SkillEntry]) -> Self {
        let mut routes: Vec<(String, PathBuf)> = entries
            .iter()
            .map(|entry| (entry.name.clone(), entry.path.clone()))
            .collect();
        routes.sort_by(|a, b| a.0.cmp(&b.0));
        Self { routes }
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Render the table: a heading, then one `name: path` line per entry
    pub fn render(&self) -> String {
        let mut lines = vec!["# Skill Router".to_string(), String::new()];
        for (name, path) in &self.routes {
            lines.push(format!("{}: {}", name, path.display()));
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Canonical output path under the skills root
pub fn router_path(root: &Path) -> PathBuf {
    root.join(ROUTER_DIR).join(SKILL_FILE)
}

/// Copy the existing route table, if any, to a timestamped sibling.
///
/// A failed copy is an error; the caller must not overwrite the canonical
/// file when backup creation fails.
pub fn backup(root: &Path) -> Result<Option<PathBuf>> {
    let router_file = router_path(root);
    if !router_file.is_file() {
        return Ok(None);
    }

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let mut backup_path = router_file.with_file_name(format!("SKILL.{timestamp}.bak"));
    // two runs inside the same second must not clobber the first backup
    let mut counter = 1;
    while backup_path.exists() {
        counter += 1;
        backup_path = router_file.with_file_name(format!("SKILL.{timestamp}_{counter}.bak"));
    }
    fs::copy(&router_file, &backup_path)
        .with_context(|| format!("Failed to back up router to {}", backup_path.display()))?;

    info!("backed up existing router to {}", backup_path.display());
    Ok(Some(backup_path))
}

/// Write the rendered table to the canonical location, creating the
/// `_router` directory if needed. Overwrites existing content.
pub fn write(root: &Path, table: &RouteTable) -> Result<PathBuf> {
    let router_file = router_path(root);
    let router_dir = router_file
        .parent()
        .context("router path has no parent directory")?;

    fs::create_dir_all(router_dir)
        .with_context(|| format!("Failed to create {}", router_dir.display()))?;
    fs::write(&router_file, table.render())
        .with_context(|| format!("Failed to write {}", router_file.display()))?;

    Ok(router_file)
}
