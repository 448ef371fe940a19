//! Candidate discovery: walk the skills root and yield SKILL.md paths.
//!
//! Unreadable subtrees and symlink loops are logged and skipped so one bad
//! skill never blocks indexing the rest. Only a missing or unreadable root
//! is fatal.

use anyhow::{bail, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// The metadata file that marks a directory as a skill
pub const SKILL_FILE: &str = "SKILL.md";

/// Reserved routing directory under the skills root; never indexed
pub const ROUTER_DIR: &str = "_router";

/// Directory names never descended into during scanning
const IGNORED_DIRS: &[&str] = &[
    ROUTER_DIR,
    "__pycache__",
    "node_modules",
    ".venv",
    "venv",
    ".hatch",
    "target",
];

/// Helper directories a skill may carry alongside its SKILL.md
const HELPER_DIRS: &[&str] = &["scripts", "references", "assets"];

fn is_ignored_dir(name: &OsStr) -> bool {
    let name = name.to_string_lossy();
    name.starts_with('.') || IGNORED_DIRS.contains(&name.as_ref())
}

/// Walk `root` and yield every SKILL.md path, in deterministic order.
///
/// Skips the `_router` directory, hidden directories, and common junk
/// directories. Errors mid-walk (permission denied, symlink loops) are
/// reported as warnings and the affected subtree is skipped.
pub fn candidates(root: &Path) -> Result<impl Iterator<Item = PathBuf>> {
    if !root.is_dir() {
        bail!(
            "skills directory does not exist or is not a directory: {}",
            root.display()
        );
    }

    let walk = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !(entry.file_type().is_dir() && is_ignored_dir(entry.file_name()))
        });

    Ok(walk.filter_map(|entry| match entry {
        Ok(entry) if entry.file_type().is_file() && entry.file_name() == OsStr::new(SKILL_FILE) => {
            debug!("candidate: {}", entry.path().display());
            Some(entry.into_path())
        }
        Ok(_) => None,
        Err(err) => {
            warn!("skipping unreadable path: {err}");
            None
        }
    }))
}

/// Find helper directories (scripts/, references/, assets/) in a skill
/// folder, sorted.
pub fn helper_dirs(skill_dir: &Path) -> Vec<String> {
    let mut found: Vec<String> = HELPER_DIRS
        .iter()
        .filter(|helper| skill_dir.join(helper).is_dir())
        .map(|helper| helper.to_string())
        .collect();
    found.sort();
    found
}
