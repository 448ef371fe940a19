//! Validation rules for discovered skills.
//!
//! Rules are checked independently and every violation found is reported,
//! so a batch of broken skills can be fixed in one pass. File-local
//! problems (malformed headers, unreadable files) become violations for
//! that file; the scan itself keeps going.

use anyhow::{Context, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info};

use crate::parser::{parse_frontmatter, FrontmatterError, RawHeader};
use crate::skills::{discovery, SkillEntry};

/// Maximum character length of a skill description
pub const MAX_DESCRIPTION_LEN: usize = 1024;

// Lowercase letters, digits, hyphens; 1-64 characters
static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]{1,64}$").expect("Invalid regex"));

/// One broken rule
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViolationKind {
    #[error("could not read file: {0}")]
    Unreadable(String),
    #[error("malformed frontmatter: {0}")]
    MalformedHeader(#[from] FrontmatterError),
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("name '{name}' must be lowercase letters, digits, and hyphens (1-64 characters)")]
    InvalidName { name: String },
    #[error("name '{name}' does not match its directory '{directory}'")]
    DirectoryMismatch { name: String, directory: String },
    #[error("description is empty")]
    EmptyDescription,
    #[error("description is {len} characters (max {MAX_DESCRIPTION_LEN})")]
    DescriptionTooLong { len: usize },
    #[error("name '{name}' is also claimed by {}", .other.display())]
    DuplicateName { name: String, other: PathBuf },
}

/// A broken rule tied to the file that broke it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Offending SKILL.md, relative to the skills root
    pub path: PathBuf,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn new(path: impl Into<PathBuf>, kind: ViolationKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// Aggregate result of one scan over the skills root
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Entries that passed every rule, sorted by name
    pub entries: Vec<SkillEntry>,
    /// Every rule broken anywhere in the tree
    pub violations: Vec<Violation>,
    /// Candidate SKILL.md files examined
    pub scanned: usize,
}

impl ScanReport {
    /// True when no violations were recorded
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of distinct files with at least one violation
    pub fn invalid_files(&self) -> usize {
        let mut paths: Vec<&Path> = self.violations.iter().map(|v| v.path.as_path()).collect();
        paths.sort();
        paths.dedup();
        paths.len()
    }
}

/// Check a decoded header against the per-entry rules.
///
/// `dir_name` is the name of the directory containing the SKILL.md.
/// Returns every violation found; empty means the header is valid.
pub fn check_header(header: &RawHeader, dir_name: &str) -> Vec<ViolationKind> {
    let mut violations = Vec::new();

    match header.name.as_deref() {
        None => violations.push(ViolationKind::MissingField("name")),
        Some(name) => {
            if !NAME_PATTERN.is_match(name) {
                violations.push(ViolationKind::InvalidName {
                    name: name.to_string(),
                });
            }
            if name != dir_name {
                violations.push(ViolationKind::DirectoryMismatch {
                    name: name.to_string(),
                    directory: dir_name.to_string(),
                });
            }
        }
    }

    match header.description.as_deref() {
        None => violations.push(ViolationKind::MissingField("description")),
        Some(description) => {
            let len = description.chars().count();
            if description.trim().is_empty() {
                violations.push(ViolationKind::EmptyDescription);
            } else if len > MAX_DESCRIPTION_LEN {
                violations.push(ViolationKind::DescriptionTooLong { len });
            }
        }
    }

    violations
}

/// Run discovery, parsing, and validation over the skills root.
///
/// Never aborts on a per-file problem; only an unreadable root is an error.
pub fn scan(root: &Path) -> Result<ScanReport> {
    info!("scanning {}", root.display());

    let mut report = ScanReport::default();

    for skill_file in discovery::candidates(root)? {
        report.scanned += 1;

        let rel_path = skill_file
            .strip_prefix(root)
            .unwrap_or(&skill_file)
            .to_path_buf();

        let content = match fs::read_to_string(&skill_file) {
            Ok(content) => content,
            Err(err) => {
                report
                    .violations
                    .push(Violation::new(rel_path, ViolationKind::Unreadable(err.to_string())));
                continue;
            }
        };

        debug!("parsing {}", rel_path.display());
        let header = match parse_frontmatter(&content) {
            Ok((header, _body)) => header,
            Err(err) => {
                report
                    .violations
                    .push(Violation::new(rel_path, ViolationKind::MalformedHeader(err)));
                continue;
            }
        };

        let skill_dir = skill_file
            .parent()
            .with_context(|| format!("no parent directory for {}", skill_file.display()))?;
        let dir_name = skill_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let kinds = check_header(&header, &dir_name);
        if kinds.is_empty() {
            // check_header guarantees both fields are present
            let entry = SkillEntry {
                name: header.name.clone().unwrap_or_default(),
                description: header.description.clone().unwrap_or_default(),
                path: rel_path,
                helpers: discovery::helper_dirs(skill_dir),
                extra: header.extra,
            };
            debug!("valid skill: {} at {}", entry.name, entry.path.display());
            report.entries.push(entry);
        } else {
            for kind in kinds {
                report.violations.push(Violation::new(rel_path.clone(), kind));
            }
        }
    }

    flag_duplicates(&mut report);
    report.entries.sort_by(|a, b| a.name.cmp(&b.name));

    info!(
        "found {} valid skill(s), {} violation(s)",
        report.entries.len(),
        report.violations.len()
    );
    Ok(report)
}

/// Report every entry whose name is claimed more than once and drop all of
/// them from the valid set. No claimant wins; first-wins would make the
/// output depend on traversal order.
fn flag_duplicates(report: &mut ScanReport) {
    let mut by_name: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    for entry in &report.entries {
        by_name
            .entry(entry.name.clone())
            .or_default()
            .push(entry.path.clone());
    }

    let duplicated: Vec<(&String, &Vec<PathBuf>)> =
        by_name.iter().filter(|(_, paths)| paths.len() > 1).collect();

    for (name, paths) in &duplicated {
        for path in paths.iter() {
            let other = paths
                .iter()
                .find(|p| *p != path)
                .cloned()
                .unwrap_or_else(|| path.clone());
            report.violations.push(Violation::new(
                path.clone(),
                ViolationKind::DuplicateName {
                    name: (*name).clone(),
                    other,
                },
            ));
        }
    }

    let duplicate_names: Vec<String> = duplicated.iter().map(|(name, _)| (*name).clone()).collect();
    report
        .entries
        .retain(|entry| !duplicate_names.contains(&entry.name));
}
