//! The validated skill entry record

use std::collections::BTreeMap;
use std::path::PathBuf;

/// One validated skill, built fresh each run and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct SkillEntry {
    /// Skill name: lowercase letters, digits, hyphens; equals the
    /// containing directory's name
    pub name: String,
    /// Free-form trigger text shown by `--list`
    pub description: String,
    /// Location of the SKILL.md file, relative to the skills root
    pub path: PathBuf,
    /// Helper directories present in the skill folder (scripts, references,
    /// assets), sorted
    pub helpers: Vec<String>,
    /// Optional and unknown frontmatter keys, passed through unvalidated
    pub extra: BTreeMap<String, serde_yaml::Value>,
}
