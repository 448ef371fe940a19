//! Skill discovery and metadata types.
//!
//! A skill is a directory containing a `SKILL.md` file whose frontmatter
//! names and describes it. This module finds the candidate files and
//! defines the validated entry record the rest of the pipeline consumes.

pub mod discovery;
mod types;

pub use types::SkillEntry;
