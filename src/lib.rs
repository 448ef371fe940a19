//! rudder - skill router builder
//!
//! Scans a skills directory for SKILL.md files, validates their YAML
//! frontmatter, and writes a route table mapping skill name to path at
//! `<skills-dir>/_router/SKILL.md`. The pipeline is strictly linear:
//!
//! - `skills::discovery` walks the tree and yields candidate files
//! - `parser` decodes each frontmatter header into an open record
//! - `validator` checks the rules and accumulates violations
//! - `router` renders and writes the deterministic route table
//! - `commands` wires the above to the CLI flags

pub mod commands;
pub mod parser;
pub mod router;
pub mod skills;
pub mod validator;
