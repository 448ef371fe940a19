//! Frontmatter extraction for SKILL.md files.
//!
//! The header is the YAML block between a `---` line at the very top of the
//! file and the next `---` line. Everything after the closing delimiter is
//! the body, which this tool does not process.

use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Reasons a frontmatter header fails to decode
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrontmatterError {
    #[error("no frontmatter delimiter (---) at the top of the file")]
    MissingDelimiter,
    #[error("frontmatter block is not terminated by a closing ---")]
    Unterminated,
    #[error("frontmatter is not valid YAML: {0}")]
    InvalidYaml(String),
    #[error("frontmatter is not a key/value mapping")]
    NotAMapping,
}

/// Decoded frontmatter header.
///
/// An open record: `name` and `description` are the fields this tool
/// understands, everything else (`license`, `compatibility`, `metadata`,
/// `allowed-tools`, future keys) is carried in `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawHeader {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Split file content into a decoded header and the unparsed body.
///
/// # Returns
/// * `Ok((header, body))` - Header decoded; body is everything after the
///   closing delimiter
/// * `Err(FrontmatterError)` - Delimiters missing or the block is not a
///   well-formed YAML mapping
pub fn parse_frontmatter(content: &str) -> Result<(RawHeader, String), FrontmatterError> {
    let lines: Vec<&str> = content.lines().collect();

    if lines.first().map(|l| l.trim()) != Some("---") {
        return Err(FrontmatterError::MissingDelimiter);
    }

    let close = lines
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, line)| line.trim() == "---")
        .map(|(idx, _)| idx)
        .ok_or(FrontmatterError::Unterminated)?;

    let yaml_src = lines[1..close].join("\n");
    let body = lines[close + 1..].join("\n");

    // An empty block is an empty header; the validator reports the missing
    // fields, not the parser.
    if yaml_src.trim().is_empty() {
        return Ok((RawHeader::default(), body));
    }

    let value: serde_yaml::Value = serde_yaml::from_str(&yaml_src)
        .map_err(|err| FrontmatterError::InvalidYaml(err.to_string()))?;

    match value {
        serde_yaml::Value::Mapping(_) => {
            let header: RawHeader = serde_yaml::from_value(value)
                .map_err(|err| FrontmatterError::InvalidYaml(err.to_string()))?;
            Ok((header, body))
        }
        _ => Err(FrontmatterError::NotAMapping),
    }
}
