//! `SKILL.md` parsing.
//!
//! A skill manifest is YAML front matter delimited by `---` lines, followed by
//! free-form markdown instructions:
//!
//! ```text
//! ---
//! name: Deploy
//! description: Release process for the service
//! tags: [release, ops]
//! owner: platform-team
//! ---
//!
//! Follow the release checklist.
//! ```
//!
//! `name` and `description` are required. `tags` is optional; a `tags` value
//! that is not a list of scalars or a string is kept as an extension, like
//! every other key.

use serde_yaml::{Mapping, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::error::{Result, SubagentError};

/// Parsed front matter plus body of a `SKILL.md` file.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillManifest {
    pub name: String,
    pub description: String,
    pub tags: BTreeSet<String>,
    /// Keys other than `name` and `description`, untouched. Holds `tags` too
    /// when it is not a list or string.
    pub extensions: BTreeMap<String, Value>,
    /// Everything after the closing delimiter, whitespace-trimmed.
    pub body: String,
}

impl SkillManifest {
    /// Parse manifest content. `path` is only used to label errors.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let malformed = |message: String| SubagentError::MalformedSkillManifest {
            path: path.to_path_buf(),
            message,
        };

        let (front_matter, body) = split_front_matter(content).map_err(malformed)?;

        let value: Value = if front_matter.trim().is_empty() {
            Value::Mapping(Mapping::new())
        } else {
            serde_yaml::from_str(front_matter)
                .map_err(|e| malformed(format!("front matter is not valid YAML: {}", e)))?
        };

        let mapping = match value {
            Value::Mapping(mapping) => mapping,
            Value::Null => Mapping::new(),
            _ => return Err(malformed("front matter must be a key/value mapping".to_string())),
        };

        let mut name = None;
        let mut description = None;
        let mut tags = BTreeSet::new();
        let mut extensions = BTreeMap::new();

        for (key, value) in mapping {
            let key = match key {
                Value::String(key) => key,
                other => {
                    return Err(malformed(format!(
                        "front matter keys must be strings, found {}",
                        describe(&other)
                    )));
                }
            };

            match key.as_str() {
                "name" => name = Some(required_string("name", value).map_err(malformed)?),
                "description" => {
                    description = Some(required_string("description", value).map_err(malformed)?)
                }
                "tags" => match parse_tags(&value) {
                    Some(parsed) => tags = parsed,
                    None => {
                        extensions.insert(key, value);
                    }
                },
                _ => {
                    extensions.insert(key, value);
                }
            }
        }

        let name = name.ok_or_else(|| malformed("missing required key 'name'".to_string()))?;
        let description = description
            .ok_or_else(|| malformed("missing required key 'description'".to_string()))?;

        Ok(Self {
            name,
            description,
            tags,
            extensions,
            body: body.trim().to_string(),
        })
    }

    /// Parse a manifest file from disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SubagentError::MalformedSkillManifest {
                path: path.to_path_buf(),
                message: format!("failed to read manifest: {}", e),
            }
        })?;
        Self::parse(&content, path)
    }
}

/// Split content into front matter and body.
///
/// The first non-blank line must be `---`; the block ends at the next line
/// that is exactly `---` (surrounding whitespace ignored). CRLF is accepted.
fn split_front_matter(content: &str) -> std::result::Result<(&str, &str), String> {
    let content = content.trim_start_matches('\u{feff}').trim_start();

    let mut lines = content.split_inclusive('\n');
    let opening = lines
        .next()
        .ok_or_else(|| "manifest is empty".to_string())?;
    if opening.trim() != "---" {
        return Err("manifest must begin with a '---' front matter block".to_string());
    }

    let front_start = opening.len();
    let mut offset = front_start;
    for line in lines {
        if line.trim() == "---" {
            let front_matter = &content[front_start..offset];
            let body = &content[offset + line.len()..];
            return Ok((front_matter, body));
        }
        offset += line.len();
    }

    Err("front matter is missing its closing '---' delimiter".to_string())
}

fn required_string(key: &str, value: Value) -> std::result::Result<String, String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Value::String(_) => Err(format!("'{}' cannot be empty", key)),
        other => Err(format!("'{}' must be a string, found {}", key, describe(&other))),
    }
}

/// Tags may be a YAML list of scalars or a single comma-separated string.
///
/// Returns `None` for any other shape; the caller keeps the raw value.
fn parse_tags(value: &Value) -> Option<BTreeSet<String>> {
    match value {
        Value::Null => Some(BTreeSet::new()),
        Value::String(s) => Some(
            s.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        Value::Sequence(items) => items
            .iter()
            .map(scalar_tag)
            .filter(|t| !matches!(t, Some(s) if s.is_empty()))
            .collect(),
        _ => None,
    }
}

fn scalar_tag(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn test_path() -> PathBuf {
        PathBuf::from("/bundle/skills/deploy/SKILL.md")
    }

    #[test]
    fn test_parse_full_manifest() {
        let content = r#"---
name: Deploy
description: Release process
tags: [release, ops]
owner: platform-team
version: 2
---

# Deploy

Follow the release checklist.
"#;
        let manifest = SkillManifest::parse(content, &test_path()).unwrap();

        assert_eq!(manifest.name, "Deploy");
        assert_eq!(manifest.description, "Release process");
        assert!(manifest.tags.contains("release"));
        assert!(manifest.tags.contains("ops"));
        assert_eq!(
            manifest.extensions.get("owner"),
            Some(&Value::String("platform-team".to_string()))
        );
        assert_eq!(manifest.extensions.get("version"), Some(&Value::from(2)));
        assert_eq!(manifest.body, "# Deploy\n\nFollow the release checklist.");
    }

    #[test]
    fn test_minimal_manifest_has_empty_tags_and_body() {
        let content = "---\nname: Deploy\ndescription: Release process\n---\n";
        let manifest = SkillManifest::parse(content, &test_path()).unwrap();

        assert!(manifest.tags.is_empty());
        assert!(manifest.extensions.is_empty());
        assert_eq!(manifest.body, "");
    }

    #[test]
    fn test_missing_description_fails() {
        let content = "---\nname: Deploy\n---\nBody.\n";
        let err = SkillManifest::parse(content, &test_path()).unwrap_err();

        assert!(matches!(err, SubagentError::MalformedSkillManifest { .. }));
        assert!(err.to_string().contains("'description'"));
    }

    #[test]
    fn test_missing_name_fails() {
        let content = "---\ndescription: Release process\n---\nBody.\n";
        let err = SkillManifest::parse(content, &test_path()).unwrap_err();
        assert!(err.to_string().contains("'name'"));
    }

    #[test]
    fn test_empty_name_fails() {
        let content = "---\nname: \"\"\ndescription: d\n---\n";
        let err = SkillManifest::parse(content, &test_path()).unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_non_string_description_fails() {
        let content = "---\nname: Deploy\ndescription: [a, b]\n---\n";
        let err = SkillManifest::parse(content, &test_path()).unwrap_err();
        assert!(err.to_string().contains("must be a string"));
    }

    #[test]
    fn test_missing_front_matter_fails() {
        let err = SkillManifest::parse("# Just markdown\n", &test_path()).unwrap_err();
        assert!(err.to_string().contains("must begin with"));
    }

    #[test]
    fn test_unclosed_front_matter_fails() {
        let content = "---\nname: Deploy\ndescription: d\n\nBody without closing\n";
        let err = SkillManifest::parse(content, &test_path()).unwrap_err();
        assert!(err.to_string().contains("closing"));
    }

    #[test]
    fn test_invalid_yaml_fails() {
        let content = "---\nname: [unterminated\ndescription: d\n---\n";
        let err = SkillManifest::parse(content, &test_path()).unwrap_err();
        assert!(matches!(err, SubagentError::MalformedSkillManifest { .. }));
        assert!(err.to_string().contains("not valid YAML"));
    }

    #[test]
    fn test_scalar_front_matter_fails() {
        let content = "---\njust a string\n---\n";
        let err = SkillManifest::parse(content, &test_path()).unwrap_err();
        assert!(err.to_string().contains("key/value mapping"));
    }

    #[test]
    fn test_empty_front_matter_reports_missing_name() {
        let err = SkillManifest::parse("---\n---\nBody\n", &test_path()).unwrap_err();
        assert!(err.to_string().contains("'name'"));
    }

    #[test]
    fn test_comma_separated_tags() {
        let content = "---\nname: n\ndescription: d\ntags: \"alpha, beta,,gamma \"\n---\n";
        let manifest = SkillManifest::parse(content, &test_path()).unwrap();
        let tags: Vec<&str> = manifest.tags.iter().map(String::as_str).collect();
        assert_eq!(tags, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_crlf_and_leading_whitespace() {
        let content = "\r\n---\r\nname: Deploy\r\ndescription: d\r\n---\r\n\r\nBody line\r\n";
        let manifest = SkillManifest::parse(content, &test_path()).unwrap();
        assert_eq!(manifest.name, "Deploy");
        assert_eq!(manifest.body, "Body line");
    }

    #[test]
    fn test_body_may_contain_horizontal_rules() {
        let content = "---\nname: n\ndescription: d\n---\nintro\n---\nmore\n";
        let manifest = SkillManifest::parse(content, &test_path()).unwrap();
        assert_eq!(manifest.body, "intro\n---\nmore");
    }

    #[test]
    fn test_numeric_and_boolean_tags_become_strings() {
        let content = "---\nname: n\ndescription: d\ntags: [2024, ops, true]\n---\n";
        let manifest = SkillManifest::parse(content, &test_path()).unwrap();
        let tags: Vec<&str> = manifest.tags.iter().map(String::as_str).collect();
        assert_eq!(tags, vec!["2024", "ops", "true"]);
        assert!(manifest.extensions.is_empty());
    }

    #[test]
    fn test_structured_tags_are_kept_as_extension() {
        let content = "---\nname: n\ndescription: d\ntags:\n  team: ops\n---\n";
        let manifest = SkillManifest::parse(content, &test_path()).unwrap();

        assert!(manifest.tags.is_empty());
        let raw = manifest.extensions.get("tags").unwrap();
        assert_eq!(raw.get("team").and_then(Value::as_str), Some("ops"));
    }

    #[test]
    fn test_list_with_nested_entries_is_kept_as_extension() {
        let content = "---\nname: n\ndescription: d\ntags: [ops, [nested]]\n---\n";
        let manifest = SkillManifest::parse(content, &test_path()).unwrap();

        assert!(manifest.tags.is_empty());
        assert!(manifest.extensions.get("tags").unwrap().is_sequence());
    }

    #[test]
    fn test_unquoted_colon_value_needs_quoting() {
        let unquoted = "---\nname: Deploy\ndescription: Use when: deploying\n---\n";
        let err = SkillManifest::parse(unquoted, &test_path()).unwrap_err();
        assert!(err.to_string().contains("not valid YAML"));

        let quoted = "---\nname: Deploy\ndescription: \"Use when: deploying\"\n---\n";
        let manifest = SkillManifest::parse(quoted, &test_path()).unwrap();
        assert_eq!(manifest.description, "Use when: deploying");
    }
}
