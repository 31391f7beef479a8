//! Skill tools: one callable tool per skill with `preview` and `full` intents.
//!
//! A `preview` call returns the manifest, a short body excerpt and attachment
//! metadata. A `full` call adds the complete body and every attachment's
//! contents, read through an [`AttachmentReader`] at call time.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

use super::attachment::AttachmentReader;
use super::loader::SkillRecord;
use crate::error::{Result, SubagentError};

/// Maximum length, in characters, of the body excerpt in a preview.
pub const PREVIEW_EXCERPT_LIMIT: usize = 500;

/// Response granularity requested from a skill tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillIntent {
    #[default]
    Preview,
    Full,
}

impl SkillIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillIntent::Preview => "preview",
            SkillIntent::Full => "full",
        }
    }
}

impl fmt::Display for SkillIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillIntent {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "preview" => Ok(SkillIntent::Preview),
            "full" => Ok(SkillIntent::Full),
            other => Err(format!("intent must be 'preview' or 'full', got '{}'", other)),
        }
    }
}

/// Tool descriptor handed to the agent runtime, backed by its skill.
#[derive(Debug, Clone)]
pub struct SkillTool {
    pub name: String,
    pub description: String,
    pub skill: Arc<SkillRecord>,
}

/// Serializable descriptor without the backing skill.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

impl SkillTool {
    /// Build the tool for a loaded skill.
    pub fn new(skill: Arc<SkillRecord>) -> Self {
        Self {
            name: skill.tool_name(),
            description: format!("{} (skill: {})", skill.description, skill.name),
            skill,
        }
    }

    /// JSON schema of the single `intent` parameter.
    pub fn input_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "intent": {
                    "type": "string",
                    "enum": ["preview", "full"],
                    "default": "preview",
                    "description": "Use 'full' to read the entire skill and its attachments."
                }
            },
            "additionalProperties": false
        })
    }

    pub fn descriptor(&self) -> SkillToolDescriptor {
        SkillToolDescriptor {
            name: self.name.clone(),
            description: self.description.clone(),
            input_schema: Self::input_schema(),
        }
    }

    /// Invoke the tool with raw JSON arguments as sent by a runtime.
    ///
    /// Accepts `null`, `{}` or `{"intent": "preview" | "full"}`.
    pub fn call_with_arguments(
        &self,
        arguments: &Value,
        reader: &dyn AttachmentReader,
    ) -> Result<Value> {
        let intent = match arguments {
            Value::Null => SkillIntent::default(),
            Value::Object(map) => {
                if let Some(unexpected) = map.keys().find(|k| k.as_str() != "intent") {
                    return Err(self.call_error(format!("unexpected argument '{}'", unexpected)));
                }
                match map.get("intent") {
                    None | Some(Value::Null) => SkillIntent::default(),
                    Some(Value::String(s)) => s.parse::<SkillIntent>().map_err(|e| self.call_error(e))?,
                    Some(_) => return Err(self.call_error("intent must be a string")),
                }
            }
            _ => return Err(self.call_error("arguments must be a JSON object")),
        };
        self.call(intent, reader)
    }

    /// Invoke the tool.
    ///
    /// Attachment contents are only read for [`SkillIntent::Full`]. A failed
    /// read fails this call only.
    pub fn call(&self, intent: SkillIntent, reader: &dyn AttachmentReader) -> Result<Value> {
        debug!(tool = %self.name, %intent, "skill tool call");
        let skill = &self.skill;

        let mut payload = Map::new();
        payload.insert("skill".to_string(), manifest_json(skill));
        payload.insert("preview".to_string(), Value::String(preview_excerpt(&skill.body)));
        payload.insert(
            "attachments".to_string(),
            Value::Array(
                skill
                    .attachments
                    .iter()
                    .map(|a| {
                        json!({
                            "relative_path": a.relative_path,
                            "size_bytes": a.size_bytes,
                            "available_via": "intent='full'",
                        })
                    })
                    .collect(),
            ),
        );

        if intent == SkillIntent::Full {
            payload.insert("instructions".to_string(), Value::String(skill.body.clone()));

            let mut contents = Map::new();
            for attachment in &skill.attachments {
                let bytes = reader.read(attachment).map_err(|e| {
                    self.call_error(format!(
                        "failed to read attachment '{}': {}",
                        attachment.relative_path, e
                    ))
                })?;
                contents.insert(attachment.relative_path.clone(), encode_contents(bytes));
            }
            payload.insert("attachment_contents".to_string(), Value::Object(contents));
        }

        Ok(Value::Object(payload))
    }

    fn call_error(&self, message: impl Into<String>) -> SubagentError {
        SubagentError::SkillCall {
            tool: self.name.clone(),
            message: message.into(),
        }
    }
}

/// Build the tools for an agent's skills.
///
/// Fails with [`SubagentError::ToolNameCollision`] if two skills share a tool name.
pub fn materialize_skill_tools(skills: &[Arc<SkillRecord>]) -> Result<Vec<SkillTool>> {
    let mut seen: BTreeMap<String, &Path> = BTreeMap::new();
    let mut tools = Vec::with_capacity(skills.len());

    for skill in skills {
        let tool = SkillTool::new(Arc::clone(skill));
        if let Some(previous) = seen.insert(tool.name.clone(), &skill.directory) {
            return Err(SubagentError::ToolNameCollision {
                tool_name: tool.name,
                first: previous.display().to_string(),
                second: skill.directory.display().to_string(),
            });
        }
        tools.push(tool);
    }

    Ok(tools)
}

fn manifest_json(skill: &SkillRecord) -> Value {
    let extensions: Map<String, Value> = skill
        .extensions
        .iter()
        .map(|(k, v)| (k.clone(), yaml_to_json(v)))
        .collect();
    json!({
        "slug": skill.slug,
        "name": skill.name,
        "description": skill.description,
        "tags": tags_json(&skill.tags),
        "extensions": extensions,
    })
}

fn tags_json(tags: &BTreeSet<String>) -> Value {
    Value::Array(tags.iter().cloned().map(Value::String).collect())
}

/// Convert a YAML extension value for the JSON payload.
///
/// Values that have no JSON form (non-string keys, tags) fall back to their
/// YAML text.
fn yaml_to_json(value: &serde_yaml::Value) -> Value {
    serde_json::to_value(value).unwrap_or_else(|_| {
        Value::String(
            serde_yaml::to_string(value)
                .map(|s| s.trim_end().to_string())
                .unwrap_or_default(),
        )
    })
}

/// UTF-8 contents as text, anything else as base64.
fn encode_contents(bytes: Vec<u8>) -> Value {
    match String::from_utf8(bytes) {
        Ok(text) => Value::String(text),
        Err(err) => json!({
            "encoding": "base64",
            "data": BASE64.encode(err.into_bytes()),
        }),
    }
}

/// First [`PREVIEW_EXCERPT_LIMIT`] characters of the body, `...`-suffixed when cut.
pub fn preview_excerpt(body: &str) -> String {
    let text = body.trim();
    if text.chars().count() <= PREVIEW_EXCERPT_LIMIT {
        return text.to_string();
    }
    let cut: String = text.chars().take(PREVIEW_EXCERPT_LIMIT - 3).collect();
    format!("{}...", cut.trim_end())
}
