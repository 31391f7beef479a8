//! Agent bundle loading.
//!
//! # Bundle Layout
//!
//! ```text
//! agents/workflow/
//! ├── agent.toml          # Required: id + settings
//! ├── instructions.md     # Required: long-form instructions
//! ├── entry_message.md    # Optional: kickoff message
//! └── skills/             # Optional: one folder per skill
//! ```
//!
//! # agent.toml
//!
//! ```toml
//! id = "workflow"
//!
//! [agent]
//! name = "Workflow"
//! model = "gpt-5"
//! temperature = 0.2
//! reasoning_tokens = 4096
//! mcp_servers = ["codex"]
//! ```
//!
//! The settings may also sit at the top level next to `id`.

use std::path::Path;
use std::sync::Arc;
use toml::{Table, Value};
use tracing::debug;

use super::fields::FieldReader;
use super::record::AgentRecord;
use crate::config::AgentDefaults;
use crate::config::types::DEFAULT_MODEL;
use crate::error::{Result, SubagentError};
use crate::skill::load_agent_skills;

pub const AGENT_FILE_NAME: &str = "agent.toml";
pub const INSTRUCTIONS_FILE_NAME: &str = "instructions.md";
pub const ENTRY_MESSAGE_FILE_NAME: &str = "entry_message.md";

const SETTINGS_FIELDS: &[&str] = &["name", "model", "temperature", "reasoning_tokens", "mcp_servers"];

/// Load one agent bundle directory.
///
/// `defaults` supplies values for fields the agent leaves unset.
pub fn load_agent_bundle(agent_dir: &Path, defaults: &AgentDefaults) -> Result<AgentRecord> {
    if !agent_dir.is_dir() {
        return Err(SubagentError::invalid(
            agent_dir.display().to_string(),
            format!(
                "agent path must be a directory containing {}, {} and optionally {}",
                AGENT_FILE_NAME, INSTRUCTIONS_FILE_NAME, ENTRY_MESSAGE_FILE_NAME
            ),
        ));
    }

    let agent_file = agent_dir.join(AGENT_FILE_NAME);
    let content = std::fs::read_to_string(&agent_file).map_err(|e| {
        SubagentError::invalid(
            agent_file.display().to_string(),
            format!("failed to read agent file: {}", e),
        )
    })?;
    let table: Table = toml::from_str(&content).map_err(|e| {
        SubagentError::invalid(agent_file.display().to_string(), e.to_string().trim_end())
    })?;

    let top = FieldReader::new(&table, "", &agent_file);
    let id = top.required_str("id")?;

    let (settings_table, prefix) = match table.get("agent") {
        Some(Value::Table(settings)) => {
            top.deny_unknown(&["id", "agent"])?;
            (settings, "agent.")
        }
        Some(other) => {
            return Err(SubagentError::invalid(
                top.location("agent"),
                format!("expected a table, found {}", other.type_str()),
            ));
        }
        None => {
            let mut allowed = vec!["id"];
            allowed.extend_from_slice(SETTINGS_FIELDS);
            top.deny_unknown(&allowed)?;
            (&table, "")
        }
    };

    let settings = FieldReader::new(settings_table, prefix, &agent_file);
    if prefix == "agent." {
        settings.deny_unknown(SETTINGS_FIELDS)?;
    }

    let display_name = settings.required_str("name")?;
    let model = settings
        .optional_str("model")?
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());
    let temperature = settings.optional_f64("temperature")?.or(defaults.temperature);
    let reasoning_tokens = settings.optional_u32("reasoning_tokens")?;
    let required_servers = settings.string_list("mcp_servers")?;

    let instructions = read_markdown(&agent_dir.join(INSTRUCTIONS_FILE_NAME), true)?;
    let entry_message = read_markdown(&agent_dir.join(ENTRY_MESSAGE_FILE_NAME), false)?;

    let skills = load_agent_skills(agent_dir)?
        .into_iter()
        .map(Arc::new)
        .collect::<Vec<_>>();

    debug!(
        agent = %id,
        dir = %agent_dir.display(),
        skills = skills.len(),
        servers = ?required_servers,
        "loaded agent bundle"
    );

    Ok(AgentRecord {
        id,
        display_name,
        model,
        temperature,
        reasoning_tokens,
        instructions,
        entry_message,
        required_servers,
        skills,
        directory: agent_dir.to_path_buf(),
    })
}

/// Read and trim a markdown file.
///
/// A required file must exist and be non-blank; an optional one yields `""`
/// when absent.
fn read_markdown(path: &Path, required: bool) -> Result<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let content = content.trim().to_string();
            if required && content.is_empty() {
                return Err(SubagentError::invalid(
                    path.display().to_string(),
                    "file must not be empty",
                ));
            }
            Ok(content)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => Ok(String::new()),
        Err(e) => Err(SubagentError::invalid(
            path.display().to_string(),
            format!("failed to read file: {}", e),
        )),
    }
}
