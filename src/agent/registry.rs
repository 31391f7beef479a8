//! Alias registry: external names, exposed tool names, and the default agent.

use serde::Serialize;
use serde_json::{Value, json};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use super::record::AgentMap;
use crate::error::{Result, SubagentError};
use crate::naming::{is_valid_tool_name, sanitize_tool_name};

/// One tool exposed to the orchestrating runtime. Several aliases that
/// sanitize to the same name for the same agent share one entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AliasTool {
    pub tool_name: String,
    pub agent_id: String,
    pub aliases: Vec<String>,
    pub description: String,
}

impl AliasTool {
    pub fn input_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "request": {
                    "type": "string",
                    "description": "Optional request that replaces the agent's entry message.",
                },
            },
            "additionalProperties": false,
        })
    }

    /// Tool definition as handed to the runtime.
    pub fn definition(&self) -> Value {
        json!({
            "name": self.tool_name,
            "description": self.description,
            "input_schema": Self::input_schema(),
        })
    }
}

/// Listing entry for one agent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentSummary {
    pub id: String,
    pub display_name: String,
    pub model: String,
    pub aliases: Vec<String>,
    pub tool_names: Vec<String>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AliasRegistry {
    aliases: BTreeMap<String, String>,
    tools: BTreeMap<String, AliasTool>,
    default_agent: Option<String>,
}

impl AliasRegistry {
    /// Build the registry over loaded agents.
    ///
    /// `location` names the root file for error messages.
    pub fn build(
        aliases: &BTreeMap<String, String>,
        default_agent: Option<&str>,
        agents: &AgentMap,
        location: &str,
    ) -> Result<Self> {
        if let Some(id) = default_agent.filter(|id| !agents.contains_key(*id)) {
            return Err(SubagentError::invalid(
                format!("{location}: default_agent"),
                format!("unknown agent id '{}'. Available: {}", id, join_ids(agents)),
            ));
        }

        let mut tools: BTreeMap<String, AliasTool> = BTreeMap::new();
        for (alias, agent_id) in aliases {
            let Some(agent) = agents.get(agent_id) else {
                return Err(SubagentError::invalid(
                    format!("{location}: aliases.\"{alias}\""),
                    format!("unknown agent id '{}'. Available: {}", agent_id, join_ids(agents)),
                ));
            };

            let tool_name = sanitize_tool_name(alias);
            if !is_valid_tool_name(&tool_name) {
                return Err(SubagentError::invalid(
                    format!("{location}: aliases.\"{alias}\""),
                    "alias produces an empty tool name",
                ));
            }

            match tools.get_mut(&tool_name) {
                Some(existing) if existing.agent_id == *agent_id => {
                    existing.aliases.push(alias.clone());
                }
                Some(existing) => {
                    return Err(SubagentError::ToolNameCollision {
                        tool_name,
                        first: existing.aliases[0].clone(),
                        second: alias.clone(),
                    });
                }
                None => {
                    debug!(alias = %alias, tool = %tool_name, agent = %agent_id, "registered alias");
                    tools.insert(
                        tool_name.clone(),
                        AliasTool {
                            tool_name,
                            agent_id: agent_id.clone(),
                            aliases: vec![alias.clone()],
                            description: agent.summary(),
                        },
                    );
                }
            }
        }

        Ok(Self {
            aliases: aliases.clone(),
            tools,
            default_agent: default_agent.map(str::to_string),
        })
    }

    pub fn agent_for_alias(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    pub fn tool(&self, tool_name: &str) -> Option<&AliasTool> {
        self.tools.get(tool_name)
    }

    /// Exposed tools, sorted by tool name.
    pub fn tools(&self) -> impl Iterator<Item = &AliasTool> {
        self.tools.values()
    }

    pub fn tool_definitions(&self) -> Vec<Value> {
        self.tools().map(AliasTool::definition).collect()
    }

    pub fn alias_map(&self) -> &BTreeMap<String, String> {
        &self.aliases
    }

    pub fn tool_names(&self) -> BTreeSet<String> {
        self.tools.keys().cloned().collect()
    }

    /// Configured default, or the smallest agent id.
    pub fn default_agent_id<'a>(&'a self, agents: &'a AgentMap) -> Option<&'a str> {
        self.default_agent
            .as_deref()
            .or_else(|| agents.keys().next().map(String::as_str))
    }

    /// Every name `resolve` accepts, sorted.
    pub fn available_names(&self, agents: &AgentMap) -> Vec<String> {
        let mut names: BTreeSet<String> = self.aliases.keys().cloned().collect();
        names.extend(agents.keys().cloned());
        names.into_iter().collect()
    }

    pub fn summaries(&self, agents: &AgentMap) -> Vec<AgentSummary> {
        agents
            .values()
            .map(|agent| {
                let aliases = self
                    .aliases
                    .iter()
                    .filter(|(_, id)| **id == agent.id)
                    .map(|(alias, _)| alias.clone())
                    .collect();
                let tool_names = self
                    .tools
                    .values()
                    .filter(|t| t.agent_id == agent.id)
                    .map(|t| t.tool_name.clone())
                    .collect();
                AgentSummary {
                    id: agent.id.clone(),
                    display_name: agent.display_name.clone(),
                    model: agent.model.clone(),
                    aliases,
                    tool_names,
                    skills: agent.skills.iter().map(|s| s.tool_name()).collect(),
                }
            })
            .collect()
    }
}

fn join_ids(agents: &AgentMap) -> String {
    if agents.is_empty() {
        "(none)".to_string()
    } else {
        agents.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
    }
}
