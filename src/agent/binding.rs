//! Name-to-agent binding resolution.
//!
//! # Resolution Order
//!
//! 1. Declared alias (`aliases` table in the root file)
//! 2. Exposed tool name (sanitized alias)
//! 3. Raw agent id
//! 4. Error listing every accepted name

use super::record::{AgentMap, AgentRecord};
use super::registry::AliasRegistry;
use crate::error::{Result, SubagentError};

/// Resolved agent binding for a requested name.
#[derive(Debug, Clone)]
pub struct AgentBinding<'a> {
    /// The agent record.
    pub agent: &'a AgentRecord,
    /// The name the caller used (the agent id for default bindings).
    pub requested: String,
    /// How the binding was resolved.
    pub source: BindingSource,
}

/// How an agent binding was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingSource {
    Alias,
    ToolName,
    AgentId,
    /// No name given; `default_agent` or the smallest id.
    Default,
}

impl BindingSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            BindingSource::Alias => "alias",
            BindingSource::ToolName => "tool_name",
            BindingSource::AgentId => "agent_id",
            BindingSource::Default => "default",
        }
    }
}

/// Resolve `name` to a loaded agent.
///
/// # Errors
///
/// `UnknownAlias` when no alias, tool name or agent id matches.
pub fn resolve_agent<'a>(
    name: &str,
    registry: &AliasRegistry,
    agents: &'a AgentMap,
) -> Result<AgentBinding<'a>> {
    let hit = registry
        .agent_for_alias(name)
        .map(|id| (id, BindingSource::Alias))
        .or_else(|| {
            registry
                .tool(name)
                .map(|t| (t.agent_id.as_str(), BindingSource::ToolName))
        })
        .or_else(|| {
            agents
                .contains_key(name)
                .then_some((name, BindingSource::AgentId))
        });

    match hit.and_then(|(id, source)| agents.get(id).map(|agent| (agent, source))) {
        Some((agent, source)) => Ok(AgentBinding {
            agent,
            requested: name.to_string(),
            source,
        }),
        None => Err(SubagentError::UnknownAlias {
            alias: name.to_string(),
            available: available_names(registry, agents),
        }),
    }
}

/// Resolve the agent used when no name is given.
pub fn resolve_default<'a>(
    registry: &AliasRegistry,
    agents: &'a AgentMap,
) -> Result<AgentBinding<'a>> {
    match registry
        .default_agent_id(agents)
        .and_then(|id| agents.get(id))
    {
        Some(agent) => Ok(AgentBinding {
            agent,
            requested: agent.id.clone(),
            source: BindingSource::Default,
        }),
        None => Err(SubagentError::UserError(
            "no agents are configured. Add at least one directory to agent_dirs.".to_string(),
        )),
    }
}

/// Get a formatted list of accepted names for error messages.
fn available_names(registry: &AliasRegistry, agents: &AgentMap) -> String {
    let names = registry.available_names(agents);
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}
