//! RootConfig struct definition.

use super::types::{AgentDefaults, OpenAiSettings, ServerDefinition};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Contents of the root `subagents.toml` file.
///
/// Agent bundles are not inlined here; `agent_dirs` points at one directory
/// per agent, resolved relative to the directory holding this file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RootConfig {
    // =========================================================================
    // Agents
    // =========================================================================
    /// Agent bundle directories, relative to the root file.
    pub agent_dirs: Vec<PathBuf>,

    /// Agent id used when no alias is given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_agent: Option<String>,

    /// External alias -> agent id. Many aliases may share one agent.
    pub aliases: BTreeMap<String, String>,

    // =========================================================================
    // Shared settings
    // =========================================================================
    pub openai: OpenAiSettings,

    pub defaults: AgentDefaults,

    /// Server name -> definition.
    pub mcp_servers: BTreeMap<String, ServerDefinition>,
}
