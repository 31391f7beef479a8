//! Cross-reference check between agents and the MCP server table.

use std::collections::BTreeMap;

use super::record::AgentMap;
use crate::config::ServerDefinition;
use crate::error::{Result, SubagentError};

/// Every server an agent requires must be declared.
///
/// Agents are checked in id order and servers in declared order; the first
/// miss is reported.
pub fn validate_server_references(
    agents: &AgentMap,
    servers: &BTreeMap<String, ServerDefinition>,
) -> Result<()> {
    for agent in agents.values() {
        if let Some(missing) = agent
            .required_servers
            .iter()
            .find(|name| !servers.contains_key(*name))
        {
            return Err(SubagentError::UnknownMcpServer {
                agent: agent.id.clone(),
                server: missing.clone(),
            });
        }
    }
    Ok(())
}
