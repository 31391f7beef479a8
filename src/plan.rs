//! Run plan: everything the agent runtime needs to start one run.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::agent::AgentBinding;
use crate::config::ServerDefinition;
use crate::error::{Result, SubagentError};
use crate::skill::SkillToolDescriptor;
use crate::snapshot::ConfigSnapshot;

const AUTHORIZATION_HEADER: &str = "Authorization";

/// How to reach one MCP server.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerLaunch {
    Stdio {
        name: String,
        display_name: String,
        command: String,
        args: Vec<String>,
        env: BTreeMap<String, String>,
        timeout_seconds: f64,
    },
    Http {
        name: String,
        display_name: String,
        url: String,
        headers: BTreeMap<String, String>,
        timeout_seconds: f64,
    },
}

impl ServerLaunch {
    /// Resolve one server definition, pulling bearer tokens through `env`.
    pub fn resolve(
        name: &str,
        definition: &ServerDefinition,
        env: &dyn Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let display_name = definition.display_name(name).to_string();
        match definition {
            ServerDefinition::Stdio(s) => Ok(ServerLaunch::Stdio {
                name: name.to_string(),
                display_name,
                command: s.command.clone(),
                args: s.args.clone(),
                env: s.env.clone(),
                timeout_seconds: s.client_session_timeout_seconds,
            }),
            ServerDefinition::Http(h) => {
                let mut headers = h.headers.clone();
                let has_authorization = headers
                    .keys()
                    .any(|k| k.eq_ignore_ascii_case(AUTHORIZATION_HEADER));
                if let Some(variable) = h
                    .bearer_token_env_var
                    .as_ref()
                    .filter(|_| !has_authorization)
                {
                    let token = env(variable)
                        .filter(|t| !t.is_empty())
                        .ok_or_else(|| SubagentError::MissingEnvironment {
                            variable: variable.clone(),
                            server: name.to_string(),
                        })?;
                    headers.insert(AUTHORIZATION_HEADER.to_string(), format!("Bearer {token}"));
                }
                Ok(ServerLaunch::Http {
                    name: name.to_string(),
                    display_name,
                    url: h.url.clone(),
                    headers,
                    timeout_seconds: h.client_session_timeout_seconds,
                })
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunPlan {
    pub agent_id: String,
    /// The name the caller resolved.
    pub alias: String,
    pub display_name: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning_tokens: Option<u32>,
    pub api_key_env_var: String,
    pub default_api: &'static str,
    pub instructions: String,
    pub entry_message: String,
    pub servers: Vec<ServerLaunch>,
    pub skill_tools: Vec<SkillToolDescriptor>,
}

impl RunPlan {
    /// Build the plan for a resolved agent.
    ///
    /// A non-blank `request` replaces the entry message.
    pub fn build(
        snapshot: &ConfigSnapshot,
        binding: &AgentBinding<'_>,
        request: Option<&str>,
        env: &dyn Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let agent = binding.agent;

        let servers = agent
            .required_servers
            .iter()
            .map(|name| {
                let definition = snapshot.root.server(name).ok_or_else(|| {
                    SubagentError::UnknownMcpServer {
                        agent: agent.id.clone(),
                        server: name.clone(),
                    }
                })?;
                ServerLaunch::resolve(name, definition, env)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            agent_id: agent.id.clone(),
            alias: binding.requested.clone(),
            display_name: agent.display_name.clone(),
            model: agent.model.clone(),
            temperature: agent.temperature,
            reasoning_tokens: agent.reasoning_tokens,
            api_key_env_var: snapshot.root.openai.api_key_env_var.clone(),
            default_api: snapshot.root.openai.default_api.as_str(),
            instructions: agent.instructions.clone(),
            entry_message: agent.effective_entry_message(request).to_string(),
            servers,
            skill_tools: snapshot
                .skill_tools(&agent.id)
                .iter()
                .map(|t| t.descriptor())
                .collect(),
        })
    }
}
