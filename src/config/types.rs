//! Root configuration types and defaults.
//!
//! This module defines the OpenAI block, the per-bundle defaults and the
//! MCP server table entries used by [`RootConfig`](super::RootConfig).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Session timeout for stdio servers when none is configured.
pub const DEFAULT_STDIO_TIMEOUT_SECONDS: f64 = 300.0;

/// Session timeout for HTTP servers when none is configured.
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: f64 = 60.0;

/// Model used by agents that do not set one.
pub const DEFAULT_MODEL: &str = "gpt-5";

/// Which OpenAI API flavour the runtime should speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DefaultApi {
    #[default]
    Responses,
    ChatCompletions,
}

impl DefaultApi {
    pub fn as_str(&self) -> &'static str {
        match self {
            DefaultApi::Responses => "responses",
            DefaultApi::ChatCompletions => "chat_completions",
        }
    }
}

/// OpenAI platform settings shared by every agent run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OpenAiSettings {
    /// Name of the environment variable holding the API key. Never read here.
    pub api_key_env_var: String,

    pub default_api: DefaultApi,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            api_key_env_var: "OPENAI_API_KEY".to_string(),
            default_api: DefaultApi::default(),
        }
    }
}

/// Values applied to agents that leave a field unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgentDefaults {
    /// Temperature for agents whose `agent.toml` does not set one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// One entry of the `[mcp_servers]` table, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerDefinition {
    Stdio(StdioServer),
    Http(HttpServer),
}

/// A server launched as a subprocess speaking over stdio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StdioServer {
    /// Display name; defaults to the table key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub command: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,

    #[serde(default = "default_stdio_timeout")]
    pub client_session_timeout_seconds: f64,
}

/// A server reached over streamable HTTP(S).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpServer {
    /// Display name; defaults to the table key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub url: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,

    /// Environment variable whose value becomes `Authorization: Bearer <token>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token_env_var: Option<String>,

    #[serde(default = "default_http_timeout")]
    pub client_session_timeout_seconds: f64,
}

fn default_stdio_timeout() -> f64 {
    DEFAULT_STDIO_TIMEOUT_SECONDS
}

fn default_http_timeout() -> f64 {
    DEFAULT_HTTP_TIMEOUT_SECONDS
}

impl ServerDefinition {
    /// Display name, falling back to the table key.
    pub fn display_name<'a>(&'a self, key: &'a str) -> &'a str {
        let name = match self {
            ServerDefinition::Stdio(s) => s.name.as_deref(),
            ServerDefinition::Http(h) => h.name.as_deref(),
        };
        name.unwrap_or(key)
    }

    pub fn timeout_seconds(&self) -> f64 {
        match self {
            ServerDefinition::Stdio(s) => s.client_session_timeout_seconds,
            ServerDefinition::Http(h) => h.client_session_timeout_seconds,
        }
    }
}
