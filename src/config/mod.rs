//! Root configuration model.
//!
//! This module defines [`RootConfig`], the contents of `subagents.toml`: the
//! OpenAI block, bundle defaults, the MCP server table, the alias table and
//! the list of agent bundle directories. Server entries are tagged by `type`
//! and unknown keys are rejected so typos surface at load time.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::RootConfig;
pub use types::{
    AgentDefaults, DefaultApi, HttpServer, OpenAiSettings, ServerDefinition, StdioServer,
};
