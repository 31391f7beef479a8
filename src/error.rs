//! Error types for the subagent CLI.
//!
//! Uses thiserror for derive macros and keeps every message pointed at the
//! offending file, field, alias or server.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for bundle loading, resolution and skill calls.
#[derive(Error, Debug)]
pub enum SubagentError {
    /// A structured field is missing, has the wrong type, or a file is malformed.
    #[error("invalid configuration at {location}: {message}")]
    InvalidConfiguration { location: String, message: String },

    /// An agent requires an MCP server the root table does not declare.
    #[error("agent '{agent}' references unknown MCP server '{server}'")]
    UnknownMcpServer { agent: String, server: String },

    /// Neither an alias, a tool name nor an agent id matched.
    #[error("unknown agent or alias '{alias}'. Available: {available}")]
    UnknownAlias { alias: String, available: String },

    /// Two distinct names sanitize to the same tool identifier.
    #[error("tool name '{tool_name}' is produced by both '{first}' and '{second}'")]
    ToolNameCollision {
        tool_name: String,
        first: String,
        second: String,
    },

    /// A `SKILL.md` front matter block is missing, unparsable or incomplete.
    #[error("malformed skill manifest {}: {message}", path.display())]
    MalformedSkillManifest { path: PathBuf, message: String },

    /// A server needs a credential from an unset environment variable.
    #[error("environment variable {variable} must be set to start MCP server '{server}'")]
    MissingEnvironment { variable: String, server: String },

    /// A single skill tool call failed; the loaded snapshot is unaffected.
    #[error("skill tool '{tool}' failed: {message}")]
    SkillCall { tool: String, message: String },

    /// Filesystem access failed outside of a skill call.
    #[error("failed to access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// User provided invalid arguments.
    #[error("{0}")]
    UserError(String),
}

impl SubagentError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SubagentError::InvalidConfiguration { .. }
            | SubagentError::UnknownMcpServer { .. }
            | SubagentError::MalformedSkillManifest { .. }
            | SubagentError::MissingEnvironment { .. } => exit_codes::CONFIG_ERROR,
            SubagentError::UnknownAlias { .. } | SubagentError::ToolNameCollision { .. } => {
                exit_codes::RESOLUTION_ERROR
            }
            SubagentError::SkillCall { .. } => exit_codes::SKILL_CALL_FAILURE,
            SubagentError::Io { .. } | SubagentError::UserError(_) => exit_codes::USER_ERROR,
        }
    }

    /// Shorthand for an [`SubagentError::InvalidConfiguration`].
    pub fn invalid(location: impl Into<String>, message: impl Into<String>) -> Self {
        SubagentError::InvalidConfiguration {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Shorthand for an [`SubagentError::Io`] tied to `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SubagentError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for subagent operations.
pub type Result<T> = std::result::Result<T, SubagentError>;
