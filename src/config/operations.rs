//! Root config loading and validation.

use super::model::RootConfig;
use super::types::ServerDefinition;
use crate::error::{Result, SubagentError};
use std::path::{Path, PathBuf};

impl RootConfig {
    /// Load the root config from a TOML file.
    ///
    /// # Returns
    ///
    /// * `Ok(RootConfig)` - Successfully parsed and validated config
    /// * `Err(SubagentError::Io)` - File could not be read
    /// * `Err(SubagentError::InvalidConfiguration)` - Parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| SubagentError::io(path, e))?;
        Self::from_toml(&content, &path.display().to_string())
    }

    /// Parse the root config from a TOML string.
    ///
    /// `location` is only used to label errors.
    pub fn from_toml(content: &str, location: &str) -> Result<Self> {
        let config: RootConfig = toml::from_str(content)
            .map_err(|e| SubagentError::invalid(location, e.to_string().trim_end()))?;

        config.validate(location)?;
        Ok(config)
    }

    /// Validate values serde cannot express.
    ///
    /// Validation rules:
    /// - At least one agent directory is listed
    /// - Server names are non-empty, stdio commands and http urls are non-empty
    /// - Session timeouts are positive
    /// - Alias strings and their targets are non-empty
    pub fn validate(&self, location: &str) -> Result<()> {
        if self.agent_dirs.is_empty() {
            return Err(SubagentError::invalid(
                format!("{location}: agent_dirs"),
                "configuration must list at least one agent directory",
            ));
        }

        for (name, server) in &self.mcp_servers {
            let field = format!("{location}: mcp_servers.{name}");
            if name.trim().is_empty() {
                return Err(SubagentError::invalid(field, "server name cannot be empty"));
            }
            match server {
                ServerDefinition::Stdio(stdio) if stdio.command.trim().is_empty() => {
                    return Err(SubagentError::invalid(
                        format!("{field}.command"),
                        "stdio server command cannot be empty",
                    ));
                }
                ServerDefinition::Http(http) if http.url.trim().is_empty() => {
                    return Err(SubagentError::invalid(
                        format!("{field}.url"),
                        "http server url cannot be empty",
                    ));
                }
                _ => {}
            }
            let timeout = server.timeout_seconds();
            if !(timeout.is_finite() && timeout > 0.0) {
                return Err(SubagentError::invalid(
                    format!("{field}.client_session_timeout_seconds"),
                    format!("must be a positive number of seconds, got {timeout}"),
                ));
            }
        }

        for (alias, agent_id) in &self.aliases {
            if alias.is_empty() {
                return Err(SubagentError::invalid(
                    format!("{location}: aliases"),
                    "alias cannot be empty",
                ));
            }
            if agent_id.is_empty() {
                return Err(SubagentError::invalid(
                    format!("{location}: aliases.\"{alias}\""),
                    "alias must name an agent id",
                ));
            }
        }

        Ok(())
    }

    /// Agent bundle directories resolved against `base_dir`.
    pub fn resolved_agent_dirs(&self, base_dir: &Path) -> Vec<PathBuf> {
        self.agent_dirs.iter().map(|dir| base_dir.join(dir)).collect()
    }

    /// Look up a server definition by its table key.
    pub fn server(&self, name: &str) -> Option<&ServerDefinition> {
        self.mcp_servers.get(name)
    }
}
