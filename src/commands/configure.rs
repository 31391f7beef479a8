//! Implementation of the `subagent configure` command.
//!
//! Registers this bundle with Codex by appending an MCP server stanza to
//! its `config.toml`.

use std::path::Path;
use tracing::info;

use crate::cli::ConfigureArgs;
use crate::error::{Result, SubagentError};
use crate::fs::replace_file;

pub const CODEX_STANZA_HEADER: &str = "[mcp_servers.codex_sub_agent]";

/// Execute the `subagent configure` command.
pub fn cmd_configure(config: &Path, args: ConfigureArgs) -> Result<()> {
    let config = std::fs::canonicalize(config).map_err(|e| SubagentError::io(config, e))?;

    if append_codex_stanza(&args.codex_config, &config, &args.command)? {
        println!(
            "Added codex_sub_agent MCP server configuration to {}",
            args.codex_config.display()
        );
    } else {
        println!(
            "{} already contains the codex_sub_agent stanza.",
            args.codex_config.display()
        );
    }
    Ok(())
}

/// Build the stanza pointing Codex at `config`.
pub fn codex_stanza(config: &Path, command: &str) -> String {
    let quote = |s: &str| toml::Value::String(s.to_string()).to_string();
    format!(
        "{}\ncommand = {}\nargs = [\"--config\", {}]\nstartup_timeout_sec = 60\nclient_session_timeout_seconds = 3600\n",
        CODEX_STANZA_HEADER,
        quote(command),
        quote(&config.display().to_string()),
    )
}

/// Append the stanza unless the file already has one.
///
/// Returns `true` if the file was written.
pub fn append_codex_stanza(codex_config: &Path, config: &Path, command: &str) -> Result<bool> {
    let stanza = codex_stanza(config, command);
    let updated = match std::fs::read_to_string(codex_config) {
        Ok(existing) if existing.contains(CODEX_STANZA_HEADER) => {
            info!(path = %codex_config.display(), "codex stanza already present");
            return Ok(false);
        }
        Ok(existing) if existing.is_empty() => stanza,
        Ok(existing) => {
            let newline = if existing.ends_with('\n') { "" } else { "\n" };
            format!("{existing}{newline}\n{stanza}")
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => stanza,
        Err(e) => return Err(SubagentError::io(codex_config, e)),
    };

    replace_file(codex_config, &updated)?;
    Ok(true)
}
