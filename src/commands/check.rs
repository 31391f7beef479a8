//! Implementation of the `subagent check` command.
//!
//! Runs the full load pipeline and reports what was loaded. Any failure
//! surfaces through the normal error path with its exit code.

use std::path::Path;

use crate::error::Result;
use crate::snapshot::ConfigSnapshot;

/// Execute the `subagent check` command.
pub fn cmd_check(config: &Path) -> Result<()> {
    let snapshot = ConfigSnapshot::load(config)?;
    print!("{}", render_report(&snapshot));
    Ok(())
}

fn render_report(snapshot: &ConfigSnapshot) -> String {
    let mut out = String::new();
    out.push_str(&format!("Configuration OK: {}\n", snapshot.config_path.display()));
    out.push('\n');
    out.push_str(&format!("  Agents:      {:>3}\n", snapshot.agents.len()));
    out.push_str(&format!("  Aliases:     {:>3}\n", snapshot.registry.alias_map().len()));
    out.push_str(&format!("  Alias tools: {:>3}\n", snapshot.registry.tool_names().len()));
    out.push_str(&format!("  Skill tools: {:>3}\n", snapshot.skill_tool_count()));
    out.push_str(&format!("  MCP servers: {:>3}\n", snapshot.root.mcp_servers.len()));
    if let Ok(default) = snapshot.resolve_default() {
        out.push('\n');
        out.push_str(&format!("Default agent: {}\n", default.agent.id));
    }
    out
}
