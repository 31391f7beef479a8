//! Implementation of the `subagent list` command.

use std::path::Path;

use crate::agent::AgentSummary;
use crate::error::Result;
use crate::snapshot::ConfigSnapshot;

/// Execute the `subagent list` command.
pub fn cmd_list(config: &Path) -> Result<()> {
    let snapshot = ConfigSnapshot::load(config)?;
    print!("{}", render_list(&snapshot.registry.summaries(&snapshot.agents)));
    Ok(())
}

fn render_list(summaries: &[AgentSummary]) -> String {
    let mut out = String::new();
    out.push_str("Agents\n======\n");
    for summary in summaries {
        out.push('\n');
        out.push_str(&format!("{} ({})\n", summary.id, summary.display_name));
        out.push_str(&format!("  Model:   {}\n", summary.model));
        out.push_str(&format!("  Aliases: {}\n", join_or_none(&summary.aliases)));
        out.push_str(&format!("  Tools:   {}\n", join_or_none(&summary.tool_names)));
        if !summary.skills.is_empty() {
            out.push_str(&format!("  Skills:  {}\n", summary.skills.join(", ")));
        }
    }
    out
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}
