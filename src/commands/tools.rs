//! Implementation of the `subagent tools` command.

use std::path::Path;

use super::print_json;
use crate::error::Result;
use crate::snapshot::ConfigSnapshot;

/// Execute the `subagent tools` command.
///
/// Prints one definition per exposed alias tool, sorted by tool name.
pub fn cmd_tools(config: &Path) -> Result<()> {
    let snapshot = ConfigSnapshot::load(config)?;
    print_json(&snapshot.registry.tool_definitions())
}
