//! Implementation of the `subagent show` command.
//!
//! Resolves an alias and prints the run plan the agent runtime would receive.

use std::path::Path;
use tracing::info;

use super::print_json;
use crate::cli::ShowArgs;
use crate::error::Result;
use crate::plan::RunPlan;
use crate::snapshot::ConfigSnapshot;

/// Execute the `subagent show` command.
pub fn cmd_show(config: &Path, args: ShowArgs) -> Result<()> {
    let snapshot = ConfigSnapshot::load(config)?;

    let binding = match args.alias.as_deref() {
        Some(alias) => snapshot.resolve(alias)?,
        None => snapshot.resolve_default()?,
    };
    info!(
        requested = %binding.requested,
        agent = %binding.agent.id,
        source = binding.source.as_str(),
        "resolved agent"
    );

    let env = |key: &str| std::env::var(key).ok();
    let plan = RunPlan::build(&snapshot, &binding, args.request.as_deref(), &env)?;
    print_json(&plan)
}
