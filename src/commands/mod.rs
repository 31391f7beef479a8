//! Command implementations for subagent.
//!
//! Every command except `configure` starts from a freshly loaded
//! [`ConfigSnapshot`](crate::snapshot::ConfigSnapshot). Machine-readable
//! output goes to stdout as JSON; logs go to stderr.

mod check;
mod configure;
mod list;
mod show;
mod skill;
mod tools;

use serde::Serialize;
use std::path::Path;

use crate::cli::Command;
use crate::error::{Result, SubagentError};

/// Dispatch a command to its implementation.
pub fn dispatch(config: &Path, command: Command) -> Result<()> {
    match command {
        Command::List => list::cmd_list(config),
        Command::Tools => tools::cmd_tools(config),
        Command::Show(args) => show::cmd_show(config, args),
        Command::Skill(args) => skill::cmd_skill(config, args),
        Command::Check => check::cmd_check(config),
        Command::Configure(args) => configure::cmd_configure(config, args),
    }
}

/// Pretty-print `value` as JSON on stdout.
fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| SubagentError::UserError(format!("failed to encode JSON output: {}", e)))?;
    println!("{}", text);
    Ok(())
}
