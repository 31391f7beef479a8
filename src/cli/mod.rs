//! CLI argument parsing for subagent.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::skill::SkillIntent;

/// Subagent: load sub-agent bundles and expose them as named tools.
///
/// A bundle is a root TOML file listing agent directories, MCP servers and
/// aliases. Each agent directory carries its settings, instructions and
/// optional skills.
#[derive(Parser, Debug)]
#[command(name = "subagent")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Root configuration file.
    #[arg(
        long,
        short = 'c',
        global = true,
        env = "SUBAGENT_CONFIG",
        default_value = "subagents.toml"
    )]
    pub config: PathBuf,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for subagent.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List agents with their aliases, tool names and skills.
    List,

    /// Print alias tool definitions as JSON, sorted by tool name.
    Tools,

    /// Resolve an alias and print the run plan as JSON.
    ///
    /// Without an alias the default agent is used.
    Show(ShowArgs),

    /// Invoke a skill tool of an agent and print its JSON result.
    Skill(SkillArgs),

    /// Load and validate the whole bundle, then report counts.
    Check,

    /// Register this bundle as an MCP server in a Codex config file.
    ///
    /// Appends a `[mcp_servers.codex_sub_agent]` stanza unless one exists.
    Configure(ConfigureArgs),
}

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Alias, exposed tool name or agent id.
    pub alias: Option<String>,

    /// Request that replaces the agent's entry message.
    #[arg(long)]
    pub request: Option<String>,
}

#[derive(Parser, Debug)]
pub struct SkillArgs {
    /// Alias, exposed tool name or agent id.
    pub alias: String,

    /// Skill tool name, e.g. `skill_deploy`.
    pub tool: String,

    /// `preview` or `full`.
    #[arg(long, default_value_t = SkillIntent::Preview)]
    pub intent: SkillIntent,

    /// Raw JSON tool arguments, e.g. `{"intent": "full"}`.
    #[arg(long, conflicts_with = "intent")]
    pub arguments: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ConfigureArgs {
    /// Codex `config.toml` to update.
    #[arg(long)]
    pub codex_config: PathBuf,

    /// Command Codex should launch.
    #[arg(long, default_value = "subagent")]
    pub command: String,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::EnvGuard;
    use clap::CommandFactory;
    use serial_test::serial;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn cli_debug_assert() {
        // Verifies the CLI arguments configuration is valid
        Cli::command().debug_assert();
    }

    #[test]
    #[serial]
    fn parse_list_defaults() {
        let _guard = EnvGuard::unset("SUBAGENT_CONFIG");
        let cli = parse(&["subagent", "list"]);
        assert!(matches!(cli.command, Command::List));
        assert_eq!(cli.config, PathBuf::from("subagents.toml"));
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = parse(&["subagent", "tools", "--config", "bundle/root.toml", "-vv"]);
        assert!(matches!(cli.command, Command::Tools));
        assert_eq!(cli.config, PathBuf::from("bundle/root.toml"));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    #[serial]
    fn parse_config_from_env() {
        let _guard = EnvGuard::set("SUBAGENT_CONFIG", "/etc/subagents.toml");
        let cli = parse(&["subagent", "check"]);
        assert_eq!(cli.config, PathBuf::from("/etc/subagents.toml"));
    }

    #[test]
    fn parse_show() {
        let cli = parse(&["subagent", "show", "csa:default", "--request", "Fix bug 12"]);
        if let Command::Show(args) = cli.command {
            assert_eq!(args.alias.as_deref(), Some("csa:default"));
            assert_eq!(args.request.as_deref(), Some("Fix bug 12"));
        } else {
            panic!("Expected Show command");
        }
    }

    #[test]
    fn parse_show_without_alias() {
        let cli = parse(&["subagent", "show"]);
        if let Command::Show(args) = cli.command {
            assert!(args.alias.is_none());
            assert!(args.request.is_none());
        } else {
            panic!("Expected Show command");
        }
    }

    #[test]
    fn parse_skill_default_intent() {
        let cli = parse(&["subagent", "skill", "workflow", "skill_deploy"]);
        if let Command::Skill(args) = cli.command {
            assert_eq!(args.alias, "workflow");
            assert_eq!(args.tool, "skill_deploy");
            assert_eq!(args.intent, SkillIntent::Preview);
        } else {
            panic!("Expected Skill command");
        }
    }

    #[test]
    fn parse_skill_full_intent() {
        let cli = parse(&["subagent", "skill", "workflow", "skill_deploy", "--intent", "full"]);
        if let Command::Skill(args) = cli.command {
            assert_eq!(args.intent, SkillIntent::Full);
        } else {
            panic!("Expected Skill command");
        }
    }

    #[test]
    fn parse_skill_arguments() {
        let cli = parse(&[
            "subagent",
            "skill",
            "workflow",
            "skill_deploy",
            "--arguments",
            r#"{"intent":"full"}"#,
        ]);
        if let Command::Skill(args) = cli.command {
            assert_eq!(args.arguments.as_deref(), Some(r#"{"intent":"full"}"#));
            assert_eq!(args.intent, SkillIntent::Preview);
        } else {
            panic!("Expected Skill command");
        }
    }

    #[test]
    fn parse_skill_arguments_conflict_with_intent() {
        let result = Cli::try_parse_from([
            "subagent", "skill", "a", "b", "--intent", "full", "--arguments", "{}",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_skill_rejects_bad_intent() {
        let result = Cli::try_parse_from(["subagent", "skill", "a", "b", "--intent", "everything"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_configure() {
        let cli = parse(&["subagent", "configure", "--codex-config", "/home/u/.codex/config.toml"]);
        if let Command::Configure(args) = cli.command {
            assert_eq!(args.codex_config, PathBuf::from("/home/u/.codex/config.toml"));
            assert_eq!(args.command, "subagent");
        } else {
            panic!("Expected Configure command");
        }
    }
}
