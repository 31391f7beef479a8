//! In-memory agent record built from one bundle directory.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::skill::SkillRecord;

/// Loaded agents keyed by id.
pub type AgentMap = BTreeMap<String, AgentRecord>;

/// A fully loaded agent. Never mutated after the snapshot is built.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentRecord {
    pub id: String,
    pub display_name: String,
    pub model: String,
    /// Agent value, or the root `[defaults]` value when the agent sets none.
    pub temperature: Option<f64>,
    pub reasoning_tokens: Option<u32>,
    /// Trimmed `instructions.md`, plus the skills section once materialized.
    pub instructions: String,
    /// Trimmed `entry_message.md`, empty when the file is absent.
    pub entry_message: String,
    /// MCP server names in declared order, without duplicates.
    pub required_servers: Vec<String>,
    pub skills: Vec<Arc<SkillRecord>>,
    pub directory: PathBuf,
}

impl AgentRecord {
    /// The message that starts a run: a non-blank override wins.
    pub fn effective_entry_message<'a>(&'a self, request: Option<&'a str>) -> &'a str {
        match request {
            Some(r) if !r.trim().is_empty() => r,
            _ => &self.entry_message,
        }
    }

    /// `"<display name>: <first instructions line>"`, capped at 200 characters.
    pub fn summary(&self) -> String {
        let first_line = self
            .instructions
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or_default();
        let line = if first_line.chars().count() > 200 {
            let cut: String = first_line.chars().take(197).collect();
            format!("{}...", cut.trim_end())
        } else {
            first_line.to_string()
        };
        format!("{}: {}", self.display_name, line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(instructions: &str) -> AgentRecord {
        AgentRecord {
            id: "workflow".to_string(),
            display_name: "Workflow".to_string(),
            model: "gpt-5".to_string(),
            temperature: None,
            reasoning_tokens: None,
            instructions: instructions.to_string(),
            entry_message: "Start the workflow.".to_string(),
            required_servers: Vec::new(),
            skills: Vec::new(),
            directory: PathBuf::from("/agents/workflow"),
        }
    }

    #[test]
    fn test_override_wins_over_entry_message() {
        let record = make_record("Do it.");
        assert_eq!(record.effective_entry_message(Some("Fix bug 12")), "Fix bug 12");
        assert_eq!(record.effective_entry_message(Some("   ")), "Start the workflow.");
        assert_eq!(record.effective_entry_message(None), "Start the workflow.");
    }

    #[test]
    fn test_summary_uses_first_non_blank_line() {
        let record = make_record("\n\n  You coordinate releases.  \nMore text.");
        assert_eq!(record.summary(), "Workflow: You coordinate releases.");
    }

    #[test]
    fn test_summary_truncates_long_lines() {
        let record = make_record(&"x".repeat(300));
        let summary = record.summary();
        assert!(summary.ends_with("..."));
        assert_eq!(summary.chars().count(), "Workflow: ".len() + 200);
    }
}
