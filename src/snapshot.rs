//! Fully loaded, immutable configuration snapshot.
//!
//! [`ConfigSnapshot::load`] is the only entry point: parse the root file,
//! load every agent bundle, check server references, build the alias
//! registry, then materialize skill tools. A snapshot exists only if every
//! step succeeded.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::agent::{
    AgentBinding, AgentMap, AliasRegistry, load_agent_bundle, resolve_agent,
    resolve_default, validate_server_references,
};
use crate::config::RootConfig;
use crate::error::{Result, SubagentError};
use crate::skill::{SkillTool, inject_skill_section, materialize_skill_tools};

#[derive(Debug, Clone)]
pub struct ConfigSnapshot {
    pub config_path: PathBuf,
    pub root: RootConfig,
    pub agents: AgentMap,
    pub registry: AliasRegistry,
    skill_tools: BTreeMap<String, Vec<SkillTool>>,
}

impl ConfigSnapshot {
    /// Load the bundle rooted at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let root = RootConfig::load(path)?;
        Self::from_root(root, path)
    }

    /// Run the pipeline for an already parsed root file.
    ///
    /// `config_path` locates agent directories and names errors.
    pub fn from_root(root: RootConfig, config_path: &Path) -> Result<Self> {
        let location = config_path.display().to_string();
        let base_dir = match config_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut agents = AgentMap::new();
        for (index, dir) in root.resolved_agent_dirs(&base_dir).iter().enumerate() {
            let agent = load_agent_bundle(dir, &root.defaults)?;
            if let Some(existing) = agents.get(&agent.id) {
                return Err(SubagentError::invalid(
                    format!("{location}: agent_dirs[{index}]"),
                    format!(
                        "duplicate agent id '{}' (also defined in {})",
                        agent.id,
                        existing.directory.display()
                    ),
                ));
            }
            agents.insert(agent.id.clone(), agent);
        }

        if agents.is_empty() {
            return Err(SubagentError::invalid(
                format!("{location}: agent_dirs"),
                "at least one agent bundle is required",
            ));
        }

        validate_server_references(&agents, &root.mcp_servers)?;

        let registry = AliasRegistry::build(
            &root.aliases,
            root.default_agent.as_deref(),
            &agents,
            &location,
        )?;

        let mut skill_tools = BTreeMap::new();
        for agent in agents.values_mut() {
            let tools = materialize_skill_tools(&agent.skills)?;
            agent.instructions = inject_skill_section(&agent.instructions, &tools);
            skill_tools.insert(agent.id.clone(), tools);
        }

        info!(
            config = %location,
            agents = agents.len(),
            aliases = root.aliases.len(),
            tools = registry.tool_names().len(),
            servers = root.mcp_servers.len(),
            "configuration loaded"
        );

        Ok(Self {
            config_path: config_path.to_path_buf(),
            root,
            agents,
            registry,
            skill_tools,
        })
    }

    /// Resolve an alias, exposed tool name or agent id.
    pub fn resolve(&self, name: &str) -> Result<AgentBinding<'_>> {
        resolve_agent(name, &self.registry, &self.agents)
    }

    pub fn resolve_default(&self) -> Result<AgentBinding<'_>> {
        resolve_default(&self.registry, &self.agents)
    }

    /// Skill tools of one agent, in skill order.
    pub fn skill_tools(&self, agent_id: &str) -> &[SkillTool] {
        self.skill_tools
            .get(agent_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Look up one skill tool; a miss is a call-scoped failure.
    pub fn skill_tool(&self, agent_id: &str, tool_name: &str) -> Result<&SkillTool> {
        let tools = self.skill_tools(agent_id);
        tools
            .iter()
            .find(|t| t.name == tool_name)
            .ok_or_else(|| SubagentError::SkillCall {
                tool: tool_name.to_string(),
                message: format!(
                    "agent '{}' has no such skill tool. Available: {}",
                    agent_id,
                    if tools.is_empty() {
                        "(none)".to_string()
                    } else {
                        tools.iter().map(|t| t.name.as_str()).collect::<Vec<_>>().join(", ")
                    }
                ),
            })
    }

    pub fn skill_tool_count(&self) -> usize {
        self.skill_tools.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::SKILLS_SECTION_HEADING;
    use crate::test_support::{BundleFixture, workflow_bundle, write_skill};
    use std::collections::{BTreeMap, BTreeSet};

    #[test]
    fn test_workflow_alias_end_to_end() {
        let fixture = workflow_bundle();
        let snapshot = ConfigSnapshot::load(fixture.config_path()).unwrap();

        let binding = snapshot.resolve("csa:default").unwrap();
        assert_eq!(binding.agent.id, "workflow");
        assert_eq!(binding.agent.required_servers, vec!["codex"]);
        assert!(snapshot.registry.tool("csa_default").is_some());
        assert_eq!(
            snapshot.registry.tool_names().into_iter().collect::<Vec<_>>(),
            vec!["csa_default"]
        );
    }

    #[test]
    fn test_missing_server_fails_load() {
        let fixture = BundleFixture::new();
        fixture.add_agent("workflow", "Workflow", &["github"]);
        fixture.write_root(
            "agent_dirs = [\"agents/workflow\"]\n\n[mcp_servers.codex]\ntype = \"stdio\"\ncommand = \"npx\"\n",
        );

        let err = ConfigSnapshot::load(fixture.config_path()).unwrap_err();
        match err {
            SubagentError::UnknownMcpServer { agent, server } => {
                assert_eq!(agent, "workflow");
                assert_eq!(server, "github");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_reload_yields_identical_names() {
        let fixture = workflow_bundle();
        fixture.add_agent("review", "Review", &[]);
        fixture.write_root(
            r#"agent_dirs = ["agents/workflow", "agents/review"]

[aliases]
"csa:default" = "workflow"
"csa:review" = "review"
"csa_review" = "review"

[mcp_servers.codex]
type = "stdio"
command = "npx"
"#,
        );

        let first = ConfigSnapshot::load(fixture.config_path()).unwrap();
        let saved_aliases = serde_json::to_string(first.registry.alias_map()).unwrap();
        let saved_tools = serde_json::to_string(&first.registry.tool_names()).unwrap();
        drop(first);

        let reloaded = ConfigSnapshot::load(fixture.config_path()).unwrap();
        let aliases: BTreeMap<String, String> = serde_json::from_str(&saved_aliases).unwrap();
        let tool_names: BTreeSet<String> = serde_json::from_str(&saved_tools).unwrap();

        assert_eq!(&aliases, reloaded.registry.alias_map());
        assert_eq!(tool_names, reloaded.registry.tool_names());
        assert_eq!(
            tool_names.into_iter().collect::<Vec<_>>(),
            vec!["csa_default", "csa_review"]
        );
        for (alias, agent_id) in &aliases {
            assert_eq!(reloaded.resolve(alias).unwrap().agent.id, *agent_id);
        }
    }

    #[test]
    fn test_duplicate_agent_ids_rejected() {
        let fixture = BundleFixture::new();
        fixture.add_agent("workflow", "Workflow", &[]);
        let copy = fixture.root().join("agents").join("copy");
        std::fs::create_dir_all(&copy).unwrap();
        for file in ["agent.toml", "instructions.md"] {
            std::fs::copy(fixture.root().join("agents/workflow").join(file), copy.join(file))
                .unwrap();
        }
        fixture.write_root("agent_dirs = [\"agents/workflow\", \"agents/copy\"]\n");

        let err = ConfigSnapshot::load(fixture.config_path()).unwrap_err();
        assert!(matches!(err, SubagentError::InvalidConfiguration { .. }));
        assert!(err.to_string().contains("agent_dirs[1]"));
        assert!(err.to_string().contains("duplicate agent id 'workflow'"));
    }

    #[test]
    fn test_skill_section_injected_once() {
        let fixture = workflow_bundle();
        write_skill(
            &fixture.root().join("agents/workflow"),
            "deploy",
            "---\nname: Deploy\ndescription: Ship releases.\n---\nRun the checklist.\n",
        );

        let snapshot = ConfigSnapshot::load(fixture.config_path()).unwrap();
        let agent = snapshot.agents.get("workflow").unwrap();

        assert_eq!(agent.instructions.matches(SKILLS_SECTION_HEADING).count(), 1);
        assert!(agent.instructions.contains("(tool `skill_deploy`)"));
        assert_eq!(snapshot.skill_tools("workflow").len(), 1);
        assert_eq!(snapshot.skill_tool_count(), 1);
        assert!(snapshot.skill_tool("workflow", "skill_deploy").is_ok());
    }

    #[test]
    fn test_unknown_skill_tool_is_call_scoped() {
        let fixture = workflow_bundle();
        let snapshot = ConfigSnapshot::load(fixture.config_path()).unwrap();

        let err = snapshot.skill_tool("workflow", "skill_missing").unwrap_err();
        assert!(matches!(err, SubagentError::SkillCall { .. }));
        assert!(err.to_string().contains("(none)"));
    }

    #[test]
    fn test_bad_skill_manifest_fails_load() {
        let fixture = workflow_bundle();
        write_skill(
            &fixture.root().join("agents/workflow"),
            "broken",
            "---\nname: Broken\n---\n",
        );

        let err = ConfigSnapshot::load(fixture.config_path()).unwrap_err();
        assert!(matches!(err, SubagentError::MalformedSkillManifest { .. }));
    }

    #[test]
    fn test_default_resolution_uses_smallest_id() {
        let fixture = workflow_bundle();
        fixture.add_agent("alpha", "Alpha", &[]);
        fixture.write_root(
            "agent_dirs = [\"agents/workflow\", \"agents/alpha\"]\n\n[mcp_servers.codex]\ntype = \"stdio\"\ncommand = \"npx\"\n",
        );

        let snapshot = ConfigSnapshot::load(fixture.config_path()).unwrap();
        assert_eq!(snapshot.resolve_default().unwrap().agent.id, "alpha");
    }
}
