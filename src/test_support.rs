use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static ENV_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Sets or clears one environment variable for the guard's lifetime.
pub(crate) struct EnvGuard {
    key: &'static str,
    original: Option<String>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        Self::apply(key, Some(value))
    }

    pub(crate) fn unset(key: &'static str) -> Self {
        Self::apply(key, None)
    }

    fn apply(key: &'static str, value: Option<&str>) -> Self {
        // The process environment is global; lock even if a #[serial] annotation is missed.
        let lock = ENV_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::var(key).ok();
        match value {
            Some(value) => unsafe { std::env::set_var(key, value) },
            None => unsafe { std::env::remove_var(key) },
        }
        Self {
            key,
            original,
            _lock: lock,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.original {
            Some(value) => unsafe { std::env::set_var(self.key, value) },
            None => unsafe { std::env::remove_var(self.key) },
        }
    }
}

/// Temporary bundle root holding `subagents.toml` and agent directories.
pub(crate) struct BundleFixture {
    dir: TempDir,
}

impl BundleFixture {
    pub(crate) fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub(crate) fn root(&self) -> &Path {
        self.dir.path()
    }

    pub(crate) fn config_path(&self) -> PathBuf {
        self.root().join("subagents.toml")
    }

    pub(crate) fn write_root(&self, content: &str) -> PathBuf {
        let path = self.config_path();
        std::fs::write(&path, content).unwrap();
        path
    }

    /// `agents/<id>/` with a minimal `[agent]` table requiring `servers`.
    pub(crate) fn add_agent(&self, id: &str, display_name: &str, servers: &[&str]) -> PathBuf {
        let servers = servers
            .iter()
            .map(|s| format!("\"{s}\""))
            .collect::<Vec<_>>()
            .join(", ");
        let agent_toml = format!(
            "id = \"{id}\"\n\n[agent]\nname = \"{display_name}\"\nmcp_servers = [{servers}]\n"
        );
        write_agent(
            self.root(),
            id,
            &agent_toml,
            &format!("You are the {display_name} agent.\nKeep changes small."),
        )
    }
}

/// Write an agent bundle directory `root/agents/<dir_name>/`.
pub(crate) fn write_agent(root: &Path, dir_name: &str, agent_toml: &str, instructions: &str) -> PathBuf {
    let dir = root.join("agents").join(dir_name);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("agent.toml"), agent_toml).unwrap();
    std::fs::write(dir.join("instructions.md"), instructions).unwrap();
    dir
}

/// Write `agent_dir/skills/<folder>/SKILL.md` and return the skill directory.
pub(crate) fn write_skill(agent_dir: &Path, folder: &str, content: &str) -> PathBuf {
    let dir = agent_dir.join("skills").join(folder);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("SKILL.md"), content).unwrap();
    dir
}

/// One `codex` stdio server, agent `workflow` requiring it, alias
/// `csa:default`.
pub(crate) fn workflow_bundle() -> BundleFixture {
    let fixture = BundleFixture::new();
    fixture.add_agent("workflow", "Workflow", &["codex"]);
    fixture.write_root(
        r#"agent_dirs = ["agents/workflow"]

[aliases]
"csa:default" = "workflow"

[mcp_servers.codex]
type = "stdio"
command = "npx"
args = ["-y", "codex", "mcp-server"]
"#,
    );
    fixture
}
