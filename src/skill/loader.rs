//! Loading skill folders into [`SkillRecord`]s.

use serde_yaml::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::attachment::{SKILL_FILE_NAME, SkillAttachment, collect_attachments};
use super::manifest::SkillManifest;
use crate::error::{Result, SubagentError};
use crate::naming::{skill_slug, skill_tool_name};

/// Name of the optional skills directory inside an agent bundle.
pub const SKILLS_DIR_NAME: &str = "skills";

/// A loaded skill. Attachment contents are not part of the record.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillRecord {
    /// Sanitized, lowercased folder name.
    pub slug: String,
    pub name: String,
    pub description: String,
    pub tags: BTreeSet<String>,
    pub extensions: BTreeMap<String, Value>,
    pub body: String,
    pub directory: PathBuf,
    pub attachments: Vec<SkillAttachment>,
}

impl SkillRecord {
    /// Tool identifier under which this skill is exposed.
    pub fn tool_name(&self) -> String {
        skill_tool_name(&self.slug)
    }
}

/// Load one skill folder.
///
/// The folder must contain `SKILL.md`; every other file becomes an attachment.
pub fn load_skill(skill_dir: &Path) -> Result<SkillRecord> {
    let manifest_path = skill_dir.join(SKILL_FILE_NAME);
    if !manifest_path.is_file() {
        return Err(SubagentError::MalformedSkillManifest {
            path: manifest_path,
            message: format!("skill directory {} has no {}", skill_dir.display(), SKILL_FILE_NAME),
        });
    }

    let manifest = SkillManifest::from_file(&manifest_path)?;
    let attachments = collect_attachments(skill_dir)?;

    let folder_name = skill_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let slug = skill_slug(&folder_name);
    if slug.is_empty() {
        return Err(SubagentError::MalformedSkillManifest {
            path: manifest_path,
            message: "skill folder name cannot be empty".to_string(),
        });
    }

    debug!(
        skill = %manifest.name,
        slug = %slug,
        attachments = attachments.len(),
        "loaded skill"
    );

    Ok(SkillRecord {
        slug,
        name: manifest.name,
        description: manifest.description,
        tags: manifest.tags,
        extensions: manifest.extensions,
        body: manifest.body,
        directory: skill_dir.to_path_buf(),
        attachments,
    })
}

/// Load every skill below `<agent_dir>/skills`.
///
/// A missing skills directory yields an empty list. Immediate subdirectories
/// are loaded in file name order; plain files next to them are ignored.
pub fn load_agent_skills(agent_dir: &Path) -> Result<Vec<SkillRecord>> {
    let skills_dir = agent_dir.join(SKILLS_DIR_NAME);
    if !skills_dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(&skills_dir).map_err(|e| SubagentError::io(&skills_dir, e))?;
    let mut skill_dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SubagentError::io(&skills_dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            skill_dirs.push(path);
        } else {
            warn!(path = %path.display(), "ignoring non-directory entry in skills folder");
        }
    }
    skill_dirs.sort();

    skill_dirs.iter().map(|dir| load_skill(dir)).collect()
}
