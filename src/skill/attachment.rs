//! Skill attachments and the deferred reader used to fetch their contents.

use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Result, SubagentError};

/// Name of the manifest file inside a skill folder.
pub const SKILL_FILE_NAME: &str = "SKILL.md";

/// A file bundled with a skill. Only metadata is captured at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillAttachment {
    /// Path relative to the skill folder, `/`-separated.
    pub relative_path: String,

    /// Location on disk, used when contents are requested.
    #[serde(skip)]
    pub absolute_path: PathBuf,

    pub size_bytes: u64,
}

/// Fetches attachment bytes on demand.
///
/// Skill tools only call this when a `full` response is requested, so the
/// loaded snapshot never holds attachment contents.
pub trait AttachmentReader: Send + Sync {
    fn read(&self, attachment: &SkillAttachment) -> std::io::Result<Vec<u8>>;
}

/// Reads attachments straight from disk at call time.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsAttachmentReader;

impl AttachmentReader for FsAttachmentReader {
    fn read(&self, attachment: &SkillAttachment) -> std::io::Result<Vec<u8>> {
        std::fs::read(&attachment.absolute_path)
    }
}

/// Enumerate every regular file under `skill_dir` except the top-level manifest.
///
/// Results are sorted by relative path. Symlinks are followed and listed under
/// the link's own path.
pub fn collect_attachments(skill_dir: &Path) -> Result<Vec<SkillAttachment>> {
    let mut attachments = Vec::new();

    for entry in WalkDir::new(skill_dir)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(skill_dir).to_path_buf();
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
            SubagentError::io(path, source)
        })?;

        if !entry.file_type().is_file() {
            continue;
        }
        if entry.depth() == 1 && entry.file_name() == SKILL_FILE_NAME {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(skill_dir)
            .unwrap_or(entry.path());
        let relative_path = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");

        let metadata = entry
            .metadata()
            .map_err(|e| {
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("metadata unavailable"));
                SubagentError::io(entry.path(), source)
            })?;

        attachments.push(SkillAttachment {
            relative_path,
            absolute_path: entry.path().to_path_buf(),
            size_bytes: metadata.len(),
        });
    }

    attachments.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    Ok(attachments)
}
