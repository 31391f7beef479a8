//! Agent skills.
//!
//! A skill is a folder inside an agent bundle's `skills/` directory:
//!
//! ```text
//! skills/
//! └── deploy/
//!     ├── SKILL.md          # Required: front matter + instructions
//!     ├── checklist.md      # Optional attachments, any depth
//!     └── scripts/release.sh
//! ```
//!
//! - **Manifest**: `SKILL.md` front matter and body parsing
//! - **Loader**: folder -> [`SkillRecord`] with attachment metadata
//! - **Tool**: [`SkillTool`] with `preview` / `full` intents
//! - **Summary**: the "Available Skills" section injected into instructions
//!
//! Attachment contents are never read while loading; a `full` tool call
//! reads them through an [`AttachmentReader`].

mod attachment;
mod loader;
mod manifest;
mod summary;
mod tool;

// Re-export public API
pub use attachment::{AttachmentReader, FsAttachmentReader, SKILL_FILE_NAME, SkillAttachment};
pub use loader::{SKILLS_DIR_NAME, SkillRecord, load_agent_skills, load_skill};
pub use manifest::SkillManifest;
pub use summary::{SKILLS_SECTION_HEADING, inject_skill_section, render_skill_section};
pub use tool::{
    PREVIEW_EXCERPT_LIMIT, SkillIntent, SkillTool, SkillToolDescriptor, materialize_skill_tools,
    preview_excerpt,
};
