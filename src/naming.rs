//! Tool name derivation.
//!
//! Tool identifiers handed to the agent runtime are restricted to
//! `[A-Za-z0-9_-]`. Aliases may contain display characters such as `:` and
//! skill folders may contain anything, so both go through [`sanitize_tool_name`].

use regex::Regex;
use std::sync::LazyLock;

static DISALLOWED_TOOL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_-]").expect("Invalid tool name regex"));

static VALID_TOOL_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid tool name regex"));

/// Prefix shared by every skill tool.
pub const SKILL_TOOL_PREFIX: &str = "skill_";

/// Replace every character outside `[A-Za-z0-9_-]` with `_`.
///
/// Each disallowed `char` becomes exactly one `_`, so the function is
/// idempotent and never changes the character count.
///
/// ```text
/// csa:test-agent  ->  csa_test-agent
/// ```
pub fn sanitize_tool_name(raw: &str) -> String {
    DISALLOWED_TOOL_CHARS.replace_all(raw, "_").into_owned()
}

/// Whether `name` is a non-empty identifier in the allowed character set.
pub fn is_valid_tool_name(name: &str) -> bool {
    VALID_TOOL_NAME.is_match(name)
}

/// Slug for a skill folder: sanitized, then lowercased.
pub fn skill_slug(folder_name: &str) -> String {
    sanitize_tool_name(folder_name).to_ascii_lowercase()
}

/// Tool identifier for a skill slug (`skill_<slug>`).
pub fn skill_tool_name(slug: &str) -> String {
    format!("{SKILL_TOOL_PREFIX}{slug}")
}
