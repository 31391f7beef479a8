//! "Available Skills" section appended to agent instructions.

use super::tool::SkillTool;

/// Heading that marks the generated section.
pub const SKILLS_SECTION_HEADING: &str = "## Available Skills";

/// Render one bullet per skill tool. Empty when there are no tools.
pub fn render_skill_section(tools: &[SkillTool]) -> String {
    if tools.is_empty() {
        return String::new();
    }

    let mut lines = vec![SKILLS_SECTION_HEADING.to_string(), String::new()];
    for tool in tools {
        lines.push(format!(
            "- **{}** (tool `{}`): {} Call the tool with intent='full' to read the entire skill and any attachments.",
            single_line(&tool.skill.name),
            tool.name,
            single_line(&tool.skill.description)
        ));
    }
    lines.join("\n")
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Append the skills section to `instructions`.
///
/// Instructions that already end with the exact section are returned as-is,
/// so a snapshot never carries it twice.
pub fn inject_skill_section(instructions: &str, tools: &[SkillTool]) -> String {
    let section = render_skill_section(tools);
    if section.is_empty() {
        return instructions.to_string();
    }
    let base = instructions.trim_end();
    if base.ends_with(&section) {
        return base.to_string();
    }
    format!("{base}\n\n{section}")
}
