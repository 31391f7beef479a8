//! Implementation of the `subagent skill` command.

use serde_json::Value;
use std::path::Path;

use super::print_json;
use crate::cli::SkillArgs;
use crate::error::{Result, SubagentError};
use crate::skill::{AttachmentReader, FsAttachmentReader, SkillTool};
use crate::snapshot::ConfigSnapshot;

/// Execute the `subagent skill` command.
///
/// Attachment contents are read from disk only for a `full` intent.
pub fn cmd_skill(config: &Path, args: SkillArgs) -> Result<()> {
    let snapshot = ConfigSnapshot::load(config)?;
    let binding = snapshot.resolve(&args.alias)?;
    let tool = snapshot.skill_tool(&binding.agent.id, &args.tool)?;

    let result = invoke(tool, &args, &FsAttachmentReader)?;
    print_json(&result)
}

/// Raw `--arguments` JSON takes the runtime path; otherwise `--intent` is used.
fn invoke(tool: &SkillTool, args: &SkillArgs, reader: &dyn AttachmentReader) -> Result<Value> {
    match &args.arguments {
        Some(raw) => {
            let arguments: Value =
                serde_json::from_str(raw).map_err(|e| SubagentError::SkillCall {
                    tool: tool.name.clone(),
                    message: format!("--arguments is not valid JSON: {}", e),
                })?;
            tool.call_with_arguments(&arguments, reader)
        }
        None => tool.call(args.intent, reader),
    }
}
