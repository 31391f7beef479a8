//! Exit code constants for the subagent CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable files)
//! - 2: Configuration error (malformed bundle, unknown server reference)
//! - 3: Resolution error (unknown alias, tool name collision)
//! - 4: Skill call failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or files that cannot be read or written.
pub const USER_ERROR: i32 = 1;

/// Configuration error: malformed root file, agent bundle or skill manifest.
pub const CONFIG_ERROR: i32 = 2;

/// Resolution error: an alias or tool name cannot be mapped to exactly one agent.
pub const RESOLUTION_ERROR: i32 = 3;

/// Skill call failure: bad intent or an attachment that could not be read.
pub const SKILL_CALL_FAILURE: i32 = 4;
