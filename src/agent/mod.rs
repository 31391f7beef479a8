//! Agent bundles and name resolution.
//!
//! - **Bundle**: one directory -> [`AgentRecord`] (settings, instructions, skills)
//! - **Registry**: aliases, exposed tool names, and the default agent
//! - **Binding**: alias / tool name / agent id -> [`AgentBinding`]
//! - **Validation**: agent server references against the root server table

mod binding;
mod bundle;
mod fields;
mod record;
mod registry;
mod validate;

// Re-export public API
pub use binding::{AgentBinding, BindingSource, resolve_agent, resolve_default};
pub use bundle::{AGENT_FILE_NAME, ENTRY_MESSAGE_FILE_NAME, INSTRUCTIONS_FILE_NAME, load_agent_bundle};
pub use record::{AgentMap, AgentRecord};
pub use registry::{AgentSummary, AliasRegistry, AliasTool};
pub use validate::validate_server_references;
