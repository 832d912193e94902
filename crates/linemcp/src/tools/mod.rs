//! MCP Tools
//!
//! Tool implementations shipped with the server. Each tool module exposes
//! `description()` and `execute()`; [`builtin`] wires them into a registry.

pub mod hello_world;

use crate::registry::{RegistryError, ToolRegistry};

/// The registry served by the `linemcp` binary.
pub fn builtin() -> Result<ToolRegistry, RegistryError> {
    ToolRegistry::new().with_tool(hello_world::description(), hello_world::execute)
}
