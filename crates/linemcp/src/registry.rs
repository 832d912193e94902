//! Tool Registry
//!
//! A table of descriptor + handler pairs, kept in registration order. Tools
//! are added while the registry is being built; once it is handed to
//! [`McpServer`](crate::server::McpServer) it is only read.

use std::collections::HashMap;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::protocol::messages::{CallToolResult, ToolDescription};

/// Failure reported by a tool handler.
///
/// This is a tool-level outcome: it is returned to the client as a normal
/// result flagged with `isError`, not as a JSON-RPC error.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Failed(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("tool already registered: {0}")]
    DuplicateTool(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvokeError {
    #[error("tool not found: {0}")]
    NotFound(String),
}

/// Executes one tool call.
pub trait ToolHandler: Send + Sync {
    fn call(&self, arguments: &Map<String, Value>) -> Result<CallToolResult, ToolError>;
}

impl<F> ToolHandler for F
where
    F: Fn(&Map<String, Value>) -> Result<CallToolResult, ToolError> + Send + Sync,
{
    fn call(&self, arguments: &Map<String, Value>) -> Result<CallToolResult, ToolError> {
        self(arguments)
    }
}

struct RegisteredTool {
    description: ToolDescription,
    handler: Box<dyn ToolHandler>,
}

#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    by_name: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool. Names are unique keys.
    pub fn register(
        &mut self,
        description: ToolDescription,
        handler: impl ToolHandler + 'static,
    ) -> Result<(), RegistryError> {
        if self.by_name.contains_key(&description.name) {
            return Err(RegistryError::DuplicateTool(description.name));
        }
        self.by_name
            .insert(description.name.clone(), self.tools.len());
        self.tools.push(RegisteredTool {
            description,
            handler: Box::new(handler),
        });
        Ok(())
    }

    /// Builder form of [`register`](Self::register).
    pub fn with_tool(
        mut self,
        description: ToolDescription,
        handler: impl ToolHandler + 'static,
    ) -> Result<Self, RegistryError> {
        self.register(description, handler)?;
        Ok(self)
    }

    /// Descriptors in registration order.
    pub fn list(&self) -> Vec<ToolDescription> {
        self.tools.iter().map(|t| t.description.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Run the tool called `name`.
    ///
    /// Handler failures are folded into an `isError` result; only an unknown
    /// name is an error here.
    pub fn invoke(
        &self,
        name: &str,
        arguments: &Map<String, Value>,
    ) -> Result<CallToolResult, InvokeError> {
        let index = self
            .by_name
            .get(name)
            .copied()
            .ok_or_else(|| InvokeError::NotFound(name.to_string()))?;

        match self.tools[index].handler.call(arguments) {
            Ok(result) => Ok(result),
            Err(e) => Ok(CallToolResult::error(format!("Error: {}", e))),
        }
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.tools.iter().map(|t| &t.description.name))
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
