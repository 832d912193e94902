//! MCP Server Core
//!
//! Routes requests to the built-in protocol methods and, for `call_tool`,
//! into the tool registry. Dispatch is a pure function of the request: the
//! server carries no state from one request to the next.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::diagnostics::{Diagnostics, NoopDiagnostics, SessionEvent};
use crate::protocol::messages::{InitializeResult, ListToolsResult, ServerCapabilities};
use crate::protocol::params;
use crate::protocol::types::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use crate::registry::{InvokeError, ToolRegistry};

/// Name and version advertised by `initialize`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

impl ServerInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self::new("linemcp", env!("CARGO_PKG_VERSION"))
    }
}

/// Built-in protocol methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Initialize,
    ListTools,
    CallTool,
}

impl Method {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "initialize" => Some(Method::Initialize),
            "list_tools" => Some(Method::ListTools),
            "call_tool" => Some(Method::CallTool),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Initialize => "initialize",
            Method::ListTools => "list_tools",
            Method::CallTool => "call_tool",
        }
    }
}

/// MCP Server implementation
pub struct McpServer {
    info: ServerInfo,
    registry: ToolRegistry,
    diagnostics: Arc<dyn Diagnostics>,
}

impl McpServer {
    pub fn new(info: ServerInfo, registry: ToolRegistry, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            info,
            registry,
            diagnostics,
        }
    }

    /// Server that records nothing.
    pub fn silent(info: ServerInfo, registry: ToolRegistry) -> Self {
        Self::new(info, registry, Arc::new(NoopDiagnostics))
    }

    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn diagnostics(&self) -> &dyn Diagnostics {
        self.diagnostics.as_ref()
    }

    /// Handle a decoded request. Always produces exactly one response.
    pub fn handle_request(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let id = request.response_id();
        let response = match self.dispatch(&request.method, &request.params) {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::error(id, error),
        };

        self.diagnostics.record(&SessionEvent::Dispatched {
            method: &request.method,
            id: &response.id,
            is_error: response.is_error(),
        });
        response
    }

    /// Resolve `method` and run it.
    pub fn dispatch(&self, method: &str, params: &Map<String, Value>) -> Result<Value, JsonRpcError> {
        match Method::from_name(method) {
            Some(Method::Initialize) => self.handle_initialize(params),
            Some(Method::ListTools) => self.handle_list_tools(),
            Some(Method::CallTool) => self.handle_call_tool(params),
            None => {
                self.diagnostics
                    .record(&SessionEvent::MethodNotFound { method });
                Err(JsonRpcError::method_not_found(method))
            }
        }
    }

    /// Handle initialize request
    ///
    /// The descriptor is static; client details are only recorded.
    fn handle_initialize(&self, params: &Map<String, Value>) -> Result<Value, JsonRpcError> {
        let client = params::object_or_empty(params, "clientInfo").into_value();
        self.diagnostics.record(&SessionEvent::ClientInfo {
            name: params::string_or(&client, "name", "unknown").value,
            version: params::string_or(&client, "version", "unknown").value,
            protocol_version: params::string_or(params, "protocolVersion", "unknown").value,
        });

        let result = InitializeResult {
            name: self.info.name.clone(),
            version: self.info.version.clone(),
            capabilities: ServerCapabilities::default(),
        };

        serde_json::to_value(result).map_err(|e| JsonRpcError::internal_error(&e.to_string()))
    }

    /// Handle list_tools request
    fn handle_list_tools(&self) -> Result<Value, JsonRpcError> {
        let result = ListToolsResult {
            tools: self.registry.list(),
        };
        serde_json::to_value(result).map_err(|e| JsonRpcError::internal_error(&e.to_string()))
    }

    /// Handle call_tool request
    fn handle_call_tool(&self, params: &Map<String, Value>) -> Result<Value, JsonRpcError> {
        let name = params::string_or(params, "name", "").value;
        let arguments = params::object_or_empty(params, "arguments").into_value();

        match self.registry.invoke(name, &arguments) {
            Ok(result) => {
                self.diagnostics.record(&SessionEvent::ToolCalled {
                    tool: name,
                    is_error: result.is_error(),
                });
                serde_json::to_value(result)
                    .map_err(|e| JsonRpcError::internal_error(&e.to_string()))
            }
            Err(InvokeError::NotFound(tool)) => {
                self.diagnostics
                    .record(&SessionEvent::ToolNotFound { tool: &tool });
                Err(JsonRpcError::tool_not_found(&tool))
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
