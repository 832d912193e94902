//! # linemcp
//!
//! A line-delimited JSON-RPC 2.0 server for the Model Context Protocol tool
//! methods, served over stdin/stdout.
//!
//! - **Codec**: one JSON object per line in each direction ([`protocol::codec`])
//! - **Tool Registry**: ordered, immutable table of tools ([`registry`])
//! - **Dispatcher**: `initialize`, `list_tools`, `call_tool` ([`server`])
//! - **Session Loop**: sequential read/dispatch/write ([`protocol::stdio`])
//!
//! Every input line gets exactly one response line, in order. Malformed
//! lines are answered with a parse error and never end the session.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use linemcp::{McpServer, ServerInfo, StdioTransport, TracingDiagnostics};
//!
//! let server = McpServer::new(
//!     ServerInfo::default(),
//!     linemcp::tools::builtin()?,
//!     Arc::new(TracingDiagnostics),
//! );
//! StdioTransport::new().run(&server)?;
//! ```

pub mod diagnostics;
pub mod protocol;
pub mod registry;
pub mod server;
pub mod tools;

pub use diagnostics::{
    Diagnostics, NoopDiagnostics, RecordingDiagnostics, SessionEnd, SessionEvent,
    TracingDiagnostics,
};
pub use protocol::codec::{DecodeError, Encoded, decode, encode};
pub use protocol::messages::{CallToolResult, ToolContent, ToolDescription};
pub use protocol::stdio::{LineTransport, SessionSummary, StdioTransport, TransportError};
pub use protocol::types::{ErrorCode, JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use registry::{InvokeError, RegistryError, ToolError, ToolHandler, ToolRegistry};
pub use server::{McpServer, Method, ServerInfo};
