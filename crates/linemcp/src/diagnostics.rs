//! Diagnostics
//!
//! The protocol engine reports what it does through the [`Diagnostics`]
//! trait and never writes logs itself. The server binary installs
//! [`TracingDiagnostics`]; tests use [`NoopDiagnostics`] or
//! [`RecordingDiagnostics`].
//!
//! Nothing recorded here may reach stdout.

use std::sync::Mutex;

use serde_json::Value;
use tracing::{debug, error, info, warn};

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    EndOfInput,
    ReadFailed(String),
}

/// A significant event in the life of a session.
#[derive(Debug, Clone, Copy)]
pub enum SessionEvent<'a> {
    Started {
        server: &'a str,
        version: &'a str,
        tools: usize,
    },
    Received {
        line: &'a str,
    },
    ParseFailed {
        error: &'a str,
    },
    ClientInfo {
        name: &'a str,
        version: &'a str,
        protocol_version: &'a str,
    },
    ToolCalled {
        tool: &'a str,
        is_error: bool,
    },
    ToolNotFound {
        tool: &'a str,
    },
    MethodNotFound {
        method: &'a str,
    },
    Dispatched {
        method: &'a str,
        id: &'a Value,
        is_error: bool,
    },
    EncodeFailed {
        id: &'a Value,
        error: &'a str,
    },
    Sent {
        line: &'a str,
    },
    ReadFailed {
        error: &'a str,
    },
    Shutdown {
        lines: u64,
        end: &'a SessionEnd,
    },
}

impl SessionEvent<'_> {
    /// Short stable name of the event kind.
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::Started { .. } => "started",
            SessionEvent::Received { .. } => "received",
            SessionEvent::ParseFailed { .. } => "parse_failed",
            SessionEvent::ClientInfo { .. } => "client_info",
            SessionEvent::ToolCalled { .. } => "tool_called",
            SessionEvent::ToolNotFound { .. } => "tool_not_found",
            SessionEvent::MethodNotFound { .. } => "method_not_found",
            SessionEvent::Dispatched { .. } => "dispatched",
            SessionEvent::EncodeFailed { .. } => "encode_failed",
            SessionEvent::Sent { .. } => "sent",
            SessionEvent::ReadFailed { .. } => "read_failed",
            SessionEvent::Shutdown { .. } => "shutdown",
        }
    }
}

/// Sink for session events.
pub trait Diagnostics: Send + Sync {
    fn record(&self, event: &SessionEvent<'_>);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn record(&self, _event: &SessionEvent<'_>) {}
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn record(&self, event: &SessionEvent<'_>) {
        match *event {
            SessionEvent::Started {
                server,
                version,
                tools,
            } => info!(server, version, tools, "Session started"),
            SessionEvent::Received { line } => debug!(bytes = line.len(), "Received: {}", line),
            SessionEvent::ParseFailed { error } => warn!("Failed to parse request: {}", error),
            SessionEvent::ClientInfo {
                name,
                version,
                protocol_version,
            } => info!(
                client = name,
                client_version = version,
                protocol_version,
                "Client initializing"
            ),
            SessionEvent::ToolCalled { tool, is_error } => {
                if is_error {
                    warn!(tool, "Tool reported an error");
                } else {
                    info!(tool, "Tool called");
                }
            }
            SessionEvent::ToolNotFound { tool } => warn!("Unknown tool: {}", tool),
            SessionEvent::MethodNotFound { method } => warn!("Unknown method: {}", method),
            SessionEvent::Dispatched {
                method,
                id,
                is_error,
            } => info!(method, id = %id, is_error, "Handled request"),
            SessionEvent::EncodeFailed { id, error } => {
                error!(id = %id, "Failed to serialize response: {}", error)
            }
            SessionEvent::Sent { line } => debug!(bytes = line.len(), "Sending: {}", line),
            SessionEvent::ReadFailed { error } => error!("Failed to read line: {}", error),
            SessionEvent::Shutdown { lines, end } => match end {
                SessionEnd::EndOfInput => info!(lines, "End of input, session closed"),
                SessionEnd::ReadFailed(reason) => {
                    error!(lines, "Session aborted by read failure: {}", reason)
                }
            },
        }
    }
}

/// Keeps event names in memory, for tests and embedding.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    events: Mutex<Vec<String>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the recorded events, oldest first.
    pub fn events(&self) -> Vec<String> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn count(&self, name: &str) -> usize {
        self.events().iter().filter(|e| e.as_str() == name).count()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn record(&self, event: &SessionEvent<'_>) {
        let mut events = match self.events.lock() {
            Ok(events) => events,
            Err(poisoned) => poisoned.into_inner(),
        };
        events.push(event.name().to_string());
    }
}
