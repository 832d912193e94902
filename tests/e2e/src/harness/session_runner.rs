//! Session Runner
//!
//! Drives a [`McpServer`] through [`LineTransport`] exactly as the binary
//! does, but over in-memory input and output:
//! - one-shot exchanges (one line in, one parsed response out)
//! - whole sessions with ordering and cardinality checks
//! - access to the recorded diagnostic events

use std::io::Cursor;
use std::sync::Arc;

use linemcp::protocol::stdio::respond_to_line;
use linemcp::{
    LineTransport, McpServer, RecordingDiagnostics, ServerInfo, SessionSummary, ToolRegistry,
    encode, tools,
};
use serde_json::Value;

pub const TEST_SERVER_NAME: &str = "linemcp-e2e";
pub const TEST_SERVER_VERSION: &str = "0.0.0-test";

/// Result of a complete session
#[derive(Debug)]
pub struct SessionOutput {
    pub summary: SessionSummary,
    /// Exactly what was written to the output stream
    pub raw: String,
    /// Each output line parsed as JSON
    pub responses: Vec<Value>,
}

impl SessionOutput {
    pub fn response(&self, index: usize) -> &Value {
        &self.responses[index]
    }
}

/// Harness around one server instance
///
/// # Example
///
/// ```rust,ignore
/// let harness = SessionHarness::new();
/// let output = harness.run(&[RequestFactory::initialize(1)]);
/// assert_eq!(output.responses.len(), 1);
/// ```
pub struct SessionHarness {
    server: McpServer,
    diagnostics: Arc<RecordingDiagnostics>,
}

impl SessionHarness {
    /// Harness serving the built-in tools
    pub fn new() -> Self {
        Self::with_registry(tools::builtin().expect("built-in tools register"))
    }

    /// Harness serving a custom registry
    pub fn with_registry(registry: ToolRegistry) -> Self {
        let diagnostics = Arc::new(RecordingDiagnostics::new());
        let server = McpServer::new(
            ServerInfo::new(TEST_SERVER_NAME, TEST_SERVER_VERSION),
            registry,
            diagnostics.clone(),
        );
        Self {
            server,
            diagnostics,
        }
    }

    pub fn server(&self) -> &McpServer {
        &self.server
    }

    /// Names of the diagnostic events recorded so far
    pub fn events(&self) -> Vec<String> {
        self.diagnostics.events()
    }

    pub fn event_count(&self, name: &str) -> usize {
        self.diagnostics.count(name)
    }

    /// Push one line through decode, dispatch and encode
    pub fn exchange(&self, line: &str) -> Value {
        let response = respond_to_line(&self.server, line.as_bytes());
        let encoded = encode(&response);
        assert!(!encoded.line.contains('\n'), "response spans lines");
        serde_json::from_str(&encoded.line).expect("response line is JSON")
    }

    /// Run a session over the given lines, each terminated by `\n`
    pub fn run<S: AsRef<str>>(&self, lines: &[S]) -> SessionOutput {
        let mut input = String::new();
        for line in lines {
            input.push_str(line.as_ref());
            input.push('\n');
        }
        self.run_raw(input.into_bytes())
    }

    /// Run a session over raw input bytes
    pub fn run_raw(&self, input: Vec<u8>) -> SessionOutput {
        let mut output = Vec::new();
        let summary = LineTransport::new(Cursor::new(input), &mut output)
            .run(&self.server)
            .expect("in-memory writes do not fail");

        let raw = String::from_utf8(output).expect("output is UTF-8");
        let responses = raw
            .lines()
            .map(|l| serde_json::from_str(l).expect("each output line is JSON"))
            .collect();

        SessionOutput {
            summary,
            raw,
            responses,
        }
    }
}

impl Default for SessionHarness {
    fn default() -> Self {
        Self::new()
    }
}
