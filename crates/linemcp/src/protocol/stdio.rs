//! stdio Transport for MCP
//!
//! Handles JSON-RPC communication over stdin/stdout: one request line in,
//! one response line out, strictly in order.

use std::io::{self, BufRead, Write};

use serde_json::Value;
use thiserror::Error;

use super::codec;
use super::types::{JsonRpcError, JsonRpcResponse};
use crate::diagnostics::{SessionEnd, SessionEvent};
use crate::server::McpServer;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to write response: {0}")]
    Write(#[source] io::Error),
}

/// What a finished session did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// Input lines answered.
    pub lines: u64,
    pub end: SessionEnd,
}

/// Turn one raw input line into its response.
///
/// Lines that cannot be decoded are answered with a parse error and a null
/// id, since the id could not be read.
pub fn respond_to_line(server: &McpServer, line: &[u8]) -> JsonRpcResponse {
    match codec::decode_bytes(line) {
        Ok(request) => server.handle_request(&request),
        Err(e) => {
            let detail = e.to_string();
            server
                .diagnostics()
                .record(&SessionEvent::ParseFailed { error: &detail });
            JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error(&detail))
        }
    }
}

/// Read/dispatch/write loop over any line reader and writer.
pub struct LineTransport<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LineTransport<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Serve until end of input or a read failure.
    ///
    /// Write failures are returned as errors; nothing can be answered once
    /// the output is gone.
    pub fn run(mut self, server: &McpServer) -> Result<SessionSummary, TransportError> {
        let diagnostics = server.diagnostics();
        let info = server.info();
        diagnostics.record(&SessionEvent::Started {
            server: &info.name,
            version: &info.version,
            tools: server.registry().len(),
        });

        let mut buf = Vec::new();
        let mut lines = 0u64;

        let end = loop {
            buf.clear();
            match self.reader.read_until(b'\n', &mut buf) {
                Ok(0) => break SessionEnd::EndOfInput,
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    let error = e.to_string();
                    diagnostics.record(&SessionEvent::ReadFailed { error: &error });
                    break SessionEnd::ReadFailed(error);
                }
            }

            let line = trim_line_ending(&buf);
            diagnostics.record(&SessionEvent::Received {
                line: &String::from_utf8_lossy(line),
            });

            let response = respond_to_line(server, line);
            let encoded = codec::encode(&response);
            if let Some(error) = &encoded.failure {
                diagnostics.record(&SessionEvent::EncodeFailed {
                    id: &response.id,
                    error,
                });
            }

            self.write_line(&encoded.line)?;
            diagnostics.record(&SessionEvent::Sent {
                line: &encoded.line,
            });
            lines += 1;
        };

        diagnostics.record(&SessionEvent::Shutdown {
            lines,
            end: &end,
        });
        Ok(SessionSummary { lines, end })
    }

    fn write_line(&mut self, line: &str) -> Result<(), TransportError> {
        self.writer
            .write_all(line.as_bytes())
            .and_then(|_| self.writer.write_all(b"\n"))
            .and_then(|_| self.writer.flush())
            .map_err(TransportError::Write)
    }
}

/// Strip a trailing `\n` or `\r\n`.
fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// stdio Transport for MCP server
pub struct StdioTransport;

impl StdioTransport {
    pub fn new() -> Self {
        Self
    }

    /// Run the MCP server over stdio
    pub fn run(self, server: &McpServer) -> Result<SessionSummary, TransportError> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        LineTransport::new(stdin.lock(), stdout.lock()).run(server)
    }
}

impl Default for StdioTransport {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
