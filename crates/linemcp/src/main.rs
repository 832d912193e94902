//! linemcp server
//!
//! Serves the built-in tools over stdio until stdin is closed. Diagnostics
//! are written to a per-run log file; stdout carries only JSON-RPC traffic.

mod config;
mod logging;

use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};

use linemcp::{McpServer, ServerInfo, SessionEnd, StdioTransport, TracingDiagnostics, tools};

use crate::config::{Cli, ServerConfig};

fn main() {
    // Parse CLI arguments first (before logging init, so --help/--version work cleanly)
    let cli = Cli::parse();

    let config = match ServerConfig::from_cli(cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("linemcp: {:#}", e);
            std::process::exit(1);
        }
    };

    // No protocol activity happens without a working log sink
    let log_path = match logging::init(&config.log_dir) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("linemcp: failed to set up logging: {:#}", e);
            std::process::exit(1);
        }
    };

    info!("linemcp v{} starting...", env!("CARGO_PKG_VERSION"));
    info!(log = %log_path.display(), "Logging to file");

    let registry = match tools::builtin() {
        Ok(r) => r,
        Err(e) => {
            error!("Failed to build tool registry: {}", e);
            std::process::exit(1);
        }
    };

    let info = ServerInfo::new(config.server_name, env!("CARGO_PKG_VERSION"));
    let server = McpServer::new(info, registry, Arc::new(TracingDiagnostics));

    info!("Starting MCP server on stdio...");

    match StdioTransport::new().run(&server) {
        Ok(summary) => match summary.end {
            SessionEnd::EndOfInput => info!(lines = summary.lines, "linemcp shutting down"),
            SessionEnd::ReadFailed(_) => std::process::exit(1),
        },
        Err(e) => {
            error!("Server error: {}", e);
            std::process::exit(1);
        }
    }
}
