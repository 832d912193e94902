//! Command-line configuration for the server binary.

use std::path::PathBuf;

use clap::Parser;
use directories::{BaseDirs, ProjectDirs};

/// linemcp - JSON-RPC tool server over stdio
#[derive(Debug, Parser)]
#[command(name = "linemcp")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Line-delimited JSON-RPC tool server for the Model Context Protocol")]
#[command(
    long_about = "Reads one JSON-RPC request per line from stdin and writes one response per line to stdout.\n\nDiagnostics go to a per-run log file, never to stdout. Set RUST_LOG to change the log level."
)]
pub struct Cli {
    /// Directory for the per-run diagnostic log
    #[arg(long, env = "LINEMCP_LOG_DIR", value_name = "PATH")]
    pub log_dir: Option<PathBuf>,

    /// Server name reported by `initialize`
    #[arg(long, default_value = "linemcp")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub log_dir: PathBuf,
    pub server_name: String,
}

impl ServerConfig {
    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        let log_dir = match cli.log_dir {
            Some(dir) => dir,
            None => default_log_dir()?,
        };
        Ok(Self {
            log_dir,
            server_name: cli.name,
        })
    }
}

/// `~/.mcp-logs`, or the platform data directory when there is no home.
pub fn default_log_dir() -> anyhow::Result<PathBuf> {
    if let Some(base) = BaseDirs::new() {
        return Ok(base.home_dir().join(".mcp-logs"));
    }
    let proj_dirs = ProjectDirs::from("com", "linemcp", "linemcp")
        .ok_or_else(|| anyhow::anyhow!("Could not determine a log directory; pass --log-dir"))?;
    Ok(proj_dirs.data_dir().join("logs"))
}
