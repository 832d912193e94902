//! Diagnostic log sink
//!
//! Each run appends to its own file, `linemcp_<UTC timestamp>.log`, inside
//! the log directory. stdout carries protocol traffic only.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use chrono::{DateTime, Utc};
use tracing_subscriber::EnvFilter;

pub fn log_file_name(started: DateTime<Utc>) -> String {
    format!("linemcp_{}.log", started.format("%Y%m%dT%H%M%S%.3fZ"))
}

/// Create the log directory if needed and open this run's log file.
pub fn open_log_file(dir: &Path, started: DateTime<Utc>) -> anyhow::Result<(PathBuf, File)> {
    let existed = dir.is_dir();
    fs::create_dir_all(dir)
        .with_context(|| format!("cannot create log directory {}", dir.display()))?;
    // Only a directory we created is restricted to owner-only on Unix
    #[cfg(unix)]
    if !existed {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(0o700))
            .with_context(|| format!("cannot restrict log directory {}", dir.display()))?;
    }

    let path = dir.join(log_file_name(started));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;
    Ok((path, file))
}

/// Install the global `tracing` subscriber writing to a fresh log file.
pub fn init(dir: &Path) -> anyhow::Result<PathBuf> {
    let (path, file) = open_log_file(dir, Utc::now())?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_target(false)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("cannot install log subscriber: {}", e))?;

    Ok(path)
}
