// Debug logging for duopong
// The TUI owns stdout, so --debug routes tracing output to a file

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Where `--debug` writes its log.
pub fn log_file_path() -> PathBuf {
    std::env::temp_dir().join("duopong-debug.log")
}

/// Install the tracing subscriber.
///
/// # Behavior
/// - `enabled = false`: no subscriber; tracing macros are no-ops
/// - `enabled = true`: truncates the log file and writes events to it,
///   filtered by `RUST_LOG` (default `debug` for this crate)
pub fn init(enabled: bool) -> Result<Option<PathBuf>> {
    if !enabled {
        return Ok(None);
    }

    let path = log_file_path();
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)
        .with_context(|| format!("opening debug log {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,duopong=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing tracing subscriber: {}", e))?;

    tracing::info!(path = %path.display(), "debug logging enabled");
    Ok(Some(path))
}
