use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Send tracing output to a file. The terminal belongs to the UI, so nothing
/// may be written to stdout/stderr while it runs.
///
/// Verbosity comes from `RUST_LOG` and defaults to `info`.
pub fn init(log_file: Option<PathBuf>) -> Result<PathBuf> {
    let path = match log_file {
        Some(path) => path,
        None => default_log_path()?,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))?;

    Ok(path)
}

fn default_log_path() -> Result<PathBuf> {
    let cache_dir = dirs::cache_dir()
        .ok_or_else(|| anyhow!("Could not determine cache directory"))?;

    Ok(cache_dir.join("faq-chat").join("faq-chat.log"))
}
