//! Tracing setup. The TUI owns the terminal, so it logs to a file instead of stderr.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::app::{Result, TidingsError};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn init_cli_logging() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter())
        .init();
}

/// Append to `path`, creating its directory if needed.
pub fn init_file_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .with(env_filter())
        .init();
    Ok(())
}

/// `<data dir>/tidings/tidings.log`
pub fn default_log_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| TidingsError::Config("Could not find data directory".into()))?;
    Ok(data_dir.join("tidings").join("tidings.log"))
}
