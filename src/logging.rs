//! File logging. The terminal belongs to the UI, so logs go to a daily file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing_appender::non_blocking;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_FILE_NAME: &str = "shortcut-translator.log";

/// Start logging into `log_dir` (or the platform data dir).
///
/// The returned guard flushes pending lines on drop and must be held for the
/// whole run. `None` means no log directory could be determined.
pub fn init(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let Some(dir) = log_dir.map(Path::to_path_buf).or_else(default_log_dir) else {
        return Ok(None);
    };
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(&dir, LOG_FILE_NAME);
    let (writer, guard) = non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .init();
    Ok(Some(guard))
}

fn default_log_dir() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", keymap_core::config::APP_NAME)?;
    Some(proj.data_local_dir().join("logs"))
}
