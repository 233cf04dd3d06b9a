//! Logging bootstrap.
//!
//! Writes timestamped lines to a size-rotated file under the per-user log
//! directory and echoes to stderr. Initialization happens exactly once per
//! process and never panics; a logging failure must not take the pipeline
//! down with it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};
use once_cell::sync::OnceCell;

const LOG_FILE_BASENAME: &str = "pastemark";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_BACKUP_FILES: usize = 2;

static LOGGER: OnceCell<LoggerHandle> = OnceCell::new();

/// Initialize rotating file logging. Idempotent; the second and later
/// calls are no-ops.
pub fn init(verbose: bool) -> Result<()> {
    if LOGGER.get().is_some() {
        return Ok(());
    }

    let log_dir = default_log_dir().context("could not determine a log directory")?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let level = if verbose { "debug" } else { "info" };
    let duplicate = if verbose {
        Duplicate::Debug
    } else {
        Duplicate::Error
    };

    let handle = Logger::try_with_str(level)
        .context("invalid log level")?
        .log_to_file(
            FileSpec::default()
                .directory(&log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_BACKUP_FILES),
        )
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .duplicate_to_stderr(duplicate)
        .start()
        .context("failed to start logger")?;

    let _ = LOGGER.set(handle);
    Ok(())
}

/// `~/Library/Logs/pastemark` on macOS, the platform data directory
/// elsewhere.
fn default_log_dir() -> Option<PathBuf> {
    if cfg!(target_os = "macos") {
        dirs::home_dir().map(|home| home.join("Library").join("Logs").join("pastemark"))
    } else {
        dirs::data_local_dir().map(|dir| dir.join("pastemark").join("logs"))
    }
}
