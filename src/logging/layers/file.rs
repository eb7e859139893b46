use crate::logging::config::LoggingConfig;
use crate::Result;
use anyhow::{anyhow, Context};
use std::fs::{create_dir_all, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::{self as tracing_fmt, format, writer::BoxMakeWriter};
use tracing_subscriber::registry::LookupSpan;

const LOG_FILE_NAME: &str = "retab.log";

/// JSON lines written to the log file.
pub type FileFmtLayer<S> =
    tracing_fmt::Layer<S, format::JsonFields, format::Format<format::Json>, BoxMakeWriter>;

/// Where `retab.log` lives: `log_dir` if configured (relative paths anchor at the
/// workspace), else `<workspace>/.retab/logs`, else `~/.retab/logs`.
pub fn log_file_path(config: &LoggingConfig, workspace_root: Option<&Path>) -> Result<PathBuf> {
    let directory = match (&config.log_dir, workspace_root) {
        (Some(custom), _) if custom.is_absolute() => custom.clone(),
        (Some(custom), Some(workspace)) => workspace.join(custom),
        (Some(custom), None) => home_base()?.join(custom),
        (None, Some(workspace)) => workspace.join(".retab").join("logs"),
        (None, None) => home_base()?.join(".retab").join("logs"),
    };
    Ok(directory.join(LOG_FILE_NAME))
}

/// Build the file layer, or `None` when file logging is disabled.
///
/// The returned guard flushes the non-blocking writer on drop.
pub fn file_layer<S>(
    log_file: &Path,
    enabled: bool,
) -> Result<(Option<FileFmtLayer<S>>, Option<WorkerGuard>)>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    if !enabled {
        return Ok((None, None));
    }

    let directory = log_file
        .parent()
        .ok_or_else(|| anyhow!("log file path {} has no parent directory", log_file.display()))?;
    create_dir_all(directory)
        .with_context(|| format!("failed to create log directory {}", directory.display()))?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("failed to open log file {}", log_file.display()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);
    let layer = tracing_fmt::layer()
        .json()
        .with_writer(BoxMakeWriter::new(non_blocking))
        .with_ansi(false)
        .with_current_span(true);
    Ok((Some(layer), Some(guard)))
}

fn home_base() -> Result<PathBuf> {
    dirs_next::home_dir().ok_or_else(|| anyhow!("$HOME directory unavailable"))
}
