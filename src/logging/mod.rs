pub mod config;
pub mod layers;

pub use layers::console::ConsoleOutput;

use crate::cli::Command;
use crate::logging::config::LoggingConfig;
use crate::logging::layers::{console, file};
use crate::Result;
use anyhow::{anyhow, Context};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::prelude::*;

static LOGGER_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Keeps logging sinks alive for the duration of the command.
pub struct LoggingGuard {
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
    log_file_path: Option<PathBuf>,
}

impl LoggingGuard {
    /// Path of the log file, when file logging is enabled.
    pub fn log_file_path(&self) -> Option<&Path> {
        self.log_file_path.as_deref()
    }
}

/// Initialize logging for the provided CLI command.
///
/// `RUST_LOG` takes precedence over the configured default level. Errors when
/// invoked more than once per process.
pub fn init(command: &Command) -> Result<LoggingGuard> {
    if LOGGER_INITIALIZED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return Err(anyhow!("logging already initialized"));
    }

    let workspace_root = env::current_dir().ok();
    let config = LoggingConfig::load(command.config_path(), workspace_root.as_deref())?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.default_level))
        .context("failed to configure tracing level")?;

    let log_file_path = if config.enable_file {
        Some(file::log_file_path(&config, workspace_root.as_deref())?)
    } else {
        None
    };
    let (file_layer, file_guard) = match &log_file_path {
        Some(path) => file::file_layer(path, true)?,
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console::console_layer(config.console_output))
        .with(env_filter)
        .try_init()
        .context("failed to install tracing subscriber")?;
    tracing::debug!(
        console = %config.console_output,
        log_file = ?log_file_path,
        "logging initialized"
    );

    Ok(LoggingGuard {
        _file_guard: file_guard,
        log_file_path,
    })
}
