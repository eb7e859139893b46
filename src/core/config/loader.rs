#![allow(clippy::result_large_err)]

use super::{RetabConfig, CONFIG_FILE_NAME};
use crate::core::config::ConfigValidator;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use std::env;
use std::path::Path;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load, apply environment overrides, and validate.
    ///
    /// An explicit `config_path` must exist. Without one, `workspace/retab.toml` is
    /// used when present and defaults otherwise.
    pub fn load(config_path: Option<&Path>, workspace: &Path) -> Result<RetabConfig, AppError> {
        let mut config = match config_path {
            Some(path) => Self::load_from_file(path)?.ok_or_else(|| {
                let mut error = AppError::new(
                    ErrorCategory::NotFound,
                    format!("config file {} does not exist", path.display()),
                )
                .with_code("NOT_FOUND");
                error.add_context("path", &path.display().to_string());
                error
            })?,
            None => Self::load_from_file(&workspace.join(CONFIG_FILE_NAME))?.unwrap_or_default(),
        };

        Self::apply_env_overrides(&mut config);
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Returns Ok(None) if the file doesn't exist
    pub fn load_from_file(path: &Path) -> Result<Option<RetabConfig>, AppError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::from_io("Failed to read config file", path, e))?;

        let config: RetabConfig = toml::from_str(&content).map_err(|e| {
            let mut error = AppError::from(e);
            error.message = format!(
                "Failed to parse config file {}: {}",
                path.display(),
                error.message
            );
            error.add_context("path", &path.display().to_string());
            error
        })?;

        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(Some(config))
    }

    /// Environment variables take precedence over config file values
    fn apply_env_overrides(config: &mut RetabConfig) {
        if let Ok(pipeline) = env::var("RETAB_DEFAULT_PIPELINE") {
            if !pipeline.trim().is_empty() {
                config.default_pipeline = pipeline.trim().to_string();
            }
        }
    }
}
