#![allow(clippy::result_large_err)]

use super::RetabConfig;
use crate::core::error::AppError;
use crate::core::pipeline::same_path;
use crate::core::rule;
use crate::core::types::ErrorCategory;
use std::collections::HashSet;

pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration rules
    pub fn validate(config: &RetabConfig) -> Result<(), AppError> {
        let mut seen = HashSet::new();
        for custom in &config.rules {
            if rule::is_builtin(&custom.id) {
                return Err(invalid(format!(
                    "rule '{}' shadows a built-in rule",
                    custom.id
                )));
            }
            if !seen.insert(custom.id.as_str()) {
                return Err(invalid(format!("rule '{}' is defined twice", custom.id)));
            }
            custom.build()?;
        }

        for (name, pipeline) in &config.pipelines {
            if pipeline.input.as_os_str().is_empty() || pipeline.output.as_os_str().is_empty() {
                return Err(invalid(format!(
                    "pipeline '{}' needs both an input and an output path",
                    name
                )));
            }
            if same_path(&pipeline.input, &pipeline.output) {
                return Err(invalid(format!(
                    "pipeline '{}' would overwrite its own input",
                    name
                )));
            }
            for id in &pipeline.rules {
                if !seen.contains(id.as_str()) && !rule::is_builtin(id) {
                    return Err(invalid(format!(
                        "pipeline '{}' references unknown rule '{}'",
                        name, id
                    )));
                }
            }
        }

        if !config.has_pipeline(&config.default_pipeline) {
            return Err(invalid(format!(
                "default_pipeline '{}' is not defined",
                config.default_pipeline
            )));
        }

        Ok(())
    }
}

fn invalid(message: String) -> AppError {
    AppError::new(ErrorCategory::ValidationError, message).with_code("INVALID_CONFIG")
}
