#![allow(clippy::result_large_err)]

use crate::core::error::AppError;
use crate::core::pipeline::{self, Pipeline};
use crate::core::rule::{self, RuleError, SubstitutionRule};
use crate::core::types::ErrorCategory;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod loader;
pub mod validation;

pub use loader::ConfigLoader;
pub use validation::ConfigValidator;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "retab.toml";

/// Configuration loaded from retab.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetabConfig {
    /// Pipeline used when `retab run` is given no name
    #[serde(default = "default_pipeline")]
    pub default_pipeline: String,

    /// Custom rules, referenced by id from pipelines and `--enable`
    #[serde(default)]
    pub rules: Vec<RuleConfig>,

    /// Configured pipelines; a built-in name replaces that preset
    #[serde(default)]
    pub pipelines: IndexMap<String, PipelineConfig>,
}

/// A user-defined substitution rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    pub id: String,

    /// Progress label, defaults to the id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    pub pattern: String,

    #[serde(default)]
    pub replacement: String,

    /// Treat `pattern` as a regular expression
    #[serde(default)]
    pub regex: bool,
}

/// A user-defined pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    #[serde(default)]
    pub rules: Vec<String>,
}

fn default_pipeline() -> String {
    pipeline::DEFAULT_PIPELINE.to_string()
}

impl Default for RetabConfig {
    fn default() -> Self {
        RetabConfig {
            default_pipeline: default_pipeline(),
            rules: Vec::new(),
            pipelines: IndexMap::new(),
        }
    }
}

impl RuleConfig {
    pub fn build(&self) -> Result<SubstitutionRule, RuleError> {
        let label = self.label.clone().unwrap_or_else(|| self.id.clone());
        if self.regex {
            SubstitutionRule::regex(&self.id, label, &self.pattern, &self.replacement)
        } else {
            SubstitutionRule::literal(&self.id, label, &self.pattern, &self.replacement)
        }
    }
}

impl RetabConfig {
    /// Resolve a rule id, custom rules first, then built-ins.
    pub fn resolve_rule(&self, id: &str) -> Result<SubstitutionRule, AppError> {
        if let Some(custom) = self.rules.iter().find(|r| r.id == id) {
            return Ok(custom.build()?);
        }
        rule::builtin(id).ok_or_else(|| RuleError::Unknown(id.to_string()).into())
    }

    /// Built-in rules followed by custom rules.
    pub fn all_rules(&self) -> Result<Vec<SubstitutionRule>, AppError> {
        let mut rules = rule::builtin_rules();
        for custom in &self.rules {
            rules.push(custom.build()?);
        }
        Ok(rules)
    }

    pub fn has_pipeline(&self, name: &str) -> bool {
        self.pipelines.contains_key(name) || Pipeline::preset(name).is_some()
    }

    pub fn pipeline(&self, name: &str) -> Result<Pipeline, AppError> {
        if let Some(configured) = self.pipelines.get(name) {
            let rules = configured
                .rules
                .iter()
                .map(|id| self.resolve_rule(id))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Pipeline::new(
                name,
                rules,
                configured.input.clone(),
                configured.output.clone(),
            ));
        }
        Pipeline::preset(name).ok_or_else(|| {
            AppError::new(
                ErrorCategory::ValidationError,
                format!("unknown pipeline '{}'", name),
            )
            .with_code("UNKNOWN_PIPELINE")
            .with_suggestion("Run `retab pipelines` to list available pipelines")
        })
    }

    /// Presets first (possibly replaced by configuration), then other configured pipelines.
    pub fn all_pipelines(&self) -> Result<Vec<Pipeline>, AppError> {
        let mut names: Vec<&str> = pipeline::PRESET_NAMES.to_vec();
        for name in self.pipelines.keys() {
            if !names.contains(&name.as_str()) {
                names.push(name.as_str());
            }
        }
        names.into_iter().map(|name| self.pipeline(name)).collect()
    }
}
