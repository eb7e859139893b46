#![allow(clippy::result_large_err)]

use crate::{
    cli::args::{ListArgs, RunArgs},
    core::{
        pipeline::same_path, AppError, ConfigLoader, ErrorCategory, Pattern, Pipeline,
        RetabConfig, SubstitutionRule,
    },
    Result,
};
use anyhow::Context;
use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

fn load_config(config: Option<&Path>) -> Result<RetabConfig> {
    let workspace: PathBuf = env::current_dir().context("failed to resolve working directory")?;
    Ok(ConfigLoader::load(config, &workspace)?)
}

/// Resolve the pipeline named by `args` (or the configured default) and apply
/// the path and rule overrides.
pub fn resolve_pipeline(
    config: &RetabConfig,
    args: &RunArgs,
) -> std::result::Result<Pipeline, AppError> {
    let name = args
        .pipeline
        .clone()
        .unwrap_or_else(|| config.default_pipeline.clone());
    let mut pipeline = config.pipeline(&name)?;

    if let Some(input) = &args.input {
        pipeline.input = input.clone();
    }
    if let Some(output) = &args.output {
        pipeline.output = output.clone();
    }
    for id in &args.disable {
        pipeline.disable(id)?;
    }
    for id in &args.enable {
        let rule = config.resolve_rule(id)?;
        if !pipeline.enable(rule) {
            tracing::warn!(rule = %id, "rule already enabled");
        }
    }

    if same_path(&pipeline.input, &pipeline.output) {
        return Err(AppError::new(
            ErrorCategory::ValidationError,
            format!(
                "input and output are the same file: {}",
                pipeline.input.display()
            ),
        )
        .with_code("SAME_INPUT_OUTPUT")
        .with_suggestion("Pass --output to write somewhere else"));
    }
    Ok(pipeline)
}

pub fn run(args: RunArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let pipeline = resolve_pipeline(&config, &args)?;
    tracing::info!(
        pipeline = %pipeline.name,
        input = %pipeline.input.display(),
        output = %pipeline.output.display(),
        rules = ?pipeline.rule_ids(),
        dry_run = args.dry_run,
        "running pipeline"
    );
    pipeline.run(args.dry_run)?;
    Ok(())
}

pub fn rules(args: ListArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let stdout = io::stdout();
    write_rules(&mut stdout.lock(), &config.all_rules()?)?;
    Ok(())
}

pub fn pipelines(args: ListArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let stdout = io::stdout();
    write_pipelines(
        &mut stdout.lock(),
        &config.all_pipelines()?,
        &config.default_pipeline,
    )?;
    Ok(())
}

/// One line per rule: id, kind, pattern and replacement with tabs escaped.
pub fn write_rules<W: Write>(out: &mut W, rules: &[SubstitutionRule]) -> io::Result<()> {
    for rule in rules {
        let kind = match rule.pattern() {
            Pattern::Literal(_) => "literal",
            Pattern::Regex(_) => "regex",
        };
        writeln!(
            out,
            "{:<14} {:<8} '{}' -> '{}'  {}",
            rule.id(),
            kind,
            rule.pattern().as_str().escape_debug(),
            rule.replacement().escape_debug(),
            rule.label()
        )?;
    }
    Ok(())
}

pub fn write_pipelines<W: Write>(
    out: &mut W,
    pipelines: &[Pipeline],
    default_pipeline: &str,
) -> io::Result<()> {
    for pipeline in pipelines {
        let marker = if pipeline.name == default_pipeline {
            " (default)"
        } else {
            ""
        };
        writeln!(out, "{}{}", pipeline.name, marker)?;
        writeln!(out, "  input:  {}", pipeline.input.display())?;
        writeln!(out, "  output: {}", pipeline.output.display())?;
        writeln!(out, "  rules:  {}", pipeline.rule_ids().join(", "))?;
    }
    Ok(())
}
