#![allow(clippy::result_large_err)]

use crate::core::document::Document;
use crate::core::error::AppError;
use crate::core::rule::{self, RuleError, SubstitutionRule};
use crate::core::types::ErrorCategory;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use std::time::Instant;

pub const RELAB: &str = "relab";
pub const CPM: &str = "cpm";
pub const DEFAULT_PIPELINE: &str = RELAB;

/// Names of the built-in pipelines, in listing order.
pub const PRESET_NAMES: [&str; 2] = [RELAB, CPM];

/// Result of applying one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub id: String,
    pub label: String,
    pub replacements: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformReport {
    pub outcomes: Vec<RuleOutcome>,
}

impl TransformReport {
    pub fn total_replacements(&self) -> usize {
        self.outcomes.iter().map(|o| o.replacements).sum()
    }
}

/// Apply `rules` to `doc` in order; each rule sees the previous rule's output.
pub fn transform(doc: &Document, rules: &[SubstitutionRule]) -> (Document, TransformReport) {
    transform_with(doc, rules, |_| {})
}

/// Same as [`transform`], calling `on_rule` after each rule is applied.
pub fn transform_with<F>(
    doc: &Document,
    rules: &[SubstitutionRule],
    mut on_rule: F,
) -> (Document, TransformReport)
where
    F: FnMut(&RuleOutcome),
{
    let mut text = doc.as_str().to_string();
    let mut report = TransformReport::default();
    for rule in rules {
        let (next, replacements) = rule.apply(&text);
        text = next;
        let outcome = RuleOutcome {
            id: rule.id().to_string(),
            label: rule.label().to_string(),
            replacements,
        };
        tracing::info!(rule = %outcome.id, replacements, "applied rule");
        on_rule(&outcome);
        report.outcomes.push(outcome);
    }
    (Document::from(text), report)
}

/// Ordered rules plus the file they read from and the file they write to.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    pub name: String,
    pub rules: Vec<SubstitutionRule>,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Pipeline {
    pub fn new(
        name: impl Into<String>,
        rules: Vec<SubstitutionRule>,
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Pipeline {
            name: name.into(),
            rules,
            input: input.into(),
            output: output.into(),
        }
    }

    /// Relative-abundance table: split colons and rewrite the title.
    pub fn relab() -> Self {
        Pipeline::new(
            RELAB,
            builtins(&[rule::COLON, rule::TITLE]),
            "ecs_relab.tsv",
            "./ecs_relab_split.csv",
        )
    }

    /// CPM table: as `relab`, and strip `_Abundance-CPM` from sample headers.
    pub fn cpm() -> Self {
        Pipeline::new(
            CPM,
            builtins(&[rule::COLON, rule::TITLE, rule::CPM_SUFFIX]),
            PathBuf::from("Data").join("ecs_3.tsv"),
            PathBuf::from("Data").join("ecs_3_split.csv"),
        )
    }

    pub fn preset(name: &str) -> Option<Self> {
        match name {
            RELAB => Some(Pipeline::relab()),
            CPM => Some(Pipeline::cpm()),
            _ => None,
        }
    }

    pub fn rule_ids(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    /// Append `rule` unless a rule with the same id is already present.
    pub fn enable(&mut self, rule: SubstitutionRule) -> bool {
        if self.rules.iter().any(|r| r.id() == rule.id()) {
            return false;
        }
        self.rules.push(rule);
        true
    }

    pub fn disable(&mut self, id: &str) -> Result<(), RuleError> {
        let before = self.rules.len();
        self.rules.retain(|r| r.id() != id);
        if self.rules.len() == before {
            return Err(RuleError::Unknown(id.to_string()));
        }
        Ok(())
    }

    /// Run the pipeline, printing progress lines to stdout.
    pub fn run(&self, dry_run: bool) -> Result<TransformReport, AppError> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_with(&mut out, dry_run)
    }

    /// Load, substitute, and save, printing progress lines to `out`.
    ///
    /// The input is fully read before the output is opened. When `dry_run` is set
    /// nothing is written to disk.
    pub fn run_with<W: Write>(
        &self,
        out: &mut W,
        dry_run: bool,
    ) -> Result<TransformReport, AppError> {
        let span = tracing::info_span!("pipeline", name = %self.name);
        let _entered = span.enter();
        let started = Instant::now();

        let input = Document::load(&self.input)?;
        let mut write_error = None;
        let (output, report) = transform_with(&input, &self.rules, |outcome| {
            if write_error.is_none() {
                if let Err(e) = writeln!(out, "{}: Done", outcome.label) {
                    write_error = Some(e);
                }
            }
        });
        if let Some(e) = write_error {
            return Err(e.into());
        }

        if input.newline_count() != output.newline_count() {
            let mut error = AppError::new(
                ErrorCategory::ValidationError,
                format!(
                    "substitutions changed the line count from {} to {}",
                    input.newline_count(),
                    output.newline_count()
                ),
            )
            .with_code("LINE_COUNT_CHANGED")
            .with_suggestion("Make sure no rule matches or inserts newline characters");
            error.add_context("pipeline", &self.name);
            return Err(error);
        }

        if dry_run {
            tracing::info!(output = %self.output.display(), "dry run, output not written");
        } else {
            output.save(&self.output)?;
            writeln!(out, "Writing file: Done")?;
        }

        tracing::info!(
            replacements = report.total_replacements(),
            elapsed = %humantime::format_duration(started.elapsed()),
            "pipeline finished"
        );
        Ok(report)
    }
}

/// Whether `a` and `b` name the same file.
///
/// Existing paths are compared after canonicalization; otherwise `.` segments
/// are ignored, so `./ecs_relab.tsv` equals `ecs_relab.tsv`.
pub fn same_path(a: &Path, b: &Path) -> bool {
    if let (Ok(a), Ok(b)) = (a.canonicalize(), b.canonicalize()) {
        return a == b;
    }
    without_cur_dir(a) == without_cur_dir(b)
}

fn without_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

fn builtins(ids: &[&str]) -> Vec<SubstitutionRule> {
    ids.iter().filter_map(|id| rule::builtin(id)).collect()
}
