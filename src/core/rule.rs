use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use regex::{NoExpand, Regex};
use std::fmt;

pub const COLON: &str = "colon";
pub const TITLE: &str = "title";
pub const CPM_SUFFIX: &str = "cpm-suffix";
pub const VERTICAL_BAR: &str = "vertical-bar";

const TITLE_TOKEN: &str = "# Gene Family";
const TITLE_REPLACEMENT: &str = "Gene Family\tName+Organism";
const CPM_SUFFIX_TOKEN: &str = "_Abundance-CPM";

#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("rule id cannot be empty")]
    EmptyId,
    #[error("rule '{0}' has an empty pattern")]
    EmptyPattern(String),
    #[error("rule '{id}' has an invalid regex: {source}")]
    InvalidRegex {
        id: String,
        #[source]
        source: regex::Error,
    },
    #[error("rule '{0}' matches the empty string")]
    MatchesEmpty(String),
    #[error("unknown rule '{0}'")]
    Unknown(String),
}

impl From<RuleError> for AppError {
    fn from(e: RuleError) -> Self {
        let mut error =
            AppError::new(ErrorCategory::ValidationError, e.to_string()).with_code("RULE_ERROR");
        if let RuleError::Unknown(_) = e {
            error = error.with_suggestion("Run `retab rules` to list available rule ids");
        }
        error.source = Some(anyhow::anyhow!(e));
        error
    }
}

/// What a rule searches for.
#[derive(Debug, Clone)]
pub enum Pattern {
    Literal(String),
    Regex(Regex),
}

impl Pattern {
    pub fn as_str(&self) -> &str {
        match self {
            Pattern::Literal(literal) => literal,
            Pattern::Regex(regex) => regex.as_str(),
        }
    }

    pub fn is_regex(&self) -> bool {
        matches!(self, Pattern::Regex(_))
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.is_regex() == other.is_regex() && self.as_str() == other.as_str()
    }
}

/// A global find-and-replace step. The replacement is always literal text.
#[derive(Debug, Clone, PartialEq)]
pub struct SubstitutionRule {
    id: String,
    label: String,
    pattern: Pattern,
    replacement: String,
}

impl SubstitutionRule {
    pub fn literal(
        id: impl Into<String>,
        label: impl Into<String>,
        pattern: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Result<Self, RuleError> {
        let id = checked_id(id.into())?;
        let pattern = pattern.into();
        if pattern.is_empty() {
            return Err(RuleError::EmptyPattern(id));
        }
        Ok(SubstitutionRule {
            id,
            label: label.into(),
            pattern: Pattern::Literal(pattern),
            replacement: replacement.into(),
        })
    }

    pub fn regex(
        id: impl Into<String>,
        label: impl Into<String>,
        pattern: &str,
        replacement: impl Into<String>,
    ) -> Result<Self, RuleError> {
        let id = checked_id(id.into())?;
        if pattern.is_empty() {
            return Err(RuleError::EmptyPattern(id));
        }
        let regex = Regex::new(pattern).map_err(|source| RuleError::InvalidRegex {
            id: id.clone(),
            source,
        })?;
        if can_match_empty(pattern) {
            return Err(RuleError::MatchesEmpty(id));
        }
        Ok(SubstitutionRule {
            id,
            label: label.into(),
            pattern: Pattern::Regex(regex),
            replacement: replacement.into(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Replace every non-overlapping match in `text`, returning the new text and
    /// how many matches were replaced.
    pub fn apply(&self, text: &str) -> (String, usize) {
        match &self.pattern {
            Pattern::Literal(literal) => {
                let count = text.matches(literal.as_str()).count();
                if count == 0 {
                    return (text.to_string(), 0);
                }
                (text.replace(literal.as_str(), &self.replacement), count)
            }
            Pattern::Regex(regex) => {
                let count = regex.find_iter(text).count();
                if count == 0 {
                    return (text.to_string(), 0);
                }
                let replaced = regex.replace_all(text, NoExpand(&self.replacement));
                (replaced.into_owned(), count)
            }
        }
    }
}

impl fmt::Display for SubstitutionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.id)
    }
}

/// True when some haystack position yields a zero-length match, including
/// zero-width assertions such as `\b` that never match an empty haystack.
fn can_match_empty(pattern: &str) -> bool {
    matches!(
        regex_syntax::parse(pattern),
        Ok(hir) if hir.properties().minimum_len() == Some(0)
    )
}

fn checked_id(id: String) -> Result<String, RuleError> {
    if id.trim().is_empty() {
        return Err(RuleError::EmptyId);
    }
    Ok(id)
}

fn builtin_literal(id: &str, label: &str, pattern: &str, replacement: &str) -> SubstitutionRule {
    SubstitutionRule {
        id: id.to_string(),
        label: label.to_string(),
        pattern: Pattern::Literal(pattern.to_string()),
        replacement: replacement.to_string(),
    }
}

/// Look up a built-in rule by id.
pub fn builtin(id: &str) -> Option<SubstitutionRule> {
    let rule = match id {
        COLON => builtin_literal(COLON, "Replace colon", ":", "\t"),
        TITLE => builtin_literal(TITLE, "Replace title", TITLE_TOKEN, TITLE_REPLACEMENT),
        CPM_SUFFIX => builtin_literal(CPM_SUFFIX, "Remove CPM suffix", CPM_SUFFIX_TOKEN, ""),
        VERTICAL_BAR => builtin_literal(VERTICAL_BAR, "Replace vertical bar", "|", "\t"),
        _ => return None,
    };
    Some(rule)
}

/// All built-in rules in canonical order.
pub fn builtin_rules() -> Vec<SubstitutionRule> {
    [COLON, TITLE, CPM_SUFFIX, VERTICAL_BAR]
        .iter()
        .filter_map(|id| builtin(id))
        .collect()
}

pub fn is_builtin(id: &str) -> bool {
    builtin(id).is_some()
}
