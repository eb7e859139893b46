pub mod config;
pub mod document;
pub mod error;
pub mod pipeline;
pub mod rule;
pub mod types;

pub use config::{ConfigLoader, ConfigValidator, RetabConfig};
pub use document::Document;
pub use error::{AppError, DefaultErrorReporter, ErrorReporter};
pub use pipeline::{transform, Pipeline, RuleOutcome, TransformReport};
pub use rule::{Pattern, RuleError, SubstitutionRule};
pub use types::*;
