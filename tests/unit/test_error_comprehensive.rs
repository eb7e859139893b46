use retab::core::error::{AppError, DefaultErrorReporter, ErrorReporter};
use retab::core::rule::RuleError;
use retab::core::types::{ErrorCategory, ErrorSeverity};
use std::io;
use std::path::Path;

#[test]
fn test_error_creation_all_categories() {
    let categories = vec![
        ErrorCategory::ValidationError,
        ErrorCategory::NotFound,
        ErrorCategory::IoError,
        ErrorCategory::SerializationError,
        ErrorCategory::Unknown,
    ];

    for category in categories {
        let error = AppError::new(category, "test message");
        assert_eq!(error.category, category);
        assert_eq!(error.message, "test message");
        assert!(error.context.is_empty());
        assert!(error.recovery_suggestions.is_empty());
        assert!(error.occurred_at <= chrono::Utc::now());
        assert!(error.source.is_none());
    }
}

#[test]
fn test_error_severity_mapping() {
    let test_cases = vec![
        (ErrorCategory::ValidationError, ErrorSeverity::Error),
        (ErrorCategory::NotFound, ErrorSeverity::Error),
        (ErrorCategory::IoError, ErrorSeverity::Error),
        (ErrorCategory::SerializationError, ErrorSeverity::Error),
        (ErrorCategory::Unknown, ErrorSeverity::Info),
    ];

    for (category, expected_severity) in test_cases {
        let error = AppError::new(category, "test");
        assert_eq!(error.severity(), expected_severity);
    }
}

#[test]
fn test_error_codes_are_unique() {
    let first = AppError::new(ErrorCategory::IoError, "a");
    let second = AppError::new(ErrorCategory::IoError, "a");
    assert_ne!(first.code, second.code);
}

#[test]
fn test_error_display_includes_code_and_category() {
    let mut error =
        AppError::new(ErrorCategory::ValidationError, "bad rule").with_code("TEST-001");
    error.add_context("pipeline", "relab");
    assert_eq!(error.to_string(), "[TEST-001] ValidationError: bad rule");
}

#[test]
fn test_io_conversion_keeps_not_found() {
    let error: AppError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
    assert_eq!(error.category, ErrorCategory::NotFound);
    assert!(error.source.is_some());

    let error: AppError = io::Error::new(io::ErrorKind::PermissionDenied, "no").into();
    assert_eq!(error.category, ErrorCategory::IoError);
}

#[test]
fn test_from_io_records_path() {
    let error = AppError::from_io(
        "Failed to write output file",
        Path::new("Data/ecs_3_split.csv"),
        io::Error::new(io::ErrorKind::NotFound, "no such directory"),
    );
    assert_eq!(
        error.context.get("path").map(String::as_str),
        Some("Data/ecs_3_split.csv")
    );
    assert!(error.message.starts_with("Failed to write output file"));
    assert!(!error.recovery_suggestions.is_empty());
}

#[test]
fn test_rule_error_conversion() {
    let error: AppError = RuleError::EmptyPattern("blank".to_string()).into();
    assert_eq!(error.category, ErrorCategory::ValidationError);
    assert_eq!(error.code, "RULE_ERROR");
    assert!(error.message.contains("blank"));
}

#[test]
fn test_app_error_converts_into_anyhow() {
    let error = AppError::new(ErrorCategory::NotFound, "missing input");
    let wrapped: anyhow::Error = error.into();
    let recovered = wrapped.downcast_ref::<AppError>().unwrap();
    assert_eq!(recovered.category, ErrorCategory::NotFound);
}

#[test]
fn test_default_reporter_does_not_panic() {
    let mut error = AppError::new(ErrorCategory::IoError, "write failed")
        .with_suggestion("Check the output directory");
    error.add_context("path", "out.csv");
    DefaultErrorReporter::new().report_error(&error);
    DefaultErrorReporter.report_error(&AppError::new(ErrorCategory::Unknown, ""));
}
