//! # Application Error Types
//!
//! This module defines common error types used throughout the order-interpreter
//! crate. Parsing and matching never fail; errors only arise from invalid
//! configuration or rejected boundary input.

use std::fmt;

/// General application error type for consistent error handling
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Configuration validation errors
    Config(String),
    /// Validation errors (response text, boundary input)
    Validation(String),
    /// Internal application errors
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "[CONFIG] {}", msg),
            AppError::Validation(msg) => write!(f, "[VALIDATION] {}", msg),
            AppError::Internal(msg) => write!(f, "[INTERNAL] {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Standardized error logging utilities for consistent error reporting
pub mod error_logging {
    use tracing::error;

    /// Shorten an input value for log output, truncating on a char boundary
    pub(crate) fn input_preview(value: &str) -> String {
        if value.len() <= 100 {
            return value.to_string();
        }
        let mut cut = 100;
        while !value.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}...", &value[..cut])
    }

    /// Log validation errors with input context
    pub fn log_validation_error(
        error: &impl std::fmt::Display,
        operation: &str,
        input_value: Option<&str>,
    ) {
        error!(
            error = %error,
            operation = %operation,
            input_value = ?input_value.map(input_preview),
            "Validation failed"
        );
    }

    /// Log configuration errors during startup/initialization
    pub fn log_config_error(error: &impl std::fmt::Display, config_key: &str, operation: &str) {
        error!(
            error = %error,
            config_key = %config_key,
            operation = %operation,
            "Configuration error"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_category() {
        assert_eq!(
            AppError::Config("bad threshold".to_string()).to_string(),
            "[CONFIG] bad threshold"
        );
        assert_eq!(
            AppError::Validation("empty input".to_string()).to_string(),
            "[VALIDATION] empty input"
        );
    }

    #[test]
    fn test_from_anyhow() {
        let err: AppError = anyhow::anyhow!("boom").into();
        assert_eq!(err, AppError::Internal("boom".to_string()));
    }

    #[test]
    fn test_input_preview_respects_char_boundaries() {
        let short = "Cheeseburger";
        assert_eq!(error_logging::input_preview(short), short);

        // A two-byte char straddles the 100-byte cut point
        let long = format!("{}ñ tail that pushes the input past the limit", "a".repeat(99));
        let preview = error_logging::input_preview(&long);
        assert!(preview.ends_with("..."));
        assert_eq!(&preview[..99], "a".repeat(99));
    }
}
