// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for fieldcheck.
//!
//! Two kinds of failure exist. Rule definition errors are programmer
//! mistakes in a rule map (unknown rule, missing or malformed parameters)
//! and are raised immediately. Validation failures are data-dependent and
//! are collected into the validator's error store instead; they only
//! surface as an error when converted into a [`ValidationException`].

use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationException;

/// The main error type for fieldcheck operations.
#[derive(Error, Debug)]
pub enum FieldCheckError {
    // Configuration file errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Malformed rule definitions
    #[error("Rule definition error: {0}")]
    Rule(#[from] RuleDefinitionError),

    // Data failed validation
    #[error("{0}")]
    Validation(#[from] ValidationException),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Input data could not be decoded
    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    // Input data is not a field mapping
    #[error("Input data must be a JSON object, got {kind}")]
    NotAnObject { kind: String },

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

/// Errors in a rule map. These indicate the rules themselves are wrong,
/// not the data being validated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleDefinitionError {
    #[error("Unknown rule '{rule}' given")]
    UnknownRule { rule: String },

    #[error("Rule '{rule}' needs at least {required} parameter(s), {given} given")]
    MissingParameter {
        rule: String,
        required: usize,
        given: usize,
    },

    #[error("Rule '{rule}' expects {expected} parameters, got '{value}'")]
    InvalidParameter {
        rule: String,
        value: String,
        expected: String,
    },
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Configuration file already exists: {path}")]
    AlreadyExists { path: PathBuf },
}

/// Result type alias for fieldcheck operations.
pub type Result<T> = std::result::Result<T, FieldCheckError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| FieldCheckError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::NotFound {
            path: PathBuf::from("/path/to/fieldcheck.toml"),
        };
        assert!(err.to_string().contains("/path/to/fieldcheck.toml"));
    }

    #[test]
    fn test_unknown_rule_display() {
        let err = RuleDefinitionError::UnknownRule {
            rule: "abcdefghi".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown rule 'abcdefghi' given");
    }

    #[test]
    fn test_missing_parameter_display() {
        let err = RuleDefinitionError::MissingParameter {
            rule: "min".to_string(),
            required: 1,
            given: 0,
        };
        assert!(err.to_string().contains("min"));
        assert!(err.to_string().contains("1"));
    }

    #[test]
    fn test_error_from_rule_definition() {
        let rule_err = RuleDefinitionError::InvalidParameter {
            rule: "max".to_string(),
            value: "ten".to_string(),
            expected: "numeric".to_string(),
        };
        let err: FieldCheckError = rule_err.into();
        assert!(err.to_string().contains("ten"));
    }

    #[test]
    fn test_result_context() {
        let io: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let err = io.context("reading data").unwrap_err();
        assert_eq!(err.to_string(), "reading data: missing");
    }
}
