// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Carrier for a failed validation.

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

use super::validator::Validator;

/// HTTP-style status for unprocessable input.
pub const UNPROCESSABLE_STATUS: u16 = 422;

/// A failed validation, ready for an upstream handler to render.
///
/// Holds a snapshot of the validator's errors taken when the exception
/// was created.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("{message}")]
pub struct ValidationException {
    message: String,
    #[serde(skip)]
    status: u16,
    errors: IndexMap<String, Vec<String>>,
}

impl ValidationException {
    /// Create an exception from an error store.
    pub fn new(errors: IndexMap<String, Vec<String>>) -> Self {
        Self {
            message: "Validation exception".to_string(),
            status: UNPROCESSABLE_STATUS,
            errors,
        }
    }

    /// The validation errors, field to ordered messages.
    pub fn errors(&self) -> &IndexMap<String, Vec<String>> {
        &self.errors
    }

    /// Status code classifying the failure.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// The exception message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&Validator> for ValidationException {
    fn from(validator: &Validator) -> Self {
        Self::new(validator.errors().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_errors() -> IndexMap<String, Vec<String>> {
        let mut errors = IndexMap::new();
        errors.insert(
            "email".to_string(),
            vec!["The email field is required.".to_string()],
        );
        errors
    }

    #[test]
    fn test_exception_status_and_message() {
        let exception = ValidationException::new(sample_errors());
        assert_eq!(exception.status(), 422);
        assert_eq!(exception.to_string(), "Validation exception");
        assert_eq!(exception.errors()["email"].len(), 1);
    }

    #[test]
    fn test_exception_serializes_errors() {
        let exception = ValidationException::new(sample_errors());
        let json = serde_json::to_value(&exception).unwrap();
        assert_eq!(json["message"], "Validation exception");
        assert_eq!(json["errors"]["email"][0], "The email field is required.");
        assert!(json.get("status").is_none());
    }
}
