// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! fieldcheck - declarative field validation
//!
//! Checks a JSON-like data object against per-field rules and collects
//! human-readable messages for every rule that fails.
//!
//! # Features
//!
//! - **Rule strings**: `"bail|required|between:1,10"`, parsed leniently
//! - **Built-in rules**: presence, size, type, format and cross-field rules
//! - **Custom rules**: implement [`Rule`] for anything the table lacks
//! - **Messages**: per-field overrides, aliases and positional placeholders
//! - **Rule files**: rules, messages and aliases loaded from TOML
//!
//! # Example
//!
//! ```
//! use fieldcheck::Validator;
//! use serde_json::json;
//!
//! let data = json!({ "name": "", "age": 15 });
//! let mut validator = Validator::from_value(data, [
//!     ("name", "required|string"),
//!     ("age", "integer|min:18"),
//! ])
//! .unwrap()
//! .with_alias("name", "full name")
//! .with_message("age", "min", "You must be at least :min years old.");
//!
//! assert!(validator.fails().unwrap());
//! assert_eq!(validator.first_error("name"), Some("The full name field is required."));
//! assert_eq!(validator.first_error("age"), Some("You must be at least 18 years old."));
//! ```

// Module declarations
pub mod cli;
pub mod config;
pub mod error;
pub mod rules;
pub mod validation;

// Re-exports for convenience
pub use config::ValidationConfig;
pub use error::{FieldCheckError, Result, RuleDefinitionError};
pub use rules::{Rule, RuleEntry, RuleSpec};
pub use validation::{ValidationException, Validator};
