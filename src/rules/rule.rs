// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! User-defined validation rules.

use serde_json::{Map, Value};

/// Trait for custom rules.
///
/// A custom rule sees the whole input (so it can compare fields) and the
/// name of the field under validation. The message it returns may use the
/// same placeholders as the built-in messages: `:attribute` is replaced
/// with the field name or alias, and any other `:word` is replaced by the
/// rule's parameters in order.
pub trait Rule: std::fmt::Debug + Send + Sync {
    /// Check whether `field` in `data` satisfies this rule.
    fn check(&self, data: &Map<String, Value>, field: &str) -> bool;

    /// Get the message template used when the check fails.
    fn error_message(&self) -> String;

    /// Get the rule name, used to look up custom messages.
    fn name(&self) -> &str {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug)]
    struct Uppercase;

    impl Rule for Uppercase {
        fn check(&self, data: &Map<String, Value>, field: &str) -> bool {
            data.get(field)
                .and_then(Value::as_str)
                .map(|s| s.chars().all(|c| !c.is_lowercase()))
                .unwrap_or(false)
        }

        fn error_message(&self) -> String {
            "The :attribute must be uppercase.".to_string()
        }
    }

    #[test]
    fn test_default_name_is_empty() {
        assert_eq!(Uppercase.name(), "");
    }

    #[test]
    fn test_custom_check() {
        let data = json!({ "code": "ABC", "other": "abc" });
        let data = data.as_object().unwrap();
        assert!(Uppercase.check(data, "code"));
        assert!(!Uppercase.check(data, "other"));
        assert!(!Uppercase.check(data, "missing"));
    }
}
