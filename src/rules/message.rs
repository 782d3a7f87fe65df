// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error message rendering for failed rules.

use std::collections::HashMap;
use std::sync::Arc;

use convert_case::{Case, Casing};
use lazy_static::lazy_static;
use regex::{NoExpand, Regex};

use super::parser::Descriptor;
use super::rule::Rule;

lazy_static! {
    static ref ATTRIBUTE_PLACEHOLDER: Regex = Regex::new(r"(?i):attribute").unwrap();
    static ref PARAM_PLACEHOLDER: Regex = Regex::new(r":[A-Za-z0-9_]+").unwrap();
}

/// Used when a rule has neither a custom nor a default message.
pub const FALLBACK_MESSAGE: &str = "The :attribute field is invalid.";

/// Default message templates, keyed by rule name.
///
/// The table also covers rule families the dispatch table does not
/// implement (dates, files, images, database lookups), so that custom
/// rules with those names still render sensible text.
pub const DEFAULT_MESSAGES: &[(&str, &str)] = &[
    ("accepted", "The :attribute must be accepted."),
    ("active_url", "The :attribute is not a valid URL."),
    ("after", "The :attribute must be a date after :date."),
    ("after_or_equal", "The :attribute must be a date after or equal to :date."),
    ("alpha", "The :attribute may only contain letters."),
    ("alpha_dash", "The :attribute may only contain letters, numbers, dashes and underscores."),
    ("alpha_num", "The :attribute may only contain letters and numbers."),
    ("array", "The :attribute must be an array."),
    ("before", "The :attribute must be a date before :date."),
    ("before_or_equal", "The :attribute must be a date before or equal to :date."),
    ("between", "The :attribute must be between :min and :max."),
    ("boolean", "The :attribute field must be true or false."),
    ("confirm", "The :attribute confirmation does not match."),
    ("date", "The :attribute is not a valid date."),
    ("date_equals", "The :attribute must be a date equal to :date."),
    ("date_format", "The :attribute does not match the format :format."),
    ("different", "The :attribute and :other must be different."),
    ("digits", "The :attribute must be :digits digits."),
    ("digits_between", "The :attribute must be between :min and :max digits."),
    ("dimensions", "The :attribute has invalid image dimensions."),
    ("distinct", "The :attribute field has a duplicate value."),
    ("email", "The :attribute must be a valid email address."),
    ("exists", "The selected :attribute is invalid."),
    ("file", "The :attribute must be a file."),
    ("filled", "The :attribute field must have a value."),
    ("image", "The :attribute must be an image."),
    ("in", "The selected :attribute is invalid."),
    ("in_array", "The :attribute field does not exist in :other."),
    ("integer", "The :attribute must be an integer."),
    ("ip", "The :attribute must be a valid IP address."),
    ("ipv4", "The :attribute must be a valid IPv4 address."),
    ("ipv6", "The :attribute must be a valid IPv6 address."),
    ("json", "The :attribute must be a valid JSON string."),
    ("max", "The :attribute may not be greater than :max."),
    ("mimes", "The :attribute must be a file of type: :values."),
    ("mimetypes", "The :attribute must be a file of type: :values."),
    ("min", "The :attribute field must have at least :min characters."),
    ("not_in", "The selected :attribute is invalid."),
    ("not_regex", "The :attribute format is invalid."),
    ("numeric", "The :attribute must be a number."),
    ("present", "The :attribute field must be present."),
    ("regex", "The :attribute format is invalid."),
    ("required", "The :attribute field is required."),
    ("required_if", "The :attribute field is required when :other is :value."),
    ("required_unless", "The :attribute field is required unless :other is in :values."),
    ("required_with", "The :attribute field is required when :values is present."),
    ("required_with_all", "The :attribute field is required when :values are present."),
    ("required_without", "The :attribute field is required when :values is not present."),
    ("required_without_all", "The :attribute field is required when none of :values are present."),
    ("same", "The :attribute and :other must match."),
    ("size", "The :attribute must be :size."),
    ("starts_with", "The :attribute must start with one of the following: :values"),
    ("string", "The :attribute must be a string."),
    ("timezone", "The :attribute must be a valid zone."),
    ("unique", "The :attribute has already been taken."),
    ("uploaded", "The :attribute failed to upload."),
    ("url", "The :attribute format is invalid."),
    ("uuid", "The :attribute must be a valid UUID."),
];

/// Look up the default message template for a rule name.
pub fn default_message(rule: &str) -> Option<&'static str> {
    DEFAULT_MESSAGES
        .iter()
        .find(|(name, _)| *name == rule)
        .map(|(_, message)| *message)
}

/// The rule behind a failure.
#[derive(Debug, Clone)]
pub enum FailedRule {
    Named(String),
    Custom(Arc<dyn Rule>),
}

/// A failed rule and the parameters it was given.
#[derive(Debug, Clone)]
pub struct RuleError {
    rule: FailedRule,
    params: Vec<String>,
}

impl RuleError {
    /// A failure of the built-in rule `name`.
    pub fn named(name: impl Into<String>, params: Vec<String>) -> Self {
        Self {
            rule: FailedRule::Named(name.into()),
            params,
        }
    }

    /// A failure of a custom rule.
    pub fn custom(rule: Arc<dyn Rule>) -> Self {
        Self {
            rule: FailedRule::Custom(rule),
            params: Vec::new(),
        }
    }

    /// The failure of the rule a descriptor stands for.
    pub fn from_descriptor(descriptor: &Descriptor) -> Self {
        match descriptor {
            Descriptor::Named { name, params } => Self::named(name.clone(), params.clone()),
            Descriptor::Custom(rule) => Self::custom(Arc::clone(rule)),
        }
    }

    /// The failed rule.
    pub fn rule(&self) -> &FailedRule {
        &self.rule
    }

    /// Render the message for `field`.
    ///
    /// Custom rules look up `custom_<snake name>` in `custom_messages`,
    /// built-in rules look up their own name; both fall back to a default.
    /// `:attribute` becomes the alias (or the field name), then each
    /// remaining `:word` placeholder takes the next parameter in order.
    pub fn error_message(
        &self,
        field: &str,
        alias: Option<&str>,
        custom_messages: Option<&HashMap<String, String>>,
    ) -> String {
        let custom = |key: &str| custom_messages.and_then(|messages| messages.get(key)).cloned();

        let template = match &self.rule {
            FailedRule::Custom(rule) => {
                custom(custom_message_key(rule.name()).as_str())
                    .unwrap_or_else(|| rule.error_message())
            }
            FailedRule::Named(name) => custom(name.as_str()).unwrap_or_else(|| {
                default_message(name)
                    .or_else(|| default_message(&name.to_case(Case::Snake)))
                    .unwrap_or(FALLBACK_MESSAGE)
                    .to_string()
            }),
        };

        let attribute = alias.filter(|a| !a.is_empty()).unwrap_or(field);
        let message = ATTRIBUTE_PLACEHOLDER
            .replace_all(&template, NoExpand(attribute))
            .into_owned();

        self.replace_params(message)
    }

    fn replace_params(&self, mut message: String) -> String {
        for param in &self.params {
            message = PARAM_PLACEHOLDER
                .replace(&message, NoExpand(param))
                .into_owned();
        }
        message
    }
}

/// Key under which a custom rule's message override is stored.
pub fn custom_message_key(rule_name: &str) -> String {
    if rule_name.is_empty() {
        "custom".to_string()
    } else {
        format!("custom_{}", rule_name.to_case(Case::Snake))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value};

    #[derive(Debug)]
    struct UniqueEmail;

    impl Rule for UniqueEmail {
        fn check(&self, _data: &Map<String, Value>, _field: &str) -> bool {
            false
        }

        fn error_message(&self) -> String {
            "The :attribute is already registered.".to_string()
        }

        fn name(&self) -> &str {
            "UniqueEmail"
        }
    }

    fn messages(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_message_with_field_name() {
        let error = RuleError::named("required", vec![]);
        assert_eq!(
            error.error_message("test", None, None),
            "The test field is required."
        );
    }

    #[test]
    fn test_alias_replaces_attribute() {
        let error = RuleError::named("required", vec![]);
        assert_eq!(
            error.error_message("email", Some("e-mail address"), None),
            "The e-mail address field is required."
        );
    }

    #[test]
    fn test_empty_alias_falls_back_to_field() {
        let error = RuleError::named("required", vec![]);
        assert_eq!(
            error.error_message("email", Some(""), None),
            "The email field is required."
        );
    }

    #[test]
    fn test_attribute_placeholder_is_case_insensitive() {
        let error = RuleError::named("required", vec![]);
        let custom = messages(&[("required", ":ATTRIBUTE missing, :Attribute!")]);
        assert_eq!(
            error.error_message("name", None, Some(&custom)),
            "name missing, name!"
        );
    }

    #[test]
    fn test_params_replace_placeholders_in_order() {
        let error = RuleError::named("between", vec!["1".to_string(), "10".to_string()]);
        assert_eq!(
            error.error_message("age", None, None),
            "The age must be between 1 and 10."
        );
    }

    #[test]
    fn test_extra_placeholders_are_left_verbatim() {
        let error = RuleError::named("between", vec!["1".to_string()]);
        assert_eq!(
            error.error_message("age", None, None),
            "The age must be between 1 and :max."
        );
    }

    #[test]
    fn test_extra_params_are_ignored() {
        let error = RuleError::named(
            "required_unless",
            vec!["role".to_string(), "admin".to_string(), "owner".to_string()],
        );
        assert_eq!(
            error.error_message("team", None, None),
            "The team field is required unless role is in admin."
        );
    }

    #[test]
    fn test_custom_message_overrides_default() {
        let error = RuleError::named("min", vec!["10".to_string()]);
        let custom = messages(&[("min", ":attribute needs :count chars")]);
        assert_eq!(
            error.error_message("bio", None, Some(&custom)),
            "bio needs 10 chars"
        );
    }

    #[test]
    fn test_custom_rule_uses_own_message() {
        let error = RuleError::custom(Arc::new(UniqueEmail));
        assert_eq!(
            error.error_message("email", None, None),
            "The email is already registered."
        );
    }

    #[test]
    fn test_custom_rule_message_override() {
        let error = RuleError::custom(Arc::new(UniqueEmail));
        let custom = messages(&[("custom_unique_email", "Pick another :attribute.")]);
        assert_eq!(
            error.error_message("email", None, Some(&custom)),
            "Pick another email."
        );
    }

    #[test]
    fn test_unknown_rule_name_uses_fallback() {
        let error = RuleError::named("shiny", vec![]);
        assert_eq!(
            error.error_message("thing", None, None),
            "The thing field is invalid."
        );
    }

    #[test]
    fn test_custom_message_key() {
        assert_eq!(custom_message_key("UniqueEmail"), "custom_unique_email");
        assert_eq!(custom_message_key("unique_email"), "custom_unique_email");
        assert_eq!(custom_message_key(""), "custom");
    }

    #[test]
    fn test_default_table_covers_dispatch_table() {
        for rule in crate::rules::SUPPORTED_RULES {
            if *rule != "bail" {
                assert!(default_message(rule).is_some(), "no message for {}", rule);
            }
        }
    }
}
