// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The validator: runs every field's rules and collects messages.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::config::ValidationConfig;
use crate::error::{FieldCheckError, Result, RuleDefinitionError};
use crate::rules::{BuiltinRule, Descriptor, Rule, RuleError, RuleParser, RuleSpec, RuleValidator};

use super::exception::ValidationException;

type RuleResult<T> = std::result::Result<T, RuleDefinitionError>;

/// A descriptor resolved to something that can be evaluated.
enum CompiledRule {
    Builtin(BuiltinRule),
    Custom(Arc<dyn Rule>),
}

/// Validates a data object against per-field rules.
///
/// ```
/// use fieldcheck::Validator;
/// use serde_json::json;
///
/// let data = json!({ "email": "" });
/// let mut validator = Validator::from_value(data, [("email", "bail|required|email")]).unwrap();
///
/// assert!(validator.fails().unwrap());
/// assert_eq!(
///     validator.errors()["email"],
///     vec!["The email field is required.".to_string()]
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Validator {
    data: Map<String, Value>,
    rules: IndexMap<String, RuleSpec>,
    messages: HashMap<String, HashMap<String, String>>,
    aliases: HashMap<String, String>,
    errors: IndexMap<String, Vec<String>>,
}

impl Validator {
    /// Create a validator for `data` with rules per field. Fields are
    /// validated in the order the rules are given.
    pub fn new<I, K, S>(data: Map<String, Value>, rules: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<RuleSpec>,
    {
        Self {
            data,
            rules: rules
                .into_iter()
                .map(|(field, spec)| (field.into(), spec.into()))
                .collect(),
            ..Self::default()
        }
    }

    /// Create a validator from a JSON value, which must be an object.
    pub fn from_value<I, K, S>(data: Value, rules: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<RuleSpec>,
    {
        match data {
            Value::Object(map) => Ok(Self::new(map, rules)),
            other => Err(FieldCheckError::NotAnObject {
                kind: value_kind(&other).to_string(),
            }),
        }
    }

    /// Create a validator using the rules, messages and aliases of a
    /// configuration file.
    pub fn from_config(data: Map<String, Value>, config: &ValidationConfig) -> Self {
        Self::new(data, config.rules.clone())
            .with_messages(config.messages.clone())
            .with_aliases(config.aliases.clone())
    }

    /// Set the custom messages: field to rule name to template.
    pub fn with_messages(mut self, messages: HashMap<String, HashMap<String, String>>) -> Self {
        self.messages = messages;
        self
    }

    /// Set a custom message for one rule of one field.
    pub fn with_message(
        mut self,
        field: impl Into<String>,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.messages
            .entry(field.into())
            .or_default()
            .insert(rule.into(), message.into());
        self
    }

    /// Set the display names used for fields in messages.
    pub fn with_aliases(mut self, aliases: HashMap<String, String>) -> Self {
        self.aliases = aliases;
        self
    }

    /// Set the display name of one field.
    pub fn with_alias(mut self, field: impl Into<String>, alias: impl Into<String>) -> Self {
        self.aliases.insert(field.into(), alias.into());
        self
    }

    /// The data under validation.
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// The rules per field.
    pub fn rules(&self) -> &IndexMap<String, RuleSpec> {
        &self.rules
    }

    /// Run every field's rules. Returns whether all of them passed.
    ///
    /// The error store is rebuilt from scratch on every call. Rule
    /// definition errors abort the run.
    pub fn passes(&mut self) -> RuleResult<bool> {
        self.errors.clear();

        let mut errors = IndexMap::new();
        for (field, spec) in &self.rules {
            let messages = self.check_field(field, spec)?;
            if !messages.is_empty() {
                errors.insert(field.clone(), messages);
            }
        }
        self.errors = errors;

        tracing::debug!(
            fields = self.rules.len(),
            failed = self.errors.len(),
            "Validation finished"
        );

        Ok(!self.has_errors())
    }

    /// Run every field's rules. Returns whether any of them failed.
    pub fn fails(&mut self) -> RuleResult<bool> {
        self.passes().map(|passed| !passed)
    }

    /// Run the rules, converting a failure into a [`ValidationException`].
    pub fn validate(&mut self) -> Result<()> {
        if self.passes()? {
            Ok(())
        } else {
            Err(ValidationException::from(&*self).into())
        }
    }

    /// Check one field against `spec`, appending any messages to the
    /// error store.
    pub fn field_validate(&mut self, field: &str, spec: &RuleSpec) -> RuleResult<()> {
        let messages = self.check_field(field, spec)?;
        if !messages.is_empty() {
            self.errors
                .entry(field.to_string())
                .or_default()
                .extend(messages);
        }
        Ok(())
    }

    /// The messages of the last run, field to messages in rule order.
    pub fn errors(&self) -> &IndexMap<String, Vec<String>> {
        &self.errors
    }

    /// Whether the last run recorded any failure.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The first message recorded for `field`.
    pub fn first_error(&self, field: &str) -> Option<&str> {
        self.errors
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    /// Evaluate one field and return its failure messages.
    ///
    /// Every rule is resolved before any is evaluated, so a malformed rule
    /// is reported even when a bail would have skipped it. After a `bail`
    /// marker, the first failure stops the field.
    fn check_field(&self, field: &str, spec: &RuleSpec) -> RuleResult<Vec<String>> {
        let descriptors = RuleParser::parse(spec);
        let compiled = descriptors
            .iter()
            .map(compile)
            .collect::<RuleResult<Vec<_>>>()?;

        let checker = RuleValidator::new(&self.data);
        let mut should_bail = false;
        let mut messages = Vec::new();

        for (descriptor, rule) in descriptors.iter().zip(&compiled) {
            let passed = match rule {
                CompiledRule::Custom(custom) => custom.check(&self.data, field),
                CompiledRule::Builtin(builtin) => {
                    if builtin.is_bail() {
                        should_bail = true;
                    }
                    checker.passes(builtin, field)
                }
            };

            tracing::trace!(field, rule = %descriptor, passed, "Evaluated rule");

            if passed {
                continue;
            }

            messages.push(RuleError::from_descriptor(descriptor).error_message(
                field,
                self.aliases.get(field).map(String::as_str),
                self.messages.get(field),
            ));

            if should_bail {
                tracing::debug!(field, rule = %descriptor, "Bailing after first failure");
                break;
            }
        }

        Ok(messages)
    }
}

fn compile(descriptor: &Descriptor) -> RuleResult<CompiledRule> {
    match descriptor {
        Descriptor::Named { name, params } => {
            BuiltinRule::resolve(name, params).map(CompiledRule::Builtin)
        }
        Descriptor::Custom(rule) => Ok(CompiledRule::Custom(Arc::clone(rule))),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
