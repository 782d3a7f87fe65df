// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Evaluation of built-in rules against input data.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::RuleDefinitionError;

use super::builtin::BuiltinRule;

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$"
    ).unwrap();

    static ref URL_REGEX: Regex =
        Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://[^\s/?#]+[^\s]*$").unwrap();

    static ref UUID_REGEX: Regex = Regex::new(
        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$"
    ).unwrap();

    static ref ALPHA_REGEX: Regex = Regex::new(r"^[\p{L}\p{M}]+$").unwrap();
    static ref ALPHA_DASH_REGEX: Regex = Regex::new(r"^[\p{L}\p{M}\p{N}_-]+$").unwrap();
    static ref ALPHA_NUM_REGEX: Regex = Regex::new(r"^[\p{L}\p{M}\p{N}]+$").unwrap();
}

/// Checks fields of one data object against built-in rules.
#[derive(Debug, Clone, Copy)]
pub struct RuleValidator<'a> {
    data: &'a Map<String, Value>,
}

impl<'a> RuleValidator<'a> {
    /// Create a rule validator over the given data.
    pub fn new(data: &'a Map<String, Value>) -> Self {
        Self { data }
    }

    /// Check `field` against the rule named `rule`.
    ///
    /// Fails when the rule is unknown or its parameters are missing or
    /// malformed. A `false` return is an ordinary validation failure.
    pub fn passes_rule(
        &self,
        rule: &str,
        field: &str,
        params: &[String],
    ) -> std::result::Result<bool, RuleDefinitionError> {
        let resolved = BuiltinRule::resolve(rule, params)?;
        Ok(self.passes(&resolved, field))
    }

    /// Check `field` against an already resolved rule.
    pub fn passes(&self, rule: &BuiltinRule, field: &str) -> bool {
        let value = self.data.get(field);

        match rule {
            BuiltinRule::Bail => true,
            BuiltinRule::Confirm => value == self.data.get(&format!("{}_confirm", field)),
            BuiltinRule::Email => text(value).is_some_and(|s| EMAIL_REGEX.is_match(&s)),
            BuiltinRule::Required => is_present(value),
            BuiltinRule::Min(min) => size(value).is_some_and(|s| s >= *min),
            BuiltinRule::Max(max) => size(value).is_some_and(|s| s <= *max),
            BuiltinRule::Integer => value.is_some_and(is_integer),
            BuiltinRule::String => value.is_some_and(Value::is_string),
            BuiltinRule::Accepted => {
                text(value).is_some_and(|s| matches!(s.as_str(), "yes" | "on" | "1" | "true"))
            }
            BuiltinRule::Alpha => text(value).is_some_and(|s| ALPHA_REGEX.is_match(&s)),
            BuiltinRule::AlphaDash => text(value).is_some_and(|s| ALPHA_DASH_REGEX.is_match(&s)),
            BuiltinRule::AlphaNum => text(value).is_some_and(|s| ALPHA_NUM_REGEX.is_match(&s)),
            BuiltinRule::Array => matches!(value, Some(Value::Array(_) | Value::Object(_))),
            BuiltinRule::Between(min, max) => {
                size(value).is_some_and(|s| s >= *min && s <= *max)
            }
            BuiltinRule::Boolean => {
                matches!(value, Some(Value::Bool(_)))
                    || text(value).is_some_and(|s| s == "0" || s == "1")
            }
            BuiltinRule::Different(other) => value != self.data.get(other),
            BuiltinRule::Digits(len) => digits(value).is_some_and(|d| d.len() == *len),
            BuiltinRule::DigitsBetween(min, max) => {
                digits(value).is_some_and(|d| d.len() >= *min && d.len() <= *max)
            }
            BuiltinRule::Distinct => match value {
                Some(Value::Array(items)) => items
                    .iter()
                    .enumerate()
                    .all(|(i, item)| !items[..i].contains(item)),
                _ => true,
            },
            BuiltinRule::Filled => value.is_none() || is_present(value),
            BuiltinRule::In(allowed) => one_of(value, allowed),
            BuiltinRule::InArray(other) => match self.data.get(other) {
                Some(Value::Array(items)) => value.is_some_and(|v| items.contains(v)),
                _ => false,
            },
            BuiltinRule::Ip => text(value).is_some_and(|s| s.parse::<IpAddr>().is_ok()),
            BuiltinRule::Ipv4 => text(value).is_some_and(|s| s.parse::<Ipv4Addr>().is_ok()),
            BuiltinRule::Ipv6 => text(value).is_some_and(|s| s.parse::<Ipv6Addr>().is_ok()),
            BuiltinRule::Json => match value {
                Some(Value::String(s)) => serde_json::from_str::<Value>(s).is_ok(),
                _ => false,
            },
            BuiltinRule::NotIn(denied) => value.is_some() && !one_of(value, denied),
            BuiltinRule::NotRegex(re) => text(value).is_some_and(|s| !re.is_match(&s)),
            BuiltinRule::Numeric => match value {
                Some(Value::Number(_)) => true,
                Some(Value::String(s)) => s.trim().parse::<f64>().is_ok_and(f64::is_finite),
                _ => false,
            },
            BuiltinRule::Present => value.is_some(),
            BuiltinRule::Regex(re) => text(value).is_some_and(|s| re.is_match(&s)),
            BuiltinRule::RequiredIf(other, values) => {
                !text(self.data.get(other)).is_some_and(|s| values.contains(&s))
                    || is_present(value)
            }
            BuiltinRule::RequiredUnless(other, values) => {
                text(self.data.get(other)).is_some_and(|s| values.contains(&s))
                    || is_present(value)
            }
            BuiltinRule::RequiredWith(fields) => {
                !fields.iter().any(|f| self.field_present(f)) || is_present(value)
            }
            BuiltinRule::RequiredWithAll(fields) => {
                !fields.iter().all(|f| self.field_present(f)) || is_present(value)
            }
            BuiltinRule::RequiredWithout(fields) => {
                fields.iter().all(|f| self.field_present(f)) || is_present(value)
            }
            BuiltinRule::RequiredWithoutAll(fields) => {
                fields.iter().any(|f| self.field_present(f)) || is_present(value)
            }
            BuiltinRule::Same(other) => value == self.data.get(other),
            BuiltinRule::Size(expected) => size(value).is_some_and(|s| s == *expected),
            BuiltinRule::StartsWith(prefixes) => {
                text(value).is_some_and(|s| prefixes.iter().any(|p| s.starts_with(p.as_str())))
            }
            BuiltinRule::Url => text(value).is_some_and(|s| URL_REGEX.is_match(&s)),
            BuiltinRule::Uuid => text(value).is_some_and(|s| UUID_REGEX.is_match(&s)),
        }
    }

    fn field_present(&self, field: &str) -> bool {
        is_present(self.data.get(field))
    }
}

/// A value is present unless it is absent, null, or the empty string.
/// `0`, `false` and empty arrays count as present.
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// The measure compared by size rules.
///
/// Strings measure in characters and arrays in elements, but numbers are
/// their own size: `min:5` on a number means "at least 5", not "at least
/// five digits". Booleans count as 1 or 0. Objects, null and absent values
/// have no size, so every comparison fails.
pub fn size(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::String(s) => Some(s.chars().count() as f64),
        Value::Array(items) => Some(items.len() as f64),
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Object(_) | Value::Null => None,
    }
}

fn is_integer(value: &Value) -> bool {
    match value {
        Value::Number(n) => {
            n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0)
        }
        _ => false,
    }
}

/// Scalar values as text; strings verbatim, numbers and booleans rendered.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn digits(value: Option<&Value>) -> Option<String> {
    text(value).filter(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()))
}

/// Scalars must be in the list; arrays must have every element in it.
fn one_of(value: Option<&Value>, allowed: &[String]) -> bool {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .all(|item| text(Some(item)).is_some_and(|s| allowed.contains(&s))),
        other => text(other).is_some_and(|s| allowed.contains(&s)),
    }
}
