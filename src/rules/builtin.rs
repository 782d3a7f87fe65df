// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in validation rules.
//!
//! Rule names are canonicalized to StudlyCase (`digits_between` becomes
//! `DigitsBetween`) and resolved against a closed table. Resolution also
//! checks parameter count and type, so a malformed rule map is reported
//! before any data is looked at.

use regex::Regex;

use crate::error::RuleDefinitionError;

type ResolveResult = std::result::Result<BuiltinRule, RuleDefinitionError>;

/// A resolved built-in rule with typed parameters.
#[derive(Debug, Clone)]
pub enum BuiltinRule {
    /// Marker: stop at the first failure after this point.
    Bail,
    Confirm,
    Email,
    Required,
    Min(f64),
    Max(f64),
    Integer,
    String,
    Accepted,
    Alpha,
    AlphaDash,
    AlphaNum,
    Array,
    Between(f64, f64),
    Boolean,
    Different(String),
    Digits(usize),
    DigitsBetween(usize, usize),
    Distinct,
    Filled,
    In(Vec<String>),
    InArray(String),
    Ip,
    Ipv4,
    Ipv6,
    Json,
    NotIn(Vec<String>),
    NotRegex(Regex),
    Numeric,
    Present,
    Regex(Regex),
    RequiredIf(String, Vec<String>),
    RequiredUnless(String, Vec<String>),
    RequiredWith(Vec<String>),
    RequiredWithAll(Vec<String>),
    RequiredWithout(Vec<String>),
    RequiredWithoutAll(Vec<String>),
    Same(String),
    Size(f64),
    StartsWith(Vec<String>),
    Url,
    Uuid,
}

impl BuiltinRule {
    /// Resolve a rule name and its raw parameters.
    pub fn resolve(name: &str, params: &[String]) -> ResolveResult {
        let rule = name.trim();

        let resolved = match canonical_name(rule).as_str() {
            "Bail" => BuiltinRule::Bail,
            "Confirm" => BuiltinRule::Confirm,
            "Email" => BuiltinRule::Email,
            "Required" => BuiltinRule::Required,
            "Min" => {
                require_params(rule, params, 1)?;
                BuiltinRule::Min(numeric_param(rule, &params[0])?)
            }
            "Max" => {
                require_params(rule, params, 1)?;
                BuiltinRule::Max(numeric_param(rule, &params[0])?)
            }
            "Integer" => BuiltinRule::Integer,
            "String" => BuiltinRule::String,
            "Accepted" => BuiltinRule::Accepted,
            "Alpha" => BuiltinRule::Alpha,
            "AlphaDash" => BuiltinRule::AlphaDash,
            "AlphaNum" => BuiltinRule::AlphaNum,
            "Array" => BuiltinRule::Array,
            "Between" => {
                require_params(rule, params, 2)?;
                BuiltinRule::Between(
                    numeric_param(rule, &params[0])?,
                    numeric_param(rule, &params[1])?,
                )
            }
            "Boolean" => BuiltinRule::Boolean,
            "Different" => {
                require_params(rule, params, 1)?;
                BuiltinRule::Different(params[0].clone())
            }
            "Digits" => {
                require_params(rule, params, 1)?;
                BuiltinRule::Digits(count_param(rule, &params[0])?)
            }
            "DigitsBetween" => {
                require_params(rule, params, 2)?;
                BuiltinRule::DigitsBetween(
                    count_param(rule, &params[0])?,
                    count_param(rule, &params[1])?,
                )
            }
            "Distinct" => BuiltinRule::Distinct,
            "Filled" => BuiltinRule::Filled,
            "In" => BuiltinRule::In(params.to_vec()),
            "InArray" => {
                require_params(rule, params, 1)?;
                let other = params[0].trim_end_matches(".*");
                BuiltinRule::InArray(other.to_string())
            }
            "Ip" => BuiltinRule::Ip,
            "Ipv4" => BuiltinRule::Ipv4,
            "Ipv6" => BuiltinRule::Ipv6,
            "Json" => BuiltinRule::Json,
            "NotIn" => BuiltinRule::NotIn(params.to_vec()),
            "NotRegex" => {
                require_params(rule, params, 1)?;
                BuiltinRule::NotRegex(regex_param(rule, params)?)
            }
            "Numeric" => BuiltinRule::Numeric,
            "Present" => BuiltinRule::Present,
            "Regex" => {
                require_params(rule, params, 1)?;
                BuiltinRule::Regex(regex_param(rule, params)?)
            }
            "RequiredIf" => {
                require_params(rule, params, 2)?;
                BuiltinRule::RequiredIf(params[0].clone(), params[1..].to_vec())
            }
            "RequiredUnless" => {
                require_params(rule, params, 2)?;
                BuiltinRule::RequiredUnless(params[0].clone(), params[1..].to_vec())
            }
            "RequiredWith" => {
                require_params(rule, params, 1)?;
                BuiltinRule::RequiredWith(params.to_vec())
            }
            "RequiredWithAll" => {
                require_params(rule, params, 1)?;
                BuiltinRule::RequiredWithAll(params.to_vec())
            }
            "RequiredWithout" => {
                require_params(rule, params, 1)?;
                BuiltinRule::RequiredWithout(params.to_vec())
            }
            "RequiredWithoutAll" => {
                require_params(rule, params, 1)?;
                BuiltinRule::RequiredWithoutAll(params.to_vec())
            }
            "Same" => {
                require_params(rule, params, 1)?;
                BuiltinRule::Same(params[0].clone())
            }
            "Size" => {
                require_params(rule, params, 1)?;
                BuiltinRule::Size(numeric_param(rule, &params[0])?)
            }
            "StartsWith" => {
                require_params(rule, params, 1)?;
                BuiltinRule::StartsWith(params.to_vec())
            }
            "Url" => BuiltinRule::Url,
            "Uuid" => BuiltinRule::Uuid,
            _ => {
                return Err(RuleDefinitionError::UnknownRule {
                    rule: rule.to_string(),
                })
            }
        };

        Ok(resolved)
    }

    /// Whether this is the `bail` marker.
    pub fn is_bail(&self) -> bool {
        matches!(self, BuiltinRule::Bail)
    }
}

/// Canonical StudlyCase form of a rule name.
///
/// Words split on `_`, `-` and whitespace; only the first letter of each is
/// uppercased, so `REQUIRED` stays `REQUIRED` and does not match `Required`.
pub fn canonical_name(rule: &str) -> String {
    rule.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Names of every rule the dispatch table accepts, in snake_case.
pub const SUPPORTED_RULES: &[&str] = &[
    "accepted",
    "alpha",
    "alpha_dash",
    "alpha_num",
    "array",
    "bail",
    "between",
    "boolean",
    "confirm",
    "different",
    "digits",
    "digits_between",
    "distinct",
    "email",
    "filled",
    "in",
    "in_array",
    "integer",
    "ip",
    "ipv4",
    "ipv6",
    "json",
    "max",
    "min",
    "not_in",
    "not_regex",
    "numeric",
    "present",
    "regex",
    "required",
    "required_if",
    "required_unless",
    "required_with",
    "required_with_all",
    "required_without",
    "required_without_all",
    "same",
    "size",
    "starts_with",
    "string",
    "url",
    "uuid",
];

fn require_params(
    rule: &str,
    params: &[String],
    required: usize,
) -> std::result::Result<(), RuleDefinitionError> {
    if params.len() < required {
        return Err(RuleDefinitionError::MissingParameter {
            rule: rule.to_string(),
            required,
            given: params.len(),
        });
    }
    Ok(())
}

fn numeric_param(rule: &str, value: &str) -> std::result::Result<f64, RuleDefinitionError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| RuleDefinitionError::InvalidParameter {
            rule: rule.to_string(),
            value: value.to_string(),
            expected: "numeric".to_string(),
        })
}

fn count_param(rule: &str, value: &str) -> std::result::Result<usize, RuleDefinitionError> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| RuleDefinitionError::InvalidParameter {
            rule: rule.to_string(),
            value: value.to_string(),
            expected: "non-negative integer".to_string(),
        })
}

/// The parser splits on `,`, so a pattern that contained commas arrives in
/// pieces and is joined back here.
fn regex_param(rule: &str, params: &[String]) -> std::result::Result<Regex, RuleDefinitionError> {
    let pattern = params.join(",");
    Regex::new(&pattern).map_err(|_| RuleDefinitionError::InvalidParameter {
        rule: rule.to_string(),
        value: pattern.clone(),
        expected: "a valid regular expression".to_string(),
    })
}
