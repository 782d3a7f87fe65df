// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule specification parsing.
//!
//! Rules for a field are written either as one delimited string
//! (`"bail|required|between:1,10"`) or as a list mixing rule strings and
//! custom [`Rule`] objects. Both forms normalize to the same ordered list
//! of [`Descriptor`]s. Parsing never fails: empty segments and repeated
//! delimiters are dropped.

use std::fmt;
use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::rule::Rule;

lazy_static! {
    /// One or more pipes separate rules.
    static ref RULE_SEPARATOR: Regex = Regex::new(r"\|+").unwrap();

    /// One or more colons or commas separate a rule name from its parameters.
    static ref PARAM_SEPARATOR: Regex = Regex::new(r"[:,]+").unwrap();
}

/// A single entry of a list-form rule specification.
#[derive(Debug, Clone)]
pub enum RuleEntry {
    /// A rule string such as `"min:3"`.
    Text(String),
    /// A user-defined rule.
    Custom(Arc<dyn Rule>),
}

impl RuleEntry {
    /// Wrap a custom rule.
    pub fn custom(rule: impl Rule + 'static) -> Self {
        RuleEntry::Custom(Arc::new(rule))
    }
}

impl From<&str> for RuleEntry {
    fn from(value: &str) -> Self {
        RuleEntry::Text(value.to_string())
    }
}

impl From<String> for RuleEntry {
    fn from(value: String) -> Self {
        RuleEntry::Text(value)
    }
}

impl From<Arc<dyn Rule>> for RuleEntry {
    fn from(value: Arc<dyn Rule>) -> Self {
        RuleEntry::Custom(value)
    }
}

impl PartialEq for RuleEntry {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RuleEntry::Text(a), RuleEntry::Text(b)) => a == b,
            (RuleEntry::Custom(a), RuleEntry::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// The rules attached to one field.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleSpec {
    /// Pipe-delimited rule string.
    Text(String),
    /// Ordered list of rule strings and custom rules.
    List(Vec<RuleEntry>),
}

impl From<&str> for RuleSpec {
    fn from(value: &str) -> Self {
        RuleSpec::Text(value.to_string())
    }
}

impl From<String> for RuleSpec {
    fn from(value: String) -> Self {
        RuleSpec::Text(value)
    }
}

impl From<Vec<RuleEntry>> for RuleSpec {
    fn from(value: Vec<RuleEntry>) -> Self {
        RuleSpec::List(value)
    }
}

impl From<Vec<&str>> for RuleSpec {
    fn from(value: Vec<&str>) -> Self {
        RuleSpec::List(value.into_iter().map(RuleEntry::from).collect())
    }
}

/// Shape of a rule specification in a configuration file. Custom rules
/// only exist in code, so files hold strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawRuleSpec {
    Text(String),
    List(Vec<String>),
}

impl<'de> Deserialize<'de> for RuleSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawRuleSpec::deserialize(deserializer)? {
            RawRuleSpec::Text(text) => RuleSpec::Text(text),
            RawRuleSpec::List(list) => {
                RuleSpec::List(list.into_iter().map(RuleEntry::Text).collect())
            }
        })
    }
}

impl Serialize for RuleSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RuleSpec::Text(text) => serializer.serialize_str(text),
            RuleSpec::List(list) => {
                let mut seq = serializer.serialize_seq(Some(list.len()))?;
                for entry in list {
                    match entry {
                        RuleEntry::Text(text) => seq.serialize_element(text)?,
                        RuleEntry::Custom(rule) => {
                            seq.serialize_element(&format!("custom:{}", rule.name()))?
                        }
                    }
                }
                seq.end()
            }
        }
    }
}

/// A normalized rule, ready for resolution and evaluation.
#[derive(Debug, Clone)]
pub enum Descriptor {
    /// A built-in rule name and its parameters.
    Named { name: String, params: Vec<String> },
    /// A user-defined rule.
    Custom(Arc<dyn Rule>),
}

impl Descriptor {
    /// Build a named descriptor from tokens. The first token is the name.
    pub fn named<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tokens = tokens.into_iter().map(Into::into);
        let name = tokens.next().unwrap_or_default();
        Descriptor::Named {
            name,
            params: tokens.collect(),
        }
    }

    /// The rule name (custom rules report their own name).
    pub fn name(&self) -> &str {
        match self {
            Descriptor::Named { name, .. } => name,
            Descriptor::Custom(rule) => rule.name(),
        }
    }

    /// The rule parameters. Custom rules have none.
    pub fn params(&self) -> &[String] {
        match self {
            Descriptor::Named { params, .. } => params,
            Descriptor::Custom(_) => &[],
        }
    }
}

impl PartialEq for Descriptor {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Descriptor::Named { name: a, params: pa },
                Descriptor::Named { name: b, params: pb },
            ) => a == b && pa == pb,
            (Descriptor::Custom(a), Descriptor::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Descriptor::Named { name, params } if params.is_empty() => write!(f, "{}", name),
            Descriptor::Named { name, params } => write!(f, "{}:{}", name, params.join(",")),
            Descriptor::Custom(rule) => write!(f, "<custom {}>", rule.name()),
        }
    }
}

impl Serialize for Descriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Descriptor::Named { name, params } => {
                let mut seq = serializer.serialize_seq(Some(params.len() + 1))?;
                seq.serialize_element(name)?;
                for param in params {
                    seq.serialize_element(param)?;
                }
                seq.end()
            }
            Descriptor::Custom(rule) => {
                let mut seq = serializer.serialize_seq(Some(1))?;
                seq.serialize_element(&format!("<custom {}>", rule.name()))?;
                seq.end()
            }
        }
    }
}

/// Parser turning rule specifications into descriptors.
pub struct RuleParser;

impl RuleParser {
    /// Parse a rule specification into an ordered list of descriptors.
    pub fn parse(spec: &RuleSpec) -> Vec<Descriptor> {
        match spec {
            RuleSpec::Text(text) => Self::parse_str(text),
            RuleSpec::List(entries) => entries.iter().filter_map(Self::parse_entry).collect(),
        }
    }

    /// Parse a pipe-delimited rule string.
    pub fn parse_str(rules: &str) -> Vec<Descriptor> {
        RULE_SEPARATOR
            .split(rules)
            .filter_map(Self::parse_rule_str)
            .collect()
    }

    fn parse_entry(entry: &RuleEntry) -> Option<Descriptor> {
        match entry {
            RuleEntry::Text(text) => Self::parse_rule_str(text),
            RuleEntry::Custom(rule) => Some(Descriptor::Custom(Arc::clone(rule))),
        }
    }

    /// Split `name:param1,param2` into a descriptor. Blank input yields none.
    fn parse_rule_str(rule: &str) -> Option<Descriptor> {
        if rule.trim().is_empty() {
            return None;
        }

        Some(Descriptor::named(
            PARAM_SEPARATOR.split(rule).map(|token| token.trim()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value};

    #[derive(Debug)]
    struct AlwaysPasses;

    impl Rule for AlwaysPasses {
        fn check(&self, _data: &Map<String, Value>, _field: &str) -> bool {
            true
        }

        fn error_message(&self) -> String {
            String::new()
        }
    }

    fn named(tokens: &[&str]) -> Descriptor {
        Descriptor::named(tokens.iter().copied())
    }

    #[test]
    fn test_parse_plain_string() {
        let result = RuleParser::parse(&"required|email".into());
        assert_eq!(result, vec![named(&["required"]), named(&["email"])]);
    }

    #[test]
    fn test_parse_drops_empty_segments() {
        let result = RuleParser::parse(&"||required| |email|".into());
        assert_eq!(result, vec![named(&["required"]), named(&["email"])]);
    }

    #[test]
    fn test_parse_parameters() {
        let result = RuleParser::parse(&"||required| |email|max_min:50,10".into());
        assert_eq!(
            result,
            vec![
                named(&["required"]),
                named(&["email"]),
                named(&["max_min", "50", "10"]),
            ]
        );
    }

    #[test]
    fn test_parse_collapses_parameter_delimiters() {
        let result = RuleParser::parse_str("between :: 1 ,, 10 ");
        assert_eq!(result, vec![named(&["between", "1", "10"])]);
    }

    #[test]
    fn test_parse_list_matches_string_form() {
        let from_list = RuleParser::parse(&vec!["required", "email", "", " ", "max_min:50,10"].into());
        let from_string = RuleParser::parse(&"required|email|max_min:50,10".into());
        assert_eq!(from_list, from_string);
    }

    #[test]
    fn test_parse_keeps_custom_rule_identity() {
        let rule: Arc<dyn Rule> = Arc::new(AlwaysPasses);
        let spec = RuleSpec::List(vec![
            "required".into(),
            "email".into(),
            "".into(),
            " ".into(),
            "max_min:50,10".into(),
            RuleEntry::Custom(Arc::clone(&rule)),
        ]);

        let result = RuleParser::parse(&spec);
        assert_eq!(result.len(), 4);
        assert_eq!(result[2], named(&["max_min", "50", "10"]));
        match &result[3] {
            Descriptor::Custom(parsed) => assert!(Arc::ptr_eq(parsed, &rule)),
            other => panic!("Expected custom descriptor, got {:?}", other),
        }
    }

    #[test]
    fn test_list_entries_are_not_pipe_split() {
        let result = RuleParser::parse(&vec!["required|email"].into());
        assert_eq!(result, vec![named(&["required|email"])]);
    }

    #[test]
    fn test_deserialize_rule_spec() {
        let spec: RuleSpec = serde_json::from_str(r#""required|min:3""#).unwrap();
        assert_eq!(spec, RuleSpec::Text("required|min:3".to_string()));

        let spec: RuleSpec = serde_json::from_str(r#"["required", "min:3"]"#).unwrap();
        assert_eq!(spec, RuleSpec::from(vec!["required", "min:3"]));
    }

    #[test]
    fn test_descriptor_display() {
        assert_eq!(named(&["required"]).to_string(), "required");
        assert_eq!(named(&["between", "1", "5"]).to_string(), "between:1,5");
    }

    #[test]
    fn test_descriptor_serializes_as_token_list() {
        let json = serde_json::to_string(&named(&["max_min", "50", "10"])).unwrap();
        assert_eq!(json, r#"["max_min","50","10"]"#);
    }
}
