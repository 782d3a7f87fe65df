// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Default configuration values.

use super::schema::ValidationConfig;

/// Get the default configuration.
pub fn default_config() -> ValidationConfig {
    ValidationConfig::default()
}

/// Generate an example configuration file.
pub fn example_config() -> &'static str {
    r#"# fieldcheck rule file
# Author: Eshan Roy
# SPDX-License-Identifier: MIT

# Rules per field, checked in the order written here.
# A rule list may be one pipe-delimited string or an array of rules.
# After `bail`, the first failure stops the remaining rules of that field.
[rules]
name = "required|string|between:2,64"
email = "bail|required|email"
password = ["required", "min:8", "confirm"]
age = "integer|min:18"
role = "required|in:admin,editor,viewer"
company = "required_if:account_type,business"

# Custom messages per field and rule.
# :attribute is the field name (or alias); other :words take the rule
# parameters in order.
[messages.email]
required = "We need your :attribute to get in touch."

[messages.age]
min = "You must be at least :min years old."

# Display names used in place of field names.
[aliases]
email = "e-mail address"
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = default_config();
        assert!(config.rules.is_empty());
    }

    #[test]
    fn test_example_config_parseable() {
        let example = example_config();
        let config: ValidationConfig = toml::from_str(example).expect("Example config should parse");
        assert_eq!(config.rules.len(), 6);
        assert_eq!(config.aliases["email"], "e-mail address");
    }

    #[test]
    fn test_example_rules_resolve() {
        use crate::rules::{BuiltinRule, Descriptor, RuleParser};

        let config: ValidationConfig = toml::from_str(example_config()).unwrap();
        for spec in config.rules.values() {
            for descriptor in RuleParser::parse(spec) {
                if let Descriptor::Named { name, params } = &descriptor {
                    assert!(BuiltinRule::resolve(name, params).is_ok(), "{}", descriptor);
                }
            }
        }
    }
}
