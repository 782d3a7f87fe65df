// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Terminal and JSON rendering of validation results.

use console::style;
use indexmap::IndexMap;

use super::args::OutputFormat;

/// Result of validating one document.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// Name of the validated input.
    pub source: String,
    /// Messages per failed field.
    pub errors: IndexMap<String, Vec<String>>,
}

impl ValidationReport {
    /// Create a report.
    pub fn new(source: impl Into<String>, errors: IndexMap<String, Vec<String>>) -> Self {
        Self {
            source: source.into(),
            errors,
        }
    }

    /// Check if the validation passed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total number of messages.
    pub fn issue_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    /// Print the result to stdout.
    pub fn print(&self, format: Option<OutputFormat>) {
        match format {
            Some(OutputFormat::Json) => println!("{}", self.to_json()),
            _ => print!("{}", self.format_text()),
        }
    }

    /// Render as text, one line per message.
    pub fn format_text(&self) -> String {
        let mut output = String::new();

        let status = if self.is_valid() {
            style("✓").green().bold()
        } else {
            style("✗").red().bold()
        };
        output.push_str(&format!(
            "{} {} {}\n",
            status,
            style(&self.source).cyan(),
            self.summary()
        ));

        for (field, messages) in &self.errors {
            for message in messages {
                output.push_str(&format!(
                    "  {} {}\n",
                    style(field).red(),
                    message
                ));
            }
        }

        output
    }

    /// Render as pretty JSON.
    pub fn to_json(&self) -> String {
        let json = serde_json::json!({
            "source": self.source,
            "valid": self.is_valid(),
            "errors": self.errors,
        });

        serde_json::to_string_pretty(&json).unwrap_or_default()
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        if self.is_valid() {
            "Valid".to_string()
        } else {
            format!(
                "Invalid ({} errors in {} fields)",
                self.issue_count(),
                self.errors.len()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failing_report() -> ValidationReport {
        let mut errors = IndexMap::new();
        errors.insert(
            "email".to_string(),
            vec![
                "The email field is required.".to_string(),
                "The email must be a valid email address.".to_string(),
            ],
        );
        ValidationReport::new("data.json", errors)
    }

    #[test]
    fn test_valid_report() {
        let report = ValidationReport::new("data.json", IndexMap::new());
        assert!(report.is_valid());
        assert_eq!(report.issue_count(), 0);
        assert_eq!(report.summary(), "Valid");
    }

    #[test]
    fn test_invalid_report_summary() {
        let report = failing_report();
        assert!(!report.is_valid());
        assert_eq!(report.summary(), "Invalid (2 errors in 1 fields)");
    }

    #[test]
    fn test_format_text_lists_messages() {
        let text = failing_report().format_text();
        assert!(text.contains("data.json"));
        assert!(text.contains("The email field is required."));
        assert!(text.contains("valid email address"));
    }

    #[test]
    fn test_to_json() {
        let json: serde_json::Value = serde_json::from_str(&failing_report().to_json()).unwrap();
        assert_eq!(json["valid"], false);
        assert_eq!(json["errors"]["email"][1], "The email must be a valid email address.");
    }
}
