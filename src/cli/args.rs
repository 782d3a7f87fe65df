// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// fieldcheck - declarative field validation
///
/// Validates JSON data against per-field rule strings.
#[derive(Parser, Debug)]
#[command(name = "fieldcheck")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Declarative field validation", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format for machine-readable output
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to a rule file (defaults to the nearest fieldcheck.toml)
    #[arg(short, long, global = true, env = "FIELDCHECK_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Output format for CI and scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default)
    Text,
    /// JSON output for machine parsing
    Json,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Validate a JSON document against the configured rules
    Check(CheckArgs),

    /// Show how a rule string is parsed
    Parse(ParseArgs),

    /// List the default message of every rule
    Messages,

    /// Write an example fieldcheck.toml
    Init(InitArgs),
}

/// Arguments for the check command.
#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    /// JSON file to validate ("-" reads standard input)
    #[arg(default_value = "-")]
    pub data: String,

    /// Add or replace the rules of a field, e.g. --rule 'email=required|email'
    #[arg(short, long = "rule", value_name = "FIELD=RULES", value_parser = parse_rule_arg)]
    pub rules: Vec<(String, String)>,

    /// Display name for a field, e.g. --alias 'email=e-mail address'
    #[arg(long = "alias", value_name = "FIELD=NAME", value_parser = parse_rule_arg)]
    pub aliases: Vec<(String, String)>,
}

/// Arguments for the parse command.
#[derive(Parser, Debug, Clone)]
pub struct ParseArgs {
    /// Rule string, e.g. "bail|required|between:1,10"
    pub rules: String,
}

/// Arguments for the init command.
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Where to write the file
    #[arg(long, default_value = "fieldcheck.toml")]
    pub path: PathBuf,
}

/// Parse a `KEY=VALUE` pair.
fn parse_rule_arg(arg: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{}'", arg))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing field name in '{}'", arg));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check() {
        let args = Cli::parse_from([
            "fieldcheck",
            "check",
            "data.json",
            "--rule",
            "email=required|email",
            "--alias",
            "email=e-mail",
        ]);
        if let Commands::Check(check_args) = args.command {
            assert_eq!(check_args.data, "data.json");
            assert_eq!(
                check_args.rules,
                vec![("email".to_string(), "required|email".to_string())]
            );
            assert_eq!(check_args.aliases[0].1, "e-mail");
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_check_reads_stdin_by_default() {
        let args = Cli::parse_from(["fieldcheck", "check"]);
        match args.command {
            Commands::Check(check_args) => assert_eq!(check_args.data, "-"),
            other => panic!("Expected Check command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rule_arg_rejects_missing_separator() {
        assert!(parse_rule_arg("email").is_err());
        assert!(parse_rule_arg("=required").is_err());
        assert_eq!(
            parse_rule_arg("age=min:18").unwrap(),
            ("age".to_string(), "min:18".to_string())
        );
    }

    #[test]
    fn test_global_flags() {
        let args = Cli::parse_from(["fieldcheck", "--debug", "--format", "json", "messages"]);
        assert!(args.debug);
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert!(matches!(args.command, Commands::Messages));
    }

    #[test]
    fn test_parse_init() {
        let args = Cli::parse_from(["fieldcheck", "init", "--force"]);
        match args.command {
            Commands::Init(init) => {
                assert!(init.force);
                assert_eq!(init.path, PathBuf::from("fieldcheck.toml"));
            }
            other => panic!("Expected Init command, got {:?}", other),
        }
    }
}
