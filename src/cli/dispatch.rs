// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use std::io::Read;

use console::style;

use crate::config::{example_config, ValidationConfig};
use crate::error::{ConfigError, FieldCheckError, Result, ResultExt};
use crate::rules::{
    BuiltinRule, Descriptor, RuleParser, RuleSpec, DEFAULT_MESSAGES, SUPPORTED_RULES,
};
use crate::validation::{ValidationException, Validator};

use super::args::{CheckArgs, Cli, Commands, InitArgs, OutputFormat, ParseArgs};
use super::report::ValidationReport;

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Check(args) => run_check(&cli, args),
        Commands::Parse(args) => run_parse(&cli, args),
        Commands::Messages => run_messages(&cli),
        Commands::Init(args) => run_init(args),
    }
}

/// Load the rule file named on the command line, or the nearest one.
fn load_config(cli: &Cli) -> Result<ValidationConfig> {
    match &cli.config {
        Some(path) => ValidationConfig::load_from(path),
        None => ValidationConfig::load(),
    }
}

/// Run the check command.
fn run_check(cli: &Cli, args: &CheckArgs) -> Result<()> {
    tracing::debug!("Running check command with args: {:?}", args);

    let mut config = load_config(cli)?;
    for (field, rules) in &args.rules {
        config
            .rules
            .insert(field.clone(), RuleSpec::Text(rules.clone()));
    }
    for (field, alias) in &args.aliases {
        config.aliases.insert(field.clone(), alias.clone());
    }

    let source = if args.data == "-" {
        "<stdin>".to_string()
    } else {
        args.data.clone()
    };
    let data: serde_json::Value = serde_json::from_str(&read_input(&args.data)?)?;

    let mut validator = match data {
        serde_json::Value::Object(map) => Validator::from_config(map, &config),
        other => Validator::from_value(other, config.rules.clone())?,
    };

    let passed = validator.passes()?;
    ValidationReport::new(source, validator.errors().clone()).print(cli.format);

    if passed {
        Ok(())
    } else {
        Err(ValidationException::from(&validator).into())
    }
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("reading standard input")?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(path).context(format!("reading {}", path))
    }
}

/// Run the parse command.
fn run_parse(cli: &Cli, args: &ParseArgs) -> Result<()> {
    tracing::debug!("Running parse command with args: {:?}", args);

    let descriptors = RuleParser::parse_str(&args.rules);

    match cli.format {
        Some(OutputFormat::Json) => {
            let json = serde_json::to_string_pretty(&descriptors)?;
            println!("{}", json);
        }
        _ => {
            for descriptor in &descriptors {
                println!("{}", describe(descriptor));
            }
        }
    }

    Ok(())
}

fn describe(descriptor: &Descriptor) -> String {
    match descriptor {
        Descriptor::Named { name, params } => match BuiltinRule::resolve(name, params) {
            Ok(_) => format!("{} {}", style("✓").green().bold(), descriptor),
            Err(e) => format!(
                "{} {} {}",
                style("✗").red().bold(),
                descriptor,
                style(format!("({})", e)).dim()
            ),
        },
        Descriptor::Custom(_) => descriptor.to_string(),
    }
}

/// Run the messages command.
fn run_messages(cli: &Cli) -> Result<()> {
    tracing::debug!("Running messages command");

    match cli.format {
        Some(OutputFormat::Json) => {
            let table: serde_json::Map<String, serde_json::Value> = DEFAULT_MESSAGES
                .iter()
                .map(|(rule, message)| {
                    (
                        rule.to_string(),
                        serde_json::json!({
                            "message": message,
                            "implemented": SUPPORTED_RULES.contains(rule),
                        }),
                    )
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&table)?);
        }
        _ => {
            for (rule, message) in DEFAULT_MESSAGES {
                let marker = if SUPPORTED_RULES.contains(rule) {
                    style("✓").green()
                } else {
                    style("-").dim()
                };
                println!("{} {:<22} {}", marker, rule, message);
            }
        }
    }

    Ok(())
}

/// Run the init command.
fn run_init(args: &InitArgs) -> Result<()> {
    tracing::debug!("Running init command with args: {:?}", args);

    if args.path.exists() && !args.force {
        return Err(FieldCheckError::Config(ConfigError::AlreadyExists {
            path: args.path.clone(),
        }));
    }

    std::fs::write(&args.path, example_config()).map_err(|e| FieldCheckError::WithContext {
        context: "init".to_string(),
        message: format!("Failed to write configuration: {}", e),
    })?;

    println!("✓ Created {}", args.path.display());

    Ok(())
}
