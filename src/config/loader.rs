// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration loading.

use crate::error::{ConfigError, FieldCheckError, Result};
use std::path::{Path, PathBuf};

use super::schema::ValidationConfig;

/// Configuration file names to search for, in order of priority.
pub const CONFIG_FILES: &[&str] = &["fieldcheck.toml", ".fieldcheck.toml", ".config/fieldcheck.toml"];

/// Find the configuration file in the current directory or parent directories.
pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    find_config_file_from(&current_dir)
}

/// Find the configuration file starting from a specific directory.
pub fn find_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        if let Some(found) = first_existing(&current) {
            return Some(found);
        }

        if !current.pop() {
            break;
        }
    }

    if let Some(found) = dirs::home_dir().and_then(|home| first_existing(&home)) {
        return Some(found);
    }

    // XDG config directory
    dirs::config_dir()
        .map(|dir| dir.join("fieldcheck").join("config.toml"))
        .filter(|path| path.exists())
}

fn first_existing(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Load configuration from the default locations.
pub fn load_config() -> Result<ValidationConfig> {
    match find_config_file() {
        Some(path) => load_config_from(&path),
        None => {
            tracing::debug!("No configuration file found, using an empty rule set");
            Ok(ValidationConfig::default())
        }
    }
}

/// Load configuration from a specific path.
pub fn load_config_from(path: &Path) -> Result<ValidationConfig> {
    tracing::debug!("Loading configuration from: {:?}", path);

    if !path.exists() {
        return Err(FieldCheckError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        FieldCheckError::Config(ConfigError::ParseError {
            message: format!("Failed to read config file: {}", e),
        })
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<ValidationConfig> {
    toml::from_str(content).map_err(|e| {
        FieldCheckError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })
}
