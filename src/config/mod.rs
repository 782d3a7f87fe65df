// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for fieldcheck.
//!
//! This module handles finding, loading and parsing TOML rule files that
//! hold rules, custom messages and aliases.

pub mod default;
mod loader;
mod schema;

pub use default::{default_config, example_config};
pub use loader::{
    find_config_file, find_config_file_from, load_config, load_config_from, parse_config,
    CONFIG_FILES,
};
pub use schema::*;
