// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines the structure of a fieldcheck.toml rule file.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::rules::RuleSpec;

/// Rules, messages and aliases for one validation.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ValidationConfig {
    /// Rules per field, in validation order.
    pub rules: IndexMap<String, RuleSpec>,

    /// Custom message templates: field to rule name to template.
    pub messages: HashMap<String, HashMap<String, String>>,

    /// Display names for fields.
    pub aliases: HashMap<String, String>,
}

impl ValidationConfig {
    /// Load configuration from the default locations.
    pub fn load() -> crate::error::Result<Self> {
        super::loader::load_config()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &std::path::Path) -> crate::error::Result<Self> {
        super::loader::load_config_from(path)
    }
}
