// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule parsing, dispatch, and message rendering.
//!
//! This module turns rule strings such as `"bail|required|min:3"` into
//! descriptors, resolves them against the built-in rule table, and renders
//! the messages of rules that fail.

mod builtin;
mod checker;
mod message;
mod parser;
mod rule;

pub use builtin::{canonical_name, BuiltinRule, SUPPORTED_RULES};
pub use checker::{is_present, size, RuleValidator};
pub use message::{
    custom_message_key, default_message, FailedRule, RuleError, DEFAULT_MESSAGES,
    FALLBACK_MESSAGE,
};
pub use parser::{Descriptor, RuleEntry, RuleParser, RuleSpec};
pub use rule::Rule;
