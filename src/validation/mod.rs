// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Field validation.
//!
//! The [`Validator`] runs the rules of every field, honoring `bail`, and
//! collects rendered messages per field. A failed run can be turned into a
//! [`ValidationException`] for upstream error handling.

mod exception;
mod validator;

pub use exception::{ValidationException, UNPROCESSABLE_STATUS};
pub use validator::Validator;
