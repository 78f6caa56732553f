//! Diagnostic layer for assertion failures.
//!
//! - `AssertionFailure` is the record a failed check produces: actual,
//!   expected, optional precomputed diff, optional per-value formatters,
//!   diff options, message and validation issues.
//! - `format_failure` renders it into a human-readable diff, or `None`
//!   when there is nothing to show.
//! - `ErrorCode` gives every error kind a searchable code.
//! - `FailureReport` is the stable serializable snapshot handed to
//!   external adapters.

mod diff;
mod error_code;
mod failure;
mod format;
mod report;

pub use diff::{diff_text, diff_values, ColorMode, DiffOptions};
pub use error_code::ErrorCode;
pub use failure::{AssertionFailure, Issue, ValueFormatter};
pub use format::{format_failure, format_failure_with};
pub use report::FailureReport;
