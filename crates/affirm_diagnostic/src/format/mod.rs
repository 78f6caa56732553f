//! Failure formatting.

use affirm_value::Value;

use crate::{diff_values, AssertionFailure, DiffOptions};

/// Render a failure into a human-readable diff.
///
/// - A precomputed `diff` is returned verbatim; formatters are ignored.
/// - Otherwise `format_actual`/`format_expected` are applied, and `None`
///   is returned when the formatted values are identical, when their
///   renderings have the same lines (nothing to show), or when the failure
///   carries no values at all.
pub fn format_failure(failure: &AssertionFailure) -> Option<String> {
    format_failure_with(failure, &DiffOptions::default())
}

/// Like `format_failure`, using `defaults` when the failure carries no
/// diff options of its own.
pub fn format_failure_with(failure: &AssertionFailure, defaults: &DiffOptions) -> Option<String> {
    if let Some(diff) = &failure.diff {
        return Some(diff.clone());
    }
    if !failure.has_values() {
        return None;
    }

    let actual = failure.actual.clone().unwrap_or(Value::Void);
    let expected = failure.expected.clone().unwrap_or(Value::Void);
    let actual = match &failure.format_actual {
        Some(format) => format(&actual),
        None => actual,
    };
    let expected = match &failure.format_expected {
        Some(format) => format(&expected),
        None => expected,
    };

    if actual.same(&expected) || actual.equals(&expected) {
        return None;
    }

    let options = failure.diff_options.as_ref().unwrap_or(defaults);
    diff_values(&expected, &actual, options)
}

#[cfg(test)]
mod tests;
