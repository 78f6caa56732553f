//! Stable serializable failure snapshots.
//!
//! External snapshot adapters receive a `FailureReport` rather than the
//! live failure record: formatter closures are resolved away and the diff
//! is rendered without colors, so the shape is stable across runs.

use affirm_value::Value;
use serde::Serialize;

use crate::{format_failure_with, AssertionFailure, ColorMode, DiffOptions, ErrorCode, Issue};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FailureReport {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<Issue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl FailureReport {
    /// Snapshot a failure.
    pub fn new(
        code: ErrorCode,
        message: impl Into<String>,
        failure: &AssertionFailure,
        location: Option<String>,
    ) -> Self {
        let plain = failure
            .diff_options
            .clone()
            .unwrap_or_default()
            .with_color(ColorMode::Never);
        FailureReport {
            code: code.as_str(),
            message: message.into(),
            actual: failure.actual.clone(),
            expected: failure.expected.clone(),
            diff: format_failure_with(
                &AssertionFailure {
                    diff_options: Some(plain),
                    ..failure.clone()
                },
                &DiffOptions::default(),
            ),
            issues: failure.issues.clone(),
            location,
        }
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests;
