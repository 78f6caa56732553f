//! The record a failed check produces.

use std::fmt;
use std::sync::Arc;

use affirm_value::Value;
use serde::Serialize;

use crate::DiffOptions;

/// Maps a value to the value that should be shown in the diff.
pub type ValueFormatter = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// One structured complaint from a validator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Path into the validated value (`["user", "age"]`); empty for the root.
    pub path: Vec<String>,
    pub message: String,
}

impl Issue {
    pub fn new(message: impl Into<String>) -> Self {
        Issue {
            path: Vec::new(),
            message: message.into(),
        }
    }

    pub fn at(path: Vec<String>, message: impl Into<String>) -> Self {
        Issue {
            path,
            message: message.into(),
        }
    }

    /// Nest this issue under a parent segment.
    #[must_use]
    pub fn under(mut self, segment: impl Into<String>) -> Self {
        self.path.insert(0, segment.into());
        self
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "at {}: {}", self.path.join("."), self.message)
        }
    }
}

/// Outcome data of a failed check.
///
/// Constructed by the executor (or returned by a predicate) and rendered
/// immediately; it has no lifecycle of its own.
#[derive(Clone, Default)]
pub struct AssertionFailure {
    pub actual: Option<Value>,
    pub expected: Option<Value>,
    /// Precomputed diff. When present it is shown verbatim.
    pub diff: Option<String>,
    pub format_actual: Option<ValueFormatter>,
    pub format_expected: Option<ValueFormatter>,
    pub diff_options: Option<DiffOptions>,
    pub message: Option<String>,
    pub issues: Vec<Issue>,
}

impl AssertionFailure {
    pub fn new() -> Self {
        Self::default()
    }

    /// A failure comparing `actual` against `expected`.
    pub fn mismatch(actual: impl Into<Value>, expected: impl Into<Value>) -> Self {
        AssertionFailure {
            actual: Some(actual.into()),
            expected: Some(expected.into()),
            ..Self::default()
        }
    }

    /// A failure with only a message.
    pub fn message(message: impl Into<String>) -> Self {
        AssertionFailure {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_actual(mut self, actual: impl Into<Value>) -> Self {
        self.actual = Some(actual.into());
        self
    }

    #[must_use]
    pub fn with_expected(mut self, expected: impl Into<Value>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    #[must_use]
    pub fn with_diff(mut self, diff: impl Into<String>) -> Self {
        self.diff = Some(diff.into());
        self
    }

    #[must_use]
    pub fn with_format_actual<F>(mut self, format: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.format_actual = Some(Arc::new(format));
        self
    }

    #[must_use]
    pub fn with_format_expected<F>(mut self, format: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.format_expected = Some(Arc::new(format));
        self
    }

    #[must_use]
    pub fn with_diff_options(mut self, options: DiffOptions) -> Self {
        self.diff_options = Some(options);
        self
    }

    #[must_use]
    pub fn with_issues(mut self, issues: Vec<Issue>) -> Self {
        self.issues = issues;
        self
    }

    /// Whether actual or expected data is attached.
    pub fn has_values(&self) -> bool {
        self.actual.is_some() || self.expected.is_some()
    }
}

impl fmt::Debug for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssertionFailure")
            .field("actual", &self.actual)
            .field("expected", &self.expected)
            .field("diff", &self.diff)
            .field("format_actual", &self.format_actual.is_some())
            .field("format_expected", &self.format_expected.is_some())
            .field("diff_options", &self.diff_options)
            .field("message", &self.message)
            .field("issues", &self.issues)
            .finish()
    }
}

#[cfg(test)]
mod tests;
