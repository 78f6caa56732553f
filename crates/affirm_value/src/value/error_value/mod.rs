//! Thrown error values.
//!
//! `ErrorValue` is what a callable throws or a pending value rejects with
//! when the failure is an error object rather than an arbitrary value. It
//! carries a message, an error name (class-like tag such as `"TypeError"`)
//! and free-form properties that `to throw error satisfying` can match.

use std::collections::BTreeMap;
use std::fmt;

use crate::Value;

/// Default name given to errors created without one.
pub const DEFAULT_ERROR_NAME: &str = "Error";

/// An error object carried by `Value::Error`.
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorValue {
    name: String,
    message: String,
    props: BTreeMap<String, Value>,
}

impl ErrorValue {
    /// Create a generic `Error` with a message.
    #[inline]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            name: DEFAULT_ERROR_NAME.to_string(),
            message: message.into(),
            props: BTreeMap::new(),
        }
    }

    /// Create an error with an explicit name.
    pub fn named(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            props: BTreeMap::new(),
        }
    }

    /// Attach an extra property.
    #[must_use]
    pub fn with_prop(mut self, key: impl Into<String>, value: Value) -> Self {
        self.props.insert(key.into(), value);
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn props(&self) -> &BTreeMap<String, Value> {
        &self.props
    }

    /// View this error as a map with `name`, `message` and every property.
    ///
    /// Used when an error has to be compared against an object shape.
    pub fn to_map(&self) -> BTreeMap<String, Value> {
        let mut map = self.props.clone();
        map.insert("name".to_string(), Value::string(self.name.clone()));
        map.insert("message".to_string(), Value::string(self.message.clone()));
        map
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}: {}", self.name, self.message)
        }
    }
}
