//! Typed validators for one positional value.
//!
//! A validator either accepts a value (possibly coercing it) or rejects it
//! with structured `Issue`s. Loose validators are accepted by slots
//! unconditionally and make a match non-exact.

mod builtin;

use std::fmt;
use std::sync::Arc;

use affirm_diagnostic::Issue;
use affirm_value::Value;
use futures::future::{self, BoxFuture};

/// Validation result: the accepted (possibly coerced) value, or the issues.
pub type Validation = Result<Value, Vec<Issue>>;

/// Trait implemented by every validator.
pub trait Validate: Send + Sync {
    /// Short description used in definition names and messages (`number`).
    fn describe(&self) -> String;

    /// Validate synchronously.
    fn validate(&self, value: &Value) -> Validation;

    /// Loose validators accept anything and never count toward an exact match.
    fn is_loose(&self) -> bool {
        false
    }

    /// Whether validation must suspend. Async validators can only be
    /// matched through `parse_values_async`.
    fn is_async(&self) -> bool {
        false
    }

    /// Validate, possibly suspending.
    fn validate_async(&self, value: Value) -> BoxFuture<'static, Validation> {
        Box::pin(future::ready(self.validate(&value)))
    }
}

/// Shared handle to a validator.
#[derive(Clone)]
pub struct Validator(Arc<dyn Validate>);

impl Validator {
    pub fn new(validator: impl Validate + 'static) -> Self {
        Validator(Arc::new(validator))
    }

    pub fn describe(&self) -> String {
        self.0.describe()
    }

    pub fn validate(&self, value: &Value) -> Validation {
        self.0.validate(value)
    }

    pub fn is_loose(&self) -> bool {
        self.0.is_loose()
    }

    pub fn is_async(&self) -> bool {
        self.0.is_async()
    }

    pub fn validate_async(&self, value: Value) -> BoxFuture<'static, Validation> {
        self.0.validate_async(value)
    }

    /// Whether `value` is accepted, ignoring coercion.
    pub fn accepts(&self, value: &Value) -> bool {
        self.validate(value).is_ok()
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validator({})", self.describe())
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
