//! Built-in validators.

use std::future::Future;
use std::sync::Arc;

use affirm_diagnostic::Issue;
use affirm_value::Value;
use futures::future::BoxFuture;

use super::{Validate, Validation, Validator};

type CheckFn = dyn Fn(&Value) -> Validation + Send + Sync;
type AsyncCheckFn = dyn Fn(Value) -> BoxFuture<'static, bool> + Send + Sync;

/// Keys accepted by the async timing options object.
const OPTION_KEYS: &[&str] = &["within"];

struct FnValidator {
    description: String,
    check: Arc<CheckFn>,
    loose: bool,
}

impl Validate for FnValidator {
    fn describe(&self) -> String {
        self.description.clone()
    }

    fn validate(&self, value: &Value) -> Validation {
        (self.check)(value)
    }

    fn is_loose(&self) -> bool {
        self.loose
    }
}

struct AsyncFnValidator {
    description: String,
    check: Arc<AsyncCheckFn>,
}

impl Validate for AsyncFnValidator {
    fn describe(&self) -> String {
        self.description.clone()
    }

    fn validate(&self, _value: &Value) -> Validation {
        Err(vec![Issue::new(format!(
            "{} requires asynchronous validation",
            self.description
        ))])
    }

    fn is_async(&self) -> bool {
        true
    }

    fn validate_async(&self, value: Value) -> BoxFuture<'static, Validation> {
        let check = Arc::clone(&self.check);
        let description = self.description.clone();
        Box::pin(async move {
            if check(value.clone()).await {
                Ok(value)
            } else {
                Err(vec![Issue::new(format!("expected {description}"))])
            }
        })
    }
}

/// The standard rejection: "expected number, received string "abc"".
fn rejected(expected: &str, value: &Value) -> Vec<Issue> {
    vec![Issue::new(format!(
        "expected {expected}, received {} {value}",
        value.type_name()
    ))]
}

fn accept_if(description: &str, value: &Value, accepted: bool) -> Validation {
    if accepted {
        Ok(value.clone())
    } else {
        Err(rejected(description, value))
    }
}

impl Validator {
    fn from_fn<F>(description: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Value) -> Validation + Send + Sync + 'static,
    {
        Validator::new(FnValidator {
            description: description.into(),
            check: Arc::new(check),
            loose: false,
        })
    }

    /// A strict validator accepting values for which `check` holds.
    fn when<F>(description: &'static str, check: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Validator::from_fn(description, move |value| {
            accept_if(description, value, check(value))
        })
    }

    /// Loose validator for intentionally untyped positions.
    pub fn unknown() -> Self {
        Validator::new(FnValidator {
            description: "unknown".to_string(),
            check: Arc::new(|value: &Value| -> Validation { Ok(value.clone()) }),
            loose: true,
        })
    }

    /// Strict validator accepting every value.
    pub fn any() -> Self {
        Validator::when("any", |_| true)
    }

    pub fn number() -> Self {
        Validator::when("number", |v| matches!(v, Value::Int(_) | Value::Float(_)))
    }

    pub fn int() -> Self {
        Validator::when("integer", |v| matches!(v, Value::Int(_)))
    }

    pub fn non_negative_int() -> Self {
        Validator::when("non-negative integer", |v| {
            matches!(v, Value::Int(n) if *n >= 0)
        })
    }

    pub fn finite() -> Self {
        Validator::when("finite number", |v| {
            v.as_number().is_some_and(f64::is_finite)
        })
    }

    pub fn string() -> Self {
        Validator::when("string", |v| matches!(v, Value::Str(_)))
    }

    pub fn non_empty_string() -> Self {
        Validator::when("non-empty string", |v| {
            v.as_str().is_some_and(|s| !s.is_empty())
        })
    }

    pub fn boolean() -> Self {
        Validator::when("boolean", |v| matches!(v, Value::Bool(_)))
    }

    pub fn list() -> Self {
        Validator::when("list", |v| matches!(v, Value::List(_)))
    }

    /// A list whose every item is accepted by `item`. Items are coerced.
    pub fn list_of(item: Validator) -> Self {
        let description = format!("list of {}", item.describe());
        Validator::from_fn(description.clone(), move |value| {
            let Some(items) = value.as_list() else {
                return Err(rejected(&description, value));
            };
            let mut accepted = Vec::with_capacity(items.len());
            let mut issues = Vec::new();
            for (index, entry) in items.iter().enumerate() {
                match item.validate(entry) {
                    Ok(v) => accepted.push(v),
                    Err(errs) => {
                        issues.extend(errs.into_iter().map(|i| i.under(index.to_string())));
                    }
                }
            }
            if issues.is_empty() {
                Ok(Value::list(accepted))
            } else {
                Err(issues)
            }
        })
    }

    pub fn map() -> Self {
        Validator::when("map", |v| matches!(v, Value::Map(_)))
    }

    pub fn function() -> Self {
        Validator::when("function", |v| matches!(v, Value::Function(_)))
    }

    pub fn emitter() -> Self {
        Validator::when("emitter", |v| matches!(v, Value::Emitter(_)))
    }

    pub fn pending() -> Self {
        Validator::when("pending", |v| matches!(v, Value::Pending(_)))
    }

    /// A pending value, or a function returning one when called.
    pub fn pending_like() -> Self {
        Validator::when("pending or function", |v| {
            matches!(v, Value::Pending(_) | Value::Function(_))
        })
    }

    pub fn null() -> Self {
        Validator::when("null", |v| matches!(v, Value::Null))
    }

    pub fn error() -> Self {
        Validator::when("error", |v| matches!(v, Value::Error(_)))
    }

    /// Exactly `expected`, by structural equality.
    pub fn literal(expected: impl Into<Value>) -> Self {
        let expected = expected.into();
        let description = expected.to_string();
        Validator::from_fn(description.clone(), move |value| {
            accept_if(&description, value, value.equals(&expected))
        })
    }

    /// Any one of `options`, by structural equality.
    pub fn one_of(options: Vec<Value>) -> Self {
        let description = format!(
            "one of [{}]",
            options
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );
        Validator::from_fn(description.clone(), move |value| {
            accept_if(&description, value, options.iter().any(|o| value.equals(o)))
        })
    }

    /// Async timing options: `{ within: <milliseconds> }`.
    pub fn options() -> Self {
        Validator::from_fn("options", |value| {
            let Some(map) = value.as_map() else {
                return Err(rejected("options", value));
            };
            let mut issues = Vec::new();
            for (key, entry) in map {
                if !OPTION_KEYS.contains(&key.as_str()) {
                    issues.push(Issue::at(vec![key.clone()], "unknown option"));
                } else if !matches!(entry, Value::Int(n) if *n >= 0) {
                    issues.push(Issue::at(
                        vec![key.clone()],
                        format!("expected non-negative integer, received {entry}"),
                    ));
                }
            }
            if issues.is_empty() {
                Ok(value.clone())
            } else {
                Err(issues)
            }
        })
    }

    /// A strict validator from a predicate.
    pub fn custom<F>(description: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        let description = description.into();
        Validator::from_fn(description.clone(), move |value| {
            accept_if(&description, value, check(value))
        })
    }

    /// A strict validator that may replace the value it accepts.
    ///
    /// `convert` returns `None` to reject.
    pub fn coerce<F>(description: impl Into<String>, convert: F) -> Self
    where
        F: Fn(&Value) -> Option<Value> + Send + Sync + 'static,
    {
        let description = description.into();
        Validator::from_fn(description.clone(), move |value| {
            convert(value).ok_or_else(|| rejected(&description, value))
        })
    }

    /// A validator whose check suspends.
    pub fn async_custom<F, Fut>(description: impl Into<String>, check: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        Validator::new(AsyncFnValidator {
            description: description.into(),
            check: Arc::new(move |value: Value| -> BoxFuture<'static, bool> {
                Box::pin(check(value))
            }),
        })
    }
}
