//! Built-in assertion vocabulary.
//!
//! Sync definitions: types, truthiness, comparisons, equality, strings,
//! collections and thrown errors. Async definitions: pending values and
//! events. Registration order is significant: among fallback matches the
//! first registered definition wins.

mod collections;
mod comparison;
mod equality;
mod events;
mod functions;
mod promises;
mod strings;
mod types;

use std::time::Duration;

use affirm_diagnostic::AssertionFailure;
use affirm_value::Value;

use crate::{AssertError, Definition, DefinitionError, Outcome, Part, Validator};

/// Every built-in definition, in registration order.
pub(crate) fn definitions() -> Result<Vec<Definition>, DefinitionError> {
    let mut all = Vec::new();
    all.extend(types::definitions()?);
    all.extend(comparison::definitions()?);
    all.extend(equality::definitions()?);
    all.extend(strings::definitions()?);
    all.extend(collections::definitions()?);
    all.extend(functions::definitions()?);
    all.extend(promises::definitions()?);
    all.extend(events::definitions()?);
    Ok(all)
}

/// View the parsed values of a definition with a known number of values.
fn arity<const N: usize>(values: &[Value]) -> Result<&[Value; N], AssertError> {
    values.try_into().map_err(|_| {
        AssertError::internal(format!(
            "expected {N} parsed values, received {}",
            values.len()
        ))
    })
}

/// A failure carrying only a message.
fn fail(message: impl Into<String>) -> Outcome {
    Outcome::Failure(AssertionFailure::message(message))
}

fn outcome(passed: bool, failure: impl FnOnce() -> AssertionFailure) -> Outcome {
    if passed {
        Outcome::Pass
    } else {
        Outcome::Failure(failure())
    }
}

/// Length of a string, list or map as an integer value.
fn length(value: &Value) -> Value {
    let len = value.len().unwrap_or_default();
    Value::Int(i64::try_from(len).unwrap_or(i64::MAX))
}

/// `parts` followed by a trailing `{ within }` options object.
fn with_options(parts: &[Part]) -> Vec<Part> {
    let mut parts = parts.to_vec();
    parts.push(Validator::options().into());
    parts
}

/// The `within` option of the options object at `index`, if present.
fn timeout_at(values: &[Value], index: usize) -> Option<Duration> {
    let ms = values.get(index)?.as_map()?.get("within")?.as_int()?;
    u64::try_from(ms).ok().map(Duration::from_millis)
}

/// Text of a thrown or rejected value: an error's message, a string's
/// contents, otherwise the display form.
fn reason_text(reason: &Value) -> String {
    match reason {
        Value::Error(e) => e.message().to_string(),
        Value::Str(s) => s.as_str().to_string(),
        other => other.to_string(),
    }
}

/// `actual` restricted to the keys present in `shape`, so a partial match
/// diffs only what was asked for.
fn project(actual: &Value, shape: &Value) -> Value {
    match (actual, shape) {
        (Value::Map(actual), Value::Map(shape)) => Value::map(
            shape
                .iter()
                .filter_map(|(k, v)| actual.get(k).map(|a| (k.clone(), project(a, v))))
                .collect(),
        ),
        (Value::Error(actual), Value::Map(_)) => project(&Value::map(actual.to_map()), shape),
        (Value::List(actual), Value::List(shape)) if actual.len() == shape.len() => Value::list(
            actual
                .iter()
                .zip(shape.iter())
                .map(|(a, s)| project(a, s))
                .collect(),
        ),
        _ => actual.clone(),
    }
}
