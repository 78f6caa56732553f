//! Type checks, truthiness and number state.

use affirm_value::Value;

use super::{arity, fail, outcome};
use crate::{AssertionFailure, Definition, DefinitionError, Outcome, Validator};

/// Names accepted by `to be a <type>`.
const TYPE_NAMES: &[&str] = &[
    "string",
    "number",
    "integer",
    "boolean",
    "function",
    "list",
    "array",
    "map",
    "object",
    "null",
    "undefined",
    "error",
    "pending",
    "emitter",
];

fn is_type(value: &Value, name: &str) -> bool {
    match name {
        "number" => matches!(value, Value::Int(_) | Value::Float(_)),
        "array" => matches!(value, Value::List(_)),
        "object" => matches!(value, Value::Map(_)),
        other => value.type_name() == other,
    }
}

fn number_state(
    phrase: &'static str,
    holds: fn(f64) -> bool,
) -> Result<Definition, DefinitionError> {
    Definition::predicate(&[phrase.into()], move |values| {
        let [subject] = arity(values)?;
        Ok(match subject.as_number() {
            Some(n) => outcome(holds(n), || {
                AssertionFailure::message(format!("expected {subject} {phrase}"))
            }),
            None => fail(format!(
                "expected {subject} {phrase}, but it is not a number"
            )),
        })
    })
}

pub(super) fn definitions() -> Result<Vec<Definition>, DefinitionError> {
    Ok(vec![
        Definition::schema(&["to be a string".into()], Validator::string())?,
        Definition::schema(&["to be a number".into()], Validator::number())?,
        Definition::schema(&["to be an integer".into()], Validator::int())?,
        Definition::schema(&["to be a boolean".into()], Validator::boolean())?,
        Definition::schema(&["to be a function".into()], Validator::function())?,
        Definition::schema(&[["to be a list", "to be an array"].into()], Validator::list())?,
        Definition::schema(&[["to be a map", "to be an object"].into()], Validator::map())?,
        Definition::schema(&["to be null".into()], Validator::null())?,
        Definition::schema(
            &["to be undefined".into()],
            Validator::custom("undefined", |v| matches!(v, Value::Void)),
        )?,
        Definition::schema(
            &["to be defined".into()],
            Validator::custom("defined", |v| !matches!(v, Value::Void)),
        )?,
        Definition::schema(&["to be an error".into()], Validator::error())?,
        Definition::predicate(
            &[
                ["to be a", "to be an"].into(),
                Validator::one_of(TYPE_NAMES.iter().map(|name| Value::string(*name)).collect())
                    .into(),
            ],
            |values| {
                let [subject, name] = arity(values)?;
                let name = name.as_str().unwrap_or_default();
                Ok(outcome(is_type(subject, name), || {
                    AssertionFailure::message(format!(
                        "expected {subject} to be a {name}, received {}",
                        subject.type_name()
                    ))
                }))
            },
        )?,
        Definition::predicate(&["to be truthy".into()], |values| {
            let [subject] = arity(values)?;
            Ok(outcome(subject.is_truthy(), || {
                AssertionFailure::message(format!("expected {subject} to be truthy"))
            }))
        })?,
        Definition::predicate(&["to be falsy".into()], |values| {
            let [subject] = arity(values)?;
            Ok(outcome(!subject.is_truthy(), || {
                AssertionFailure::message(format!("expected {subject} to be falsy"))
            }))
        })?,
        Definition::predicate(&["to be NaN".into()], |values| {
            let [subject] = arity(values)?;
            Ok(if matches!(subject, Value::Float(f) if f.is_nan()) {
                Outcome::Pass
            } else {
                fail(format!("expected {subject} to be NaN"))
            })
        })?,
        number_state("to be finite", f64::is_finite)?,
        number_state("to be infinite", f64::is_infinite)?,
        number_state("to be positive", |n| n > 0.0)?,
        number_state("to be negative", |n| n < 0.0)?,
    ])
}
