//! Thrown errors.

use affirm_value::Value;

use super::{arity, fail, outcome, project, reason_text};
use crate::{AssertError, AssertionFailure, Definition, DefinitionError, Outcome, Validator};

/// Call the subject with no arguments; the thrown value, if any.
fn call(subject: &Value) -> Result<Option<Value>, AssertError> {
    let function = subject
        .as_function()
        .ok_or_else(|| AssertError::internal("function slot received a non-function"))?;
    Ok(function.call(&[]).err())
}

fn did_not_throw(subject: &Value) -> Outcome {
    fail(format!("expected {subject} to throw"))
}

pub(super) fn definitions() -> Result<Vec<Definition>, DefinitionError> {
    Ok(vec![
        Definition::predicate(&[Validator::function().into(), "to throw".into()], |values| {
            let [subject] = arity(values)?;
            Ok(match call(subject)? {
                Some(_) => Outcome::Pass,
                None => did_not_throw(subject),
            })
        })?,
        Definition::predicate(
            &[
                Validator::function().into(),
                "to throw".into(),
                Validator::string().into(),
            ],
            |values| {
                let [subject, expected] = arity(values)?;
                let expected_text = expected.as_str().unwrap_or_default();
                Ok(match call(subject)? {
                    None => did_not_throw(subject),
                    Some(thrown) => {
                        let message = reason_text(&thrown);
                        outcome(message.contains(expected_text), || {
                            AssertionFailure::mismatch(Value::string(message.clone()), expected.clone())
                                .with_message(format!(
                                    "expected {subject} to throw an error containing {expected}, but it threw {thrown}"
                                ))
                        })
                    }
                })
            },
        )?,
        Definition::predicate(
            &[
                Validator::function().into(),
                "to throw error satisfying".into(),
                Validator::map().into(),
            ],
            |values| {
                let [subject, shape] = arity(values)?;
                Ok(match call(subject)? {
                    None => did_not_throw(subject),
                    Some(thrown) => {
                        let shape_for_diff = shape.clone();
                        outcome(thrown.satisfies(shape), || {
                            AssertionFailure::mismatch(thrown.clone(), shape.clone())
                                .with_message(format!(
                                    "expected {subject} to throw an error satisfying {shape}, but it threw {thrown}"
                                ))
                                .with_format_actual(move |actual| project(actual, &shape_for_diff))
                        })
                    }
                })
            },
        )?,
    ])
}
