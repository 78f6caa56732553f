//! Strict and structural equality.

use super::{arity, outcome};
use crate::{AssertionFailure, Definition, DefinitionError, Validator};

pub(super) fn definitions() -> Result<Vec<Definition>, DefinitionError> {
    Ok(vec![
        Definition::predicate(
            &[["to be", "to strictly equal"].into(), Validator::any().into()],
            |values| {
                let [actual, expected] = arity(values)?;
                Ok(outcome(actual.same(expected), || {
                    let message = if actual.equals(expected) {
                        format!(
                            "expected {actual} to be {expected}; the values are equal but not the same instance, use \"to equal\""
                        )
                    } else {
                        format!("expected {actual} to be {expected}")
                    };
                    AssertionFailure::mismatch(actual.clone(), expected.clone())
                        .with_message(message)
                }))
            },
        )?,
        Definition::predicate(
            &[["to equal", "to deep equal"].into(), Validator::any().into()],
            |values| {
                let [actual, expected] = arity(values)?;
                Ok(outcome(actual.equals(expected), || {
                    AssertionFailure::mismatch(actual.clone(), expected.clone())
                        .with_message(format!("expected {actual} to equal {expected}"))
                }))
            },
        )?,
        Definition::predicate(
            &["to be one of".into(), Validator::list().into()],
            |values| {
                let [actual, list] = arity(values)?;
                let options = list.as_list().unwrap_or_default();
                Ok(outcome(options.iter().any(|o| actual.equals(o)), || {
                    AssertionFailure::message(format!("expected {actual} to be one of {list}"))
                }))
            },
        )?,
    ])
}
