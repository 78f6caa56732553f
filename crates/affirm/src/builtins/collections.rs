//! List and map checks.

use affirm_diagnostic::Issue;
use affirm_value::Value;

use super::{arity, length, outcome, project};
use crate::{
    AssertError, AssertionFailure, Definition, DefinitionError, Outcome, Registry, Validator,
};

/// Run a nested phrase against every item of a list.
///
/// `values` is `[list, phrase, args…]`; each item is checked as
/// `expect(item, phrase, args…)` against the registry that dispatched the
/// outer call, so extended vocabulary and negated phrases work per item.
fn items_satisfying(values: &[Value], registry: &Registry) -> Result<Outcome, AssertError> {
    let Some((subject, rest)) = values.split_first() else {
        return Err(AssertError::internal("items check received no subject"));
    };
    let items = subject.as_list().unwrap_or_default();

    let mut issues = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let mut call = Vec::with_capacity(rest.len() + 1);
        call.push(item.clone());
        call.extend(rest.iter().cloned());
        match registry.expect(&call) {
            Ok(()) => {}
            Err(AssertError::Failure(failure)) => {
                issues.push(Issue::at(vec![index.to_string()], failure.message()));
            }
            Err(AssertError::Negated(negated)) => {
                issues.push(Issue::at(vec![index.to_string()], negated.to_string()));
            }
            Err(e) => return Err(e),
        }
    }

    let phrase = rest.first().map(ToString::to_string).unwrap_or_default();
    Ok(outcome(issues.is_empty(), || {
        AssertionFailure::message(format!(
            "expected every item of {subject} to satisfy {phrase}"
        ))
        .with_issues(issues)
    }))
}

fn has_length(values: &[Value]) -> Result<Outcome, AssertError> {
    let [subject, expected] = arity(values)?;
    let actual = length(subject);
    Ok(outcome(actual.equals(expected), || {
        AssertionFailure::mismatch(actual.clone(), expected.clone()).with_message(format!(
            "expected {subject} to have length {expected}, received {actual}"
        ))
    }))
}

fn is_empty(values: &[Value]) -> Result<Outcome, AssertError> {
    let [subject] = arity(values)?;
    Ok(outcome(subject.len() == Some(0), || {
        AssertionFailure::message(format!("expected {subject} to be empty"))
    }))
}

pub(super) fn definitions() -> Result<Vec<Definition>, DefinitionError> {
    Ok(vec![
        Definition::predicate(
            &[
                Validator::list().into(),
                ["to contain", "to include"].into(),
                Validator::any().into(),
            ],
            |values| {
                let [subject, needle] = arity(values)?;
                let items = subject.as_list().unwrap_or_default();
                Ok(outcome(items.iter().any(|item| item.equals(needle)), || {
                    AssertionFailure::message(format!("expected {subject} to contain {needle}"))
                }))
            },
        )?,
        Definition::predicate(
            &[
                Validator::list().into(),
                "to have length".into(),
                Validator::non_negative_int().into(),
            ],
            has_length,
        )?,
        Definition::predicate(
            &[
                Validator::map().into(),
                "to have length".into(),
                Validator::non_negative_int().into(),
            ],
            has_length,
        )?,
        Definition::predicate(&[Validator::list().into(), "to be empty".into()], is_empty)?,
        Definition::predicate(&[Validator::map().into(), "to be empty".into()], is_empty)?,
        Definition::delegating_predicate(
            &[
                Validator::list().into(),
                "to have items satisfying".into(),
                Validator::non_empty_string().into(),
            ],
            items_satisfying,
        )?,
        Definition::delegating_predicate(
            &[
                Validator::list().into(),
                "to have items satisfying".into(),
                Validator::non_empty_string().into(),
                Validator::any().into(),
            ],
            items_satisfying,
        )?,
        Definition::predicate(
            &[
                Validator::map().into(),
                ["to have key", "to have property"].into(),
                Validator::string().into(),
            ],
            |values| {
                let [subject, key] = arity(values)?;
                let present = match (subject.as_map(), key.as_str()) {
                    (Some(map), Some(key)) => map.contains_key(key),
                    _ => false,
                };
                Ok(outcome(present, || {
                    AssertionFailure::message(format!("expected {subject} to have key {key}"))
                }))
            },
        )?,
        Definition::predicate(
            &[
                Validator::map().into(),
                "to have keys".into(),
                Validator::list_of(Validator::string()).into(),
            ],
            |values| {
                let [subject, keys] = arity(values)?;
                let map = subject.as_map();
                let missing: Vec<Value> = keys
                    .as_list()
                    .unwrap_or_default()
                    .iter()
                    .filter(|key| {
                        let key = key.as_str().unwrap_or_default();
                        !map.is_some_and(|m| m.contains_key(key))
                    })
                    .cloned()
                    .collect();
                Ok(outcome(missing.is_empty(), || {
                    AssertionFailure::message(format!(
                        "expected {subject} to have keys {keys}, missing {}",
                        Value::list(missing)
                    ))
                }))
            },
        )?,
        Definition::predicate(
            &[
                Validator::any().into(),
                "to satisfy".into(),
                Validator::any().into(),
            ],
            |values| {
                let [subject, shape] = arity(values)?;
                let shape_for_diff = shape.clone();
                Ok(outcome(subject.satisfies(shape), || {
                    AssertionFailure::mismatch(subject.clone(), shape.clone())
                        .with_message(format!("expected {subject} to satisfy {shape}"))
                        .with_format_actual(move |actual| project(actual, &shape_for_diff))
                }))
            },
        )?,
    ])
}
