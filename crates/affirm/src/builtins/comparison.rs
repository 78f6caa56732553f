//! Numeric comparisons.

use std::cmp::Ordering;

use affirm_value::Value;

use super::{arity, fail, outcome};
use crate::{AssertionFailure, Definition, DefinitionError, Outcome, Part, Validator};

/// Tolerance for `to be close to` without an explicit `within`.
const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Order two numbers; integers compare exactly. `None` involves NaN.
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        _ => a.as_number()?.partial_cmp(&b.as_number()?),
    }
}

fn not_a_number(subject: &Value) -> Outcome {
    fail(format!(
        "expected a number, received {} {subject}",
        subject.type_name()
    ))
}

fn comparison(
    phrases: Part,
    relation: &'static str,
    holds: fn(Ordering) -> bool,
) -> Result<Definition, DefinitionError> {
    Definition::predicate(&[phrases, Validator::number().into()], move |values| {
        let [subject, bound] = arity(values)?;
        if subject.as_number().is_none() {
            return Ok(not_a_number(subject));
        }
        Ok(outcome(compare(subject, bound).is_some_and(holds), || {
            AssertionFailure::mismatch(subject.clone(), bound.clone())
                .with_message(format!("expected {subject} {relation} {bound}"))
        }))
    })
}

fn close_to(subject: &Value, target: &Value, tolerance: f64) -> Outcome {
    let (Some(actual), Some(expected)) = (subject.as_number(), target.as_number()) else {
        return not_a_number(subject);
    };
    outcome((actual - expected).abs() <= tolerance, || {
        AssertionFailure::mismatch(subject.clone(), target.clone()).with_message(format!(
            "expected {subject} to be within {tolerance} of {target}"
        ))
    })
}

pub(super) fn definitions() -> Result<Vec<Definition>, DefinitionError> {
    let tolerance = Validator::custom("non-negative number", |v| {
        v.as_number().is_some_and(|n| n >= 0.0)
    });

    Ok(vec![
        comparison(
            ["to be greater than", "to be above"].into(),
            "to be greater than",
            Ordering::is_gt,
        )?,
        comparison(
            ["to be less than", "to be below"].into(),
            "to be less than",
            Ordering::is_lt,
        )?,
        comparison(
            ["to be at least", "to be greater than or equal to"].into(),
            "to be at least",
            Ordering::is_ge,
        )?,
        comparison(
            ["to be at most", "to be less than or equal to"].into(),
            "to be at most",
            Ordering::is_le,
        )?,
        Definition::predicate(
            &[
                "to be between".into(),
                Validator::number().into(),
                "and".into(),
                Validator::number().into(),
            ],
            |values| {
                let [subject, low, high] = arity(values)?;
                if subject.as_number().is_none() {
                    return Ok(not_a_number(subject));
                }
                let inside = compare(subject, low).is_some_and(Ordering::is_ge)
                    && compare(subject, high).is_some_and(Ordering::is_le);
                Ok(outcome(inside, || {
                    AssertionFailure::message(format!(
                        "expected {subject} to be between {low} and {high}"
                    ))
                }))
            },
        )?,
        Definition::predicate(
            &["to be close to".into(), Validator::number().into()],
            |values| {
                let [subject, target] = arity(values)?;
                Ok(close_to(subject, target, DEFAULT_TOLERANCE))
            },
        )?,
        Definition::predicate(
            &[
                "to be close to".into(),
                Validator::number().into(),
                "within".into(),
                tolerance.into(),
            ],
            |values| {
                let [subject, target, tolerance] = arity(values)?;
                Ok(close_to(
                    subject,
                    target,
                    tolerance.as_number().unwrap_or(DEFAULT_TOLERANCE),
                ))
            },
        )?,
    ])
}
