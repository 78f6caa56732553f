//! String checks.

use affirm_value::Value;
use regex::Regex;

use super::{arity, length, outcome};
use crate::{AssertError, AssertionFailure, Definition, DefinitionError, Validator};

/// A string that compiles as a regular expression.
fn pattern() -> Validator {
    Validator::coerce("regular expression", |value| {
        let source = value.as_str()?;
        Regex::new(source).ok().map(|_| value.clone())
    })
}

/// Both values as strings; the slots guarantee it.
fn strs<'a>(a: &'a Value, b: &'a Value) -> Result<(&'a str, &'a str), AssertError> {
    match (a.as_str(), b.as_str()) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(AssertError::internal("string slots received non-string values")),
    }
}

pub(super) fn definitions() -> Result<Vec<Definition>, DefinitionError> {
    Ok(vec![
        Definition::predicate(
            &[
                Validator::string().into(),
                ["to contain", "to include"].into(),
                Validator::string().into(),
            ],
            |values| {
                let [subject, needle] = arity(values)?;
                let (hay, part) = strs(subject, needle)?;
                Ok(outcome(hay.contains(part), || {
                    AssertionFailure::message(format!("expected {subject} to contain {needle}"))
                }))
            },
        )?,
        Definition::predicate(
            &[
                Validator::string().into(),
                "to start with".into(),
                Validator::string().into(),
            ],
            |values| {
                let [subject, prefix] = arity(values)?;
                let (text, start) = strs(subject, prefix)?;
                Ok(outcome(text.starts_with(start), || {
                    AssertionFailure::message(format!("expected {subject} to start with {prefix}"))
                }))
            },
        )?,
        Definition::predicate(
            &[
                Validator::string().into(),
                "to end with".into(),
                Validator::string().into(),
            ],
            |values| {
                let [subject, suffix] = arity(values)?;
                let (text, end) = strs(subject, suffix)?;
                Ok(outcome(text.ends_with(end), || {
                    AssertionFailure::message(format!("expected {subject} to end with {suffix}"))
                }))
            },
        )?,
        Definition::predicate(
            &[Validator::string().into(), "to match".into(), pattern().into()],
            |values| {
                let [subject, source] = arity(values)?;
                let (text, source_text) = strs(subject, source)?;
                let regex = Regex::new(source_text)
                    .map_err(|e| AssertError::internal(e.to_string()))?;
                Ok(outcome(regex.is_match(text), || {
                    AssertionFailure::message(format!("expected {subject} to match /{source_text}/"))
                }))
            },
        )?,
        Definition::predicate(
            &[
                Validator::string().into(),
                "to have length".into(),
                Validator::non_negative_int().into(),
            ],
            |values| {
                let [subject, expected] = arity(values)?;
                let actual = length(subject);
                Ok(outcome(actual.equals(expected), || {
                    AssertionFailure::mismatch(actual.clone(), expected.clone()).with_message(
                        format!("expected {subject} to have length {expected}, received {actual}"),
                    )
                }))
            },
        )?,
        Definition::predicate(&[Validator::string().into(), "to be empty".into()], |values| {
            let [subject] = arity(values)?;
            Ok(outcome(subject.len() == Some(0), || {
                AssertionFailure::message(format!("expected {subject} to be empty"))
            }))
        })?,
    ])
}
