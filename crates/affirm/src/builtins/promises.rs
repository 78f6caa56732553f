//! Pending values: resolution and rejection.

use std::time::Duration;

use affirm_value::Value;

use super::{fail, outcome, reason_text, timeout_at, with_options};
use crate::{
    within, AssertError, AssertionFailure, Definition, DefinitionError, Elapsed, Outcome, Part,
    Validator,
};

/// Settle a pending value, or call a thunk and settle what it returns.
async fn settle(subject: Value) -> Result<Value, Value> {
    match subject {
        Value::Pending(pending) => pending.settle().await,
        Value::Function(thunk) => match thunk.call(&[]) {
            Ok(Value::Pending(pending)) => pending.settle().await,
            other => other,
        },
        other => Ok(other),
    }
}

/// Settle, bounded by `limit` when one was given.
async fn settle_within(
    subject: Value,
    limit: Option<Duration>,
) -> Result<Result<Value, Value>, Elapsed> {
    match limit {
        Some(limit) => within(limit, settle(subject)).await,
        None => Ok(settle(subject).await),
    }
}

fn timed_out(subject: &Value, elapsed: Elapsed) -> Outcome {
    fail(format!("expected {subject} to settle, but it {elapsed}"))
}

async fn resolves(values: Vec<Value>) -> Result<Outcome, AssertError> {
    let subject = values.first().cloned().unwrap_or(Value::Void);
    Ok(match settle_within(subject.clone(), timeout_at(&values, 1)).await {
        Err(elapsed) => timed_out(&subject, elapsed),
        Ok(Ok(_)) => Outcome::Pass,
        Ok(Err(reason)) => fail(format!(
            "expected {subject} to resolve, but it rejected with {reason}"
        )),
    })
}

async fn rejects(values: Vec<Value>) -> Result<Outcome, AssertError> {
    let subject = values.first().cloned().unwrap_or(Value::Void);
    Ok(match settle_within(subject.clone(), timeout_at(&values, 1)).await {
        Err(elapsed) => timed_out(&subject, elapsed),
        Ok(Ok(value)) => fail(format!(
            "expected {subject} to reject, but it resolved with {value}"
        )),
        Ok(Err(_)) => Outcome::Pass,
    })
}

async fn resolves_with(values: Vec<Value>) -> Result<Outcome, AssertError> {
    let subject = values.first().cloned().unwrap_or(Value::Void);
    let expected = values.get(1).cloned().unwrap_or(Value::Void);
    Ok(match settle_within(subject.clone(), timeout_at(&values, 2)).await {
        Err(elapsed) => timed_out(&subject, elapsed),
        Ok(Ok(value)) => outcome(value.equals(&expected), || {
            AssertionFailure::mismatch(value.clone(), expected.clone())
                .with_message(format!("expected {subject} to resolve with {expected}"))
        }),
        Ok(Err(reason)) => fail(format!(
            "expected {subject} to resolve with {expected}, but it rejected with {reason}"
        )),
    })
}

async fn rejects_with(values: Vec<Value>) -> Result<Outcome, AssertError> {
    let subject = values.first().cloned().unwrap_or(Value::Void);
    let expected = values.get(1).cloned().unwrap_or(Value::Void);
    let expected_text = expected.as_str().unwrap_or_default().to_string();
    Ok(match settle_within(subject.clone(), timeout_at(&values, 2)).await {
        Err(elapsed) => timed_out(&subject, elapsed),
        Ok(Ok(value)) => fail(format!(
            "expected {subject} to reject with {expected}, but it resolved with {value}"
        )),
        Ok(Err(reason)) => {
            let text = reason_text(&reason);
            outcome(text.contains(&expected_text), || {
                AssertionFailure::mismatch(Value::string(text.clone()), expected.clone())
                    .with_message(format!(
                        "expected {subject} to reject with {expected}, but it rejected with {reason}"
                    ))
            })
        }
    })
}

pub(super) fn definitions() -> Result<Vec<Definition>, DefinitionError> {
    let resolve: [Part; 2] = [
        Validator::pending_like().into(),
        ["to resolve", "to fulfill"].into(),
    ];
    let reject: [Part; 2] = [Validator::pending_like().into(), "to reject".into()];
    let resolve_with: [Part; 3] = [
        Validator::pending_like().into(),
        ["to resolve with", "to fulfill with"].into(),
        Validator::any().into(),
    ];
    let reject_with: [Part; 3] = [
        Validator::pending_like().into(),
        "to reject with".into(),
        Validator::string().into(),
    ];

    Ok(vec![
        Definition::async_predicate(&resolve, resolves)?,
        Definition::async_predicate(&with_options(&resolve), resolves)?,
        Definition::async_predicate(&reject, rejects)?,
        Definition::async_predicate(&with_options(&reject), rejects)?,
        Definition::async_predicate(&resolve_with, resolves_with)?,
        Definition::async_predicate(&with_options(&resolve_with), resolves_with)?,
        Definition::async_predicate(&reject_with, rejects_with)?,
        Definition::async_predicate(&with_options(&reject_with), rejects_with)?,
    ])
}
