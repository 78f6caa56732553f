#![allow(clippy::unwrap_used, clippy::expect_used)]

use affirm_diagnostic::AssertionFailure;
use affirm_value::Value;
use pretty_assertions::assert_eq;

use super::*;
use crate::{AssertError, DefinitionError, Validator};

fn greater_than() -> Definition {
    Definition::predicate(
        &["to be greater than".into(), Validator::number().into()],
        |values| {
            let (Some(a), Some(b)) = (values[0].as_number(), values[1].as_number()) else {
                return Ok(Outcome::Fail);
            };
            Ok(if a > b {
                Outcome::Pass
            } else {
                AssertionFailure::mismatch(values[0].clone(), values[1].clone()).into()
            })
        },
    )
    .unwrap()
}

fn args(values: &[Value]) -> Vec<Value> {
    values.to_vec()
}

#[test]
fn test_name() {
    assert_eq!(
        greater_than().name(),
        "{unknown} \"to be greater than\" {number}"
    );
    assert_eq!(
        greater_than().phrases().collect::<Vec<_>>(),
        vec!["to be greater than"]
    );
}

#[test]
fn test_parse_match_with_loose_subject_is_not_exact() {
    let def = greater_than();
    let parsed = def
        .parse_values(&args(&[
            Value::Int(10),
            Value::string("to be greater than"),
            Value::Int(5),
        ]))
        .into_match()
        .unwrap();
    assert!(!parsed.exact_match);
    assert_eq!(parsed.values(), vec![Value::Int(10), Value::Int(5)]);
    assert_eq!(
        parsed.parsed[1],
        Parsed::Phrase("to be greater than".to_string())
    );
}

#[test]
fn test_parse_exact_with_strict_subject() {
    let def = Definition::schema(&[Validator::any().into(), "to be a string".into()], Validator::string())
        .unwrap();
    let parsed = def
        .parse_values(&[Value::string("x"), Value::string("to be a string")])
        .into_match()
        .unwrap();
    assert!(parsed.exact_match);
    assert!(matches!(parsed.cached_subject, Some(Ok(_))));
}

#[test]
fn test_parse_mismatches() {
    let def = greater_than();
    let wrong_phrase =
        def.parse_values(&[Value::Int(1), Value::string("to be less than"), Value::Int(5)]);
    assert!(matches!(wrong_phrase, ParseOutcome::Mismatch(r) if r.starts_with("argument 1:")));

    let wrong_type = def.parse_values(&[
        Value::Int(1),
        Value::string("to be greater than"),
        Value::string("5"),
    ]);
    assert!(matches!(
        wrong_type,
        ParseOutcome::Mismatch(r) if r == "argument 2: expected number, received string \"5\""
    ));

    let arity = def.parse_values(&[Value::Int(1), Value::string("to be greater than")]);
    assert!(matches!(
        arity,
        ParseOutcome::Mismatch(r) if r == "expected 3 arguments, received 2"
    ));
}

#[test]
fn test_user_string_is_not_a_phrase_token() {
    let def = Definition::predicate(
        &["to equal".into(), Validator::string().into()],
        |_| Ok(true),
    )
    .unwrap();
    let parsed = def
        .parse_values(&[
            Value::string("to equal"),
            Value::string("to equal"),
            Value::string("to equal"),
        ])
        .into_match()
        .unwrap();
    assert_eq!(parsed.values().len(), 2);
    assert!(matches!(parsed.parsed[1], Parsed::Phrase(_)));
    assert!(matches!(parsed.parsed[2], Parsed::Value(_)));
}

#[test]
fn test_delegating_predicate_receives_dispatching_registry() {
    let def = Definition::delegating_predicate(&["to be registered".into()], |_, registry| {
        Ok(!registry.is_empty())
    })
    .unwrap();
    let parsed = def
        .parse_values(&[Value::Int(1), Value::string("to be registered")])
        .into_match()
        .unwrap();
    assert!(def.execute(&parsed).is_ok());
    assert!(def.execute_in(&parsed, &Registry::empty()).unwrap_err().is_failure());
}

#[test]
fn test_execute_pass_and_fail() {
    let def = greater_than();
    let pass = def
        .parse_values(&[Value::Int(10), Value::string("to be greater than"), Value::Int(5)])
        .into_match()
        .unwrap();
    assert!(def.execute(&pass).is_ok());

    let fail = def
        .parse_values(&[Value::Int(3), Value::string("to be greater than"), Value::Int(5)])
        .into_match()
        .unwrap();
    let err = def.execute(&fail).unwrap_err();
    let failure = err.as_failure().unwrap();
    assert_eq!(failure.failure.actual, Some(Value::Int(3)));
    assert_eq!(failure.failure.expected, Some(Value::Int(5)));
    assert_eq!(
        failure.message(),
        "Assertion {unknown} \"to be greater than\" {number} failed"
    );
}

#[test]
fn test_execute_validator_outcome() {
    let def = Definition::predicate(&["to be small".into()], |_| {
        Ok(Validator::custom("small number", |v| {
            v.as_int().is_some_and(|n| n < 10)
        }))
    })
    .unwrap();
    let parsed = def
        .parse_values(&[Value::Int(50), Value::string("to be small")])
        .into_match()
        .unwrap();
    let err = def.execute(&parsed).unwrap_err();
    let failure = &err.as_failure().unwrap().failure;
    assert_eq!(failure.actual, Some(Value::Int(50)));
    assert_eq!(failure.expected, Some(Value::string("small number")));
    assert_eq!(failure.issues.len(), 1);
}

#[test]
fn test_execute_schema_uses_cached_subject() {
    let def = Definition::schema(&["to be a number".into()], Validator::number()).unwrap();
    let mut parsed = def
        .parse_values(&[Value::string("x"), Value::string("to be a number")])
        .into_match()
        .unwrap();
    assert!(def.execute(&parsed).is_err());
    // A cached acceptance wins over the actual subject.
    parsed.cached_subject = Some(Ok(Value::Int(1)));
    assert!(def.execute(&parsed).is_ok());
}

#[test]
fn test_schema_rejects_arguments() {
    let err = Definition::schema(
        &["to be".into(), Validator::number().into()],
        Validator::number(),
    )
    .unwrap_err();
    assert_eq!(err, DefinitionError::SchemaWithArguments { index: 1 });
}

#[test]
fn test_predicate_errors_propagate() {
    let def = Definition::predicate(&["to explode".into()], |_| -> Result<bool, AssertError> {
        Err(AssertError::internal("boom"))
    })
    .unwrap();
    let parsed = def
        .parse_values(&[Value::Null, Value::string("to explode")])
        .into_match()
        .unwrap();
    assert!(matches!(def.execute(&parsed), Err(AssertError::Internal(_))));
}

#[test]
fn test_async_detection() {
    assert!(!greater_than().is_async());
    let slot = Definition::predicate(
        &[
            "to be".into(),
            Validator::async_custom("eventually", |_| async { true }).into(),
        ],
        |_| Ok(true),
    )
    .unwrap();
    assert!(slot.is_async());
    let predicate =
        Definition::async_predicate(&["to settle".into()], |_| async { Ok::<_, AssertError>(true) }).unwrap();
    assert!(predicate.is_async());
}

#[test]
fn test_sync_parse_refuses_async_validator() {
    let def = Definition::predicate(
        &[
            "to be".into(),
            Validator::async_custom("eventually", |_| async { true }).into(),
        ],
        |_| Ok(true),
    )
    .unwrap();
    let outcome = def.parse_values(&[Value::Int(1), Value::string("to be"), Value::Int(2)]);
    assert!(matches!(
        outcome,
        ParseOutcome::Mismatch(r) if r.contains("requires asynchronous validation")
    ));
}

#[tokio::test]
async fn test_async_parse_and_execute() {
    let def = Definition::async_predicate(
        &[
            "to eventually equal".into(),
            Validator::async_custom("even", |v: Value| async move {
                v.as_int().is_some_and(|n| n % 2 == 0)
            })
            .into(),
        ],
        |values| async move { Ok::<_, AssertError>(values[0].equals(&values[1])) },
    )
    .unwrap();

    let ok = def
        .parse_values_async(&[Value::Int(4), Value::string("to eventually equal"), Value::Int(4)])
        .await
        .into_match()
        .unwrap();
    assert!(def.execute_async(ok).await.is_ok());

    let odd = def
        .parse_values_async(&[Value::Int(4), Value::string("to eventually equal"), Value::Int(3)])
        .await;
    assert!(!odd.is_match());

    let differs = def
        .parse_values_async(&[Value::Int(4), Value::string("to eventually equal"), Value::Int(2)])
        .await
        .into_match()
        .unwrap();
    assert!(def.execute_async(differs).await.unwrap_err().is_failure());

    // Synchronous execution of an async predicate is a definition misuse.
    let parsed = def
        .parse_values_async(&[Value::Int(2), Value::string("to eventually equal"), Value::Int(2)])
        .await
        .into_match()
        .unwrap();
    assert!(matches!(def.execute(&parsed), Err(AssertError::Internal(_))));
}
