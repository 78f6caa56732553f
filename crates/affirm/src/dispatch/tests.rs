#![allow(clippy::unwrap_used, clippy::expect_used)]

use affirm_value::Value;
use pretty_assertions::assert_eq;

use crate::{AssertError, AssertionFailure, Definition, Outcome, Registry, Validator};

fn s(text: &str) -> Value {
    Value::string(text)
}

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

fn contains_registry() -> Registry {
    Registry::new([
        Definition::predicate(
            &[Validator::list().into(), "to contain".into(), Validator::any().into()],
            |values| {
                let items = values[0].as_list().unwrap_or_default();
                Ok(items.iter().any(|item| item.equals(&values[1])))
            },
        )
        .unwrap(),
        Definition::predicate(
            &[Validator::string().into(), "to contain".into(), Validator::string().into()],
            |values| {
                let (Some(hay), Some(needle)) = (values[0].as_str(), values[1].as_str()) else {
                    return Ok(false);
                };
                Ok(hay.contains(needle))
            },
        )
        .unwrap(),
    ])
}

#[test]
fn test_greater_than_scenario() {
    let registry = Registry::new([greater_than()]);
    assert!(registry.expect(&[Value::Int(10), s("to be greater than"), Value::Int(5)]).is_ok());

    let err = registry
        .expect(&[Value::Int(3), s("to be greater than"), Value::Int(5)])
        .unwrap_err();
    let failure = err.as_failure().unwrap();
    assert_eq!(failure.failure.actual, Some(Value::Int(3)));
}

#[test]
fn test_shared_phrase_resolves_by_subject() {
    let registry = contains_registry();
    let list = Value::list(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    assert!(registry.expect(&[list, s("to contain"), Value::Int(2)]).is_ok());
    assert!(registry.expect(&[s("abc"), s("to contain"), s("b")]).is_ok());
    assert!(registry
        .expect(&[s("abc"), s("to contain"), s("z")])
        .unwrap_err()
        .is_failure());
}

#[test]
fn test_no_match_lists_every_attempt() {
    let registry = contains_registry();
    let err = registry
        .expect(&[Value::Int(1), s("to contian"), Value::Int(1)])
        .unwrap_err();
    let AssertError::NoMatch(no_match) = &err else {
        panic!("expected no match, got {err:?}");
    };
    assert_eq!(no_match.attempts.len(), 2);
    assert_eq!(no_match.phrase.as_deref(), Some("to contian"));
    assert_eq!(no_match.suggestion.as_deref(), Some("to contain"));
    assert!(err.location().is_some());
}

#[test]
fn test_two_exact_matches_are_ambiguous() {
    let registry = Registry::new([
        Definition::predicate(&[Validator::number().into(), "to be odd".into()], |_| Ok(true))
            .unwrap(),
        Definition::predicate(&[Validator::int().into(), "to be odd".into()], |_| Ok(true))
            .unwrap(),
    ]);
    let err = registry.expect(&[Value::Int(3), s("to be odd")]).unwrap_err();
    let AssertError::Ambiguous(ambiguous) = err else {
        panic!("expected ambiguity, got {err:?}");
    };
    assert_eq!(ambiguous.first, "{number} \"to be odd\"");
    assert_eq!(ambiguous.second, "{integer} \"to be odd\"");
}

#[test]
fn test_exact_match_beats_fallback() {
    let registry = Registry::new([
        Definition::predicate(&["to be special".into()], |_| Ok(false)).unwrap(),
        Definition::predicate(&[Validator::string().into(), "to be special".into()], |_| {
            Ok(true)
        })
        .unwrap(),
    ]);
    // The loose definition comes first but the exact one wins.
    assert!(registry.expect(&[s("x"), s("to be special")]).is_ok());
    // Only the loose definition accepts a number.
    assert!(registry
        .expect(&[Value::Int(1), s("to be special")])
        .unwrap_err()
        .is_failure());
}

#[test]
fn test_first_fallback_wins() {
    let registry = Registry::new([
        Definition::predicate(&["to be fine".into()], |_| Ok(true)).unwrap(),
        Definition::predicate(&["to be fine".into()], |_| Ok(false)).unwrap(),
    ]);
    assert!(registry.expect(&[Value::Null, s("to be fine")]).is_ok());
}

#[test]
fn test_negation() {
    let registry = Registry::new([greater_than()]);
    assert!(registry
        .expect(&[Value::Int(3), s("not to be greater than"), Value::Int(5)])
        .is_ok());
    let err = registry
        .expect(&[Value::Int(10), s("not to be greater than"), Value::Int(5)])
        .unwrap_err();
    assert!(matches!(err, AssertError::Negated(_)));
}

#[test]
fn test_negation_does_not_swallow_defects() {
    let registry = Registry::new([Definition::predicate(&["to explode".into()], |_| {
        Err::<bool, _>(AssertError::internal("boom"))
    })
    .unwrap()]);
    let err = registry.expect(&[Value::Null, s("not to explode")]).unwrap_err();
    assert!(matches!(err, AssertError::Internal(_)));

    let err = registry.expect(&[Value::Null, s("not to vanish")]).unwrap_err();
    assert!(matches!(err, AssertError::NoMatch(_)));
}

#[test]
fn test_location_is_the_caller() {
    let registry = Registry::new([greater_than()]);
    let line = line!() + 1;
    let err = registry.expect(&[Value::Int(1), s("to be greater than"), Value::Int(5)]);
    let location = err.unwrap_err().location().unwrap();
    assert_eq!(location.file(), file!());
    assert_eq!(location.line(), line);
}

#[test]
fn test_sync_entry_ignores_async_definitions() {
    let registry = Registry::new([Definition::async_predicate(&["to settle".into()], |_| async {
        Ok::<_, AssertError>(true)
    })
    .unwrap()]);
    assert!(matches!(
        registry.expect(&[Value::Null, s("to settle")]),
        Err(AssertError::NoMatch(_))
    ));
}

#[tokio::test]
async fn test_async_entry() {
    let registry = Registry::new([Definition::async_predicate(
        &["to settle to".into(), Validator::any().into()],
        |values| async move {
            let settled = values[0].as_pending().unwrap().settle().await;
            Ok::<_, AssertError>(settled.is_ok_and(|v| v.equals(&values[1])))
        },
    )
    .unwrap()]);
    let pending = Value::pending(async { Ok::<_, Value>(Value::Int(4)) });
    assert!(registry
        .expect_async(vec![pending.clone(), s("to settle to"), Value::Int(4)])
        .await
        .is_ok());
    assert!(registry
        .expect_async(vec![pending, s("not to settle to"), Value::Int(5)])
        .await
        .is_ok());
}
