//! Dispatch behavior against the built-in registry and small custom ones.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use affirm::{
    default_registry, expect, AssertError, Definition, ErrorCode, ParseOutcome, Registry,
    Validator, Value,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn s(text: &str) -> Value {
    Value::string(text)
}

#[test]
fn greater_than_passes_and_fails_with_actual() {
    assert!(expect!(10, "to be greater than", 5).is_ok());

    let err = expect!(3, "to be greater than", 5).unwrap_err();
    assert_eq!(err.code(), ErrorCode::A3001);
    let failure = err.as_failure().unwrap();
    assert_eq!(failure.failure.actual, Some(Value::Int(3)));
    assert_eq!(failure.failure.expected, Some(Value::Int(5)));
    assert_eq!(failure.message(), "expected 3 to be greater than 5");
}

#[test]
fn contain_resolves_by_subject_type() {
    let registry = default_registry();
    let list = Value::from(vec![1, 2, 3]);
    let list_args = [list, s("to contain"), Value::Int(2)];
    let string_args = [s("abc"), s("to contain"), s("b")];

    for args in [&list_args[..], &string_args[..]] {
        let matches: Vec<_> = registry
            .sync_definitions()
            .iter()
            .filter(|d| d.parse_values(args).is_match())
            .collect();
        assert_eq!(matches.len(), 1, "{args:?} matched {matches:?}");
        assert!(registry.expect(args).is_ok());
    }
}

#[test]
fn unknown_phrase_reports_attempts_and_hint() {
    let err = expect!(3, "to be gerater than", 5).unwrap_err();
    let AssertError::NoMatch(no_match) = &err else {
        panic!("expected no match, got {err:?}");
    };
    assert_eq!(
        no_match.attempts.len(),
        default_registry().sync_definitions().len()
    );
    assert_eq!(no_match.suggestion.as_deref(), Some("to be greater than"));
    assert!(err.to_string().contains("did you mean \"to be greater than\"?"));
}

#[test]
fn wrong_argument_type_is_no_match() {
    let err = expect!(3, "to be greater than", "five").unwrap_err();
    assert_eq!(err.code(), ErrorCode::A2001);
}

#[test]
fn ambiguous_registry_is_reported() {
    let registry = Registry::new([
        Definition::predicate(&[Validator::string().into(), "to shout".into()], |_| Ok(true))
            .unwrap(),
        Definition::predicate(
            &[Validator::non_empty_string().into(), "to shout".into()],
            |_| Ok(true),
        )
        .unwrap(),
    ]);
    let err = registry.expect(&[s("hey"), s("to shout")]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::A2002);
    // An empty string only satisfies one of them.
    assert!(registry.expect(&[s(""), s("to shout")]).is_ok());
}

#[test]
fn extended_registry_adds_vocabulary() {
    let even = Definition::predicate(&["to be even".into()], |values: &[Value]| {
        Ok(values[0].as_int().is_some_and(|n| n % 2 == 0))
    })
    .unwrap();
    let registry = affirm::extend(default_registry(), [even]);
    assert!(registry.expect(&[Value::Int(4), s("to be even")]).is_ok());
    assert!(registry.expect(&[Value::Int(3), s("not to be even")]).is_ok());
    assert!(registry.expect(&[Value::Int(4), s("to equal"), Value::Int(4)]).is_ok());
    assert!(default_registry()
        .expect(&[Value::Int(4), s("to be even")])
        .is_err());
}

#[test]
fn nested_item_checks_use_the_dispatching_registry() {
    let even = Definition::predicate(&["to be even".into()], |values: &[Value]| {
        Ok(values[0].as_int().is_some_and(|n| n % 2 == 0))
    })
    .unwrap();
    let registry = Registry::builtin().unwrap().extend([even]);
    let evens = Value::from(vec![2, 4]);

    registry
        .expect(&[evens.clone(), s("to have items satisfying"), s("to be even")])
        .unwrap();
    registry
        .expect(&[Value::from(vec![1, 3]), s("to have items satisfying"), s("not to be even")])
        .unwrap();

    let err = registry
        .expect(&[Value::from(vec![2, 3]), s("to have items satisfying"), s("to be even")])
        .unwrap_err();
    let failure = err.as_failure().unwrap();
    assert_eq!(failure.failure.issues.len(), 1);
    assert_eq!(failure.failure.issues[0].path, vec!["1".to_string()]);

    // The built-in registry does not know the phrase.
    let err = default_registry()
        .expect(&[evens, s("to have items satisfying"), s("to be even")])
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::A2001);
}

#[test]
fn failure_location_points_at_the_test() {
    let err = expect!(1, "to equal", 2).unwrap_err();
    assert_eq!(err.location().map(|l| l.file()), Some(file!()));
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        Just(Value::Void),
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..1000).prop_map(Value::Int),
        (-1000.0f64..1000.0).prop_map(Value::Float),
        "[a-z]{0,6}".prop_map(|text: String| Value::string(text)),
        prop::collection::vec((-5i64..5).prop_map(Value::Int), 0..4).prop_map(Value::list),
        prop::collection::btree_map("[a-c]", (0i64..3).prop_map(Value::Int), 0..3)
            .prop_map(Value::map),
    ]
}

proptest! {
    #[test]
    fn negation_inverts_outcome(a in -1000i64..1000, b in -1000i64..1000) {
        let affirmative = expect!(a, "to be greater than", b);
        let negated = expect!(a, "not to be greater than", b);
        prop_assert_ne!(affirmative.is_ok(), negated.is_ok());
        if let Err(e) = negated {
            prop_assert_eq!(e.code(), ErrorCode::A3002);
        }
    }

    #[test]
    fn negation_inverts_equality(a in scalar(), b in scalar()) {
        let affirmative = default_registry().expect(&[a.clone(), s("to equal"), b.clone()]);
        let negated = default_registry().expect(&[a, s("not to equal"), b]);
        prop_assert_ne!(affirmative.is_ok(), negated.is_ok());
    }

    #[test]
    fn strict_slots_match_exactly(subject in any::<i64>(), bound in any::<i64>()) {
        let definition = Definition::predicate(
            &[Validator::int().into(), "to be compared with".into(), Validator::int().into()],
            |_| Ok(true),
        )
        .unwrap();
        let parsed = definition.parse_values(&[
            Value::Int(subject),
            s("to be compared with"),
            Value::Int(bound),
        ]);
        match parsed {
            ParseOutcome::Match(parsed) => prop_assert!(parsed.exact_match),
            ParseOutcome::Mismatch(reason) => prop_assert!(false, "mismatch: {}", reason),
        }
    }

    #[test]
    fn builtin_registry_never_has_two_exact_matches(
        subject in scalar(),
        phrase in prop::sample::select(default_registry().phrases()),
        extra in proptest::option::of(scalar()),
    ) {
        let mut args = vec![subject, s(phrase)];
        args.extend(extra);
        let exact = default_registry()
            .sync_definitions()
            .iter()
            .filter_map(|d| d.parse_values(&args).into_match())
            .filter(|parsed| parsed.exact_match)
            .count();
        prop_assert!(exact <= 1, "{:?} matched {} definitions exactly", args, exact);
        prop_assert!(!matches!(default_registry().expect(&args), Err(AssertError::Ambiguous(_))));
    }
}
