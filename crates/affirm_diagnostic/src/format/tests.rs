#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_identical_values_have_nothing_to_show() {
    let list = Value::list(vec![Value::Int(1)]);
    assert_eq!(
        format_failure(&AssertionFailure::mismatch(list.clone(), list)),
        None
    );
    let a = Value::object([("k", Value::string("v"))]);
    let b = Value::object([("k", Value::string("v"))]);
    assert_eq!(format_failure(&AssertionFailure::mismatch(a, b)), None);
}

#[test]
fn test_precomputed_diff_is_verbatim() {
    let failure = AssertionFailure::mismatch(1, 2)
        .with_diff("D")
        .with_format_actual(|_: &Value| Value::string("ignored"));
    assert_eq!(format_failure(&failure), Some("D".to_string()));
}

#[test]
fn test_no_values_means_no_diff() {
    assert_eq!(format_failure(&AssertionFailure::message("nope")), None);
}

#[test]
fn test_formatters_apply_before_comparison() {
    // Case-insensitive formatting makes the two sides identical.
    let lower = |v: &Value| match v.as_str() {
        Some(s) => Value::string(s.to_lowercase()),
        None => v.clone(),
    };
    let failure = AssertionFailure::mismatch("HELLO", "hello")
        .with_format_actual(lower)
        .with_format_expected(lower);
    assert_eq!(format_failure(&failure), None);
}

#[test]
fn test_diff_between_different_values() {
    let failure = AssertionFailure::mismatch(3, 5);
    assert_eq!(
        format_failure(&failure),
        Some("- Expected\n+ Received\n\n- 5\n+ 3".to_string())
    );
}

#[test]
fn test_failure_options_override_defaults() {
    let failure = AssertionFailure::mismatch("a", "b")
        .with_diff_options(DiffOptions::default().with_labels("want", "got"));
    let defaults = DiffOptions::default().with_labels("E", "A");
    let out = format_failure_with(&failure, &defaults).unwrap();
    assert!(out.starts_with("- want\n+ got"));
}

#[test]
fn test_line_identical_renderings_have_nothing_to_show() {
    let nan = AssertionFailure::mismatch(f64::NAN, f64::NAN);
    assert_eq!(format_failure(&nan), None);
    let newline = AssertionFailure::mismatch("done\n", "done");
    assert_eq!(format_failure(&newline), None);
}
