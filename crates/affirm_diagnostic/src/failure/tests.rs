use super::*;

#[test]
fn test_issue_display() {
    assert_eq!(Issue::new("expected a string").to_string(), "expected a string");
    let nested = Issue::new("expected a number").under("age").under("user");
    assert_eq!(nested.path, vec!["user".to_string(), "age".to_string()]);
    assert_eq!(nested.to_string(), "at user.age: expected a number");
}

#[test]
fn test_mismatch_builder() {
    let failure = AssertionFailure::mismatch(3, 5).with_message("too small");
    assert_eq!(failure.actual, Some(Value::Int(3)));
    assert_eq!(failure.expected, Some(Value::Int(5)));
    assert_eq!(failure.message.as_deref(), Some("too small"));
    assert!(failure.has_values());
    assert!(!AssertionFailure::message("x").has_values());
}

#[test]
fn test_debug_hides_formatter_closures() {
    let failure = AssertionFailure::new().with_format_actual(|v: &Value| v.clone());
    let debug = format!("{failure:?}");
    assert!(debug.contains("format_actual: true"));
    assert!(debug.contains("format_expected: false"));
}
