#![allow(clippy::unwrap_used)]

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_single_line_change() {
    let out = diff_text("abc", "abd", &DiffOptions::default()).unwrap();
    assert_eq!(out, "- Expected\n+ Received\n\n- abc\n+ abd");
}

#[test]
fn test_list_diff_keeps_unchanged_lines_as_context() {
    let expected = Value::list(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    let actual = Value::list(vec![Value::Int(1), Value::Int(4), Value::Int(3)]);
    let out = diff_values(&expected, &actual, &DiffOptions::default()).unwrap();
    assert_eq!(
        out,
        "- Expected\n+ Received\n\n  [\n    1,\n-   2,\n+   4,\n    3,\n  ]"
    );
}

#[test]
fn test_context_trims_far_lines_and_adds_hunk_headers() {
    let expected = "a\nb\nc\nd\ne\nf\ng";
    let actual = "a\nb\nc\nD\ne\nf\ng";
    let out = diff_text(expected, actual, &DiffOptions::default().with_context(1)).unwrap();
    assert_eq!(
        out,
        "- Expected\n+ Received\n\n@@ -3,3 +3,3 @@\n  c\n- d\n+ D\n  e"
    );
}

#[test]
fn test_separate_hunks() {
    let expected = "1\n2\n3\n4\n5\n6\n7\n8";
    let actual = "x\n2\n3\n4\n5\n6\n7\ny";
    let out = diff_text(expected, actual, &DiffOptions::default().with_context(0)).unwrap();
    assert_eq!(
        out,
        "- Expected\n+ Received\n\n@@ -1,1 +1,1 @@\n- 1\n+ x\n@@ -8,1 +8,1 @@\n- 8\n+ y"
    );
}

#[test]
fn test_insert_only() {
    let out = diff_text("a", "a\nb", &DiffOptions::default()).unwrap();
    assert_eq!(out, "- Expected\n+ Received\n\n  a\n+ b");
}

#[test]
fn test_custom_labels_and_colors() {
    let options = DiffOptions::default()
        .with_labels("Want", "Got")
        .with_color(ColorMode::Always);
    let out = diff_text("x", "y", &options).unwrap();
    assert!(out.starts_with("\x1b[32m- Want\x1b[0m\n\x1b[31m+ Got\x1b[0m"));
    assert!(out.contains("\x1b[31m+ y\x1b[0m"));
}

#[test]
fn test_color_mode_resolution() {
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
}

#[test]
fn test_same_lines_produce_no_diff() {
    assert_eq!(diff_text("a\nb", "a\nb\n", &DiffOptions::default()), None);
    assert_eq!(
        diff_values(&Value::Float(f64::NAN), &Value::Float(f64::NAN), &DiffOptions::default()),
        None
    );
}

#[test]
fn test_prefix_and_suffix_are_kept_as_context() {
    let expected = "a\nb\nx\ny\nc";
    let actual = "a\nb\nz\nc";
    let out = diff_text(expected, actual, &DiffOptions::default()).unwrap();
    assert_eq!(out, "- Expected\n+ Received\n\n  a\n  b\n- x\n- y\n+ z\n  c");
}

#[test]
fn test_large_inputs_fall_back_to_removal_then_insertion() {
    let expected: Vec<Value> = (0..20_000).map(Value::Int).collect();
    let actual: Vec<Value> = (0..20_000).map(|n| Value::Int(n + 1_000_000)).collect();
    let out = diff_values(
        &Value::list(expected),
        &Value::list(actual),
        &DiffOptions::default(),
    )
    .unwrap();

    let lines: Vec<&str> = out.lines().collect();
    // Header, blank line, "[" and "]" context, and every item removed then inserted.
    assert_eq!(lines.len(), 3 + 2 + 40_000);
    assert_eq!(lines[3], "  [");
    assert_eq!(lines[4], "-   0,");
    assert_eq!(lines[4 + 20_000], "+   1000000,");
    assert_eq!(lines.last(), Some(&"  ]"));
}
