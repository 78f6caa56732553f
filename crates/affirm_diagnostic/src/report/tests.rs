#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;

#[test]
fn test_report_shape() {
    let failure = AssertionFailure::mismatch(3, 5)
        .with_issues(vec![Issue::new("expected 3 to be greater than 5")])
        .with_diff_options(DiffOptions::default().with_color(ColorMode::Always));
    let report = FailureReport::new(
        ErrorCode::A3001,
        "Assertion failed",
        &failure,
        Some("tests/a.rs:1:1".to_string()),
    );
    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["code"], "A3001");
    assert_eq!(json["actual"], 3);
    assert_eq!(json["expected"], 5);
    assert_eq!(json["issues"][0]["message"], "expected 3 to be greater than 5");
    assert_eq!(json["location"], "tests/a.rs:1:1");
    // Snapshots never carry terminal colors.
    assert!(!json["diff"].as_str().unwrap().contains('\x1b'));
}

#[test]
fn test_report_omits_absent_fields() {
    let report = FailureReport::new(
        ErrorCode::A3002,
        "passed",
        &AssertionFailure::new(),
        None,
    );
    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert!(json.get("actual").is_none());
    assert!(json.get("diff").is_none());
    assert!(json.get("issues").is_none());
}
