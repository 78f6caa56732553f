use super::*;

#[test]
fn test_error_code_display() {
    assert_eq!(ErrorCode::A1001.to_string(), "A1001");
    assert_eq!(ErrorCode::A2002.as_str(), "A2002");
}

#[test]
fn test_error_code_ranges() {
    assert!(ErrorCode::A1004.is_definition_error());
    assert!(!ErrorCode::A1004.is_dispatch_error());

    assert!(ErrorCode::A2001.is_dispatch_error());
    assert!(ErrorCode::A2002.is_dispatch_error());
    assert!(!ErrorCode::A2002.is_check_failure());

    assert!(ErrorCode::A3001.is_check_failure());
    assert!(ErrorCode::A3002.is_check_failure());

    assert!(ErrorCode::A9001.is_internal_error());
    assert!(!ErrorCode::A9001.is_definition_error());
}

#[test]
fn test_every_code_is_in_exactly_one_range() {
    for code in ErrorCode::ALL {
        let ranges = [
            code.is_definition_error(),
            code.is_dispatch_error(),
            code.is_check_failure(),
            code.is_internal_error(),
        ];
        assert_eq!(ranges.iter().filter(|r| **r).count(), 1, "{code}");
        assert!(!code.description().is_empty());
    }
}

#[test]
fn test_parse_error_code() {
    assert_eq!("a3001".parse::<ErrorCode>(), Ok(ErrorCode::A3001));
    assert_eq!("A3002".parse::<ErrorCode>(), Ok(ErrorCode::A3002));
    assert!("E0001".parse::<ErrorCode>().is_err());
}
