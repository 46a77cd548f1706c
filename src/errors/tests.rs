//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::Position;
use std::rc::Rc;

fn at(offset: u32) -> Position {
    Position(offset, Rc::new("test.c".to_string()))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::ExpectedExpression {
            after: "[".to_string(),
        },
        at(10),
    );

    assert_eq!(error.get_error_name(), "ExpectedExpression");
    assert_eq!(error.get_position().0, 10);
    assert_eq!(error.get_position().1.as_str(), "test.c");
}

#[test]
fn test_expected_token_error() {
    let error = Error::new(
        ErrorImpl::ExpectedToken {
            expected: "]".to_string(),
            found: "EOF".to_string(),
        },
        at(3),
    );

    assert_eq!(error.get_error_name(), "ExpectedToken");
    assert_eq!(error.to_string(), "expected \"]\", found \"EOF\" at offset 3");
}

#[test]
fn test_expected_identifier_error() {
    let kind = ErrorImpl::ExpectedIdentifier {
        after: "->".to_string(),
        found: "3".to_string(),
    };
    let error = Error::new(kind.clone(), at(0));

    assert_eq!(error.get_kind(), &kind);
    assert_eq!(error.get_error_name(), "ExpectedIdentifier");
}

#[test]
fn test_error_tips() {
    let error = Error::new(
        ErrorImpl::ExpectedExpression {
            after: ",".to_string(),
        },
        at(0),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert!(tip.contains("after `,`")),
        ErrorTip::None => panic!("expected a suggestion"),
    }
}

#[test]
fn test_error_tip_display() {
    assert_eq!(ErrorTip::None.to_string(), "");
    assert_eq!(
        ErrorTip::Suggestion("close the bracket".to_string()).to_string(),
        "close the bracket"
    );
}

#[test]
fn test_nesting_error_has_no_tip() {
    let error = Error::new(ErrorImpl::NestingTooDeep { limit: 128 }, at(0));

    assert_eq!(error.get_error_name(), "NestingTooDeep");
    assert!(matches!(error.get_tip(), ErrorTip::None));
    assert_eq!(
        error.to_string(),
        "expression nested more than 128 levels deep at offset 0"
    );
}
