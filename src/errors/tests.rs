//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use std::sync::Arc;

use crate::ast::types::Type;
use crate::errors::errors::{Error, ErrorImpl, ErrorTip, Phase};
use crate::Position;

fn position(offset: u32) -> Position {
    Position(offset, Arc::new("test.lang".to_string()))
}

#[test]
fn test_error_creation() {
    let error = Error::new(ErrorImpl::UnexpectedCharacter { character: '@' }, position(10));

    assert_eq!(error.get_error_name(), "UnexpectedCharacter");
    assert_eq!(error.kind(), &ErrorImpl::UnexpectedCharacter { character: '@' });
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "end".to_string(),
            expected: "a statement".to_string(),
        },
        position(42),
    );

    assert_eq!(error.get_position().0, 42);
    assert_eq!(error.get_position().1.as_str(), "test.lang");
}

#[test]
fn test_error_phases() {
    let cases = [
        (ErrorImpl::UnterminatedString { quote: '"' }, Phase::Lexical),
        (ErrorImpl::MalformedNumber { token: ".5".to_string() }, Phase::Lexical),
        (ErrorImpl::UnexpectedEOF { expected: "End".to_string() }, Phase::Syntactic),
        (ErrorImpl::NotImplemented { construct: "for".to_string() }, Phase::Syntactic),
        (ErrorImpl::NestingTooDeep { limit: 256 }, Phase::Syntactic),
        (ErrorImpl::DuplicateDeclaration { variable: "a".to_string() }, Phase::Scope),
        (ErrorImpl::UndeclaredIdentifier { variable: "a".to_string() }, Phase::Semantic),
        (
            ErrorImpl::BooleanOperandMismatch { left: Type::Bool, right: Type::Int },
            Phase::Semantic,
        ),
    ];

    for (error_impl, phase) in cases {
        assert_eq!(Error::new(error_impl, position(0)).phase(), phase);
    }
}

#[test]
fn test_type_mismatch_error() {
    let error = Error::new(
        ErrorImpl::DeclarationTypeMismatch {
            expected: Type::Int,
            received: Type::Float,
        },
        position(0),
    );

    assert_eq!(error.get_error_name(), "DeclarationTypeMismatch");
    assert_eq!(error.to_string(), "can't declare a int and assign it a float");
}

#[test]
fn test_unsupported_operator_message() {
    let error = Error::new(
        ErrorImpl::UnsupportedOperator {
            operator: "-".to_string(),
            category: Type::String,
        },
        position(0),
    );

    assert_eq!(error.to_string(), "undefined operator - for string");
    assert_eq!(
        error.get_tip().to_string(),
        "Operator `-` is not defined for `string`"
    );
}

#[test]
fn test_error_tips() {
    let error = Error::new(
        ErrorImpl::UndeclaredIdentifier {
            variable: "x".to_string(),
        },
        position(0),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(msg) => assert_eq!(msg, "Variable `x` not declared"),
        ErrorTip::None => panic!("Expected a suggestion tip"),
    }

    let error = Error::new(ErrorImpl::UnexpectedCharacter { character: '$' }, position(0));
    assert!(matches!(error.get_tip(), ErrorTip::None));
    assert_eq!(error.get_tip().to_string(), "");
}

#[test]
fn test_error_is_std_error() {
    fn takes_std_error(_: &dyn std::error::Error) {}

    let error = Error::new(ErrorImpl::UnexpectedEOF { expected: "Semicolon".to_string() }, position(3));
    takes_std_error(&error);
    assert_eq!(error.to_string(), "expected Semicolon but found end of input");
}
