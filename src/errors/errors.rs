use std::fmt::Display;

use thiserror::Error;

use crate::{ast::types::Type, Position};

/// A fatal front-end error: what went wrong and where.
#[derive(Error, Debug, Clone)]
#[error("{internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn phase(&self) -> Phase {
        match &self.internal_error {
            ErrorImpl::UnexpectedCharacter { .. }
            | ErrorImpl::UnterminatedString { .. }
            | ErrorImpl::MalformedNumber { .. } => Phase::Lexical,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedEOF { .. }
            | ErrorImpl::NumberParseError { .. }
            | ErrorImpl::NotImplemented { .. }
            | ErrorImpl::NestingTooDeep { .. } => Phase::Syntactic,
            ErrorImpl::DuplicateDeclaration { .. } => Phase::Scope,
            ErrorImpl::UndeclaredIdentifier { .. }
            | ErrorImpl::DeclarationTypeMismatch { .. }
            | ErrorImpl::AssignmentTypeMismatch { .. }
            | ErrorImpl::UnsupportedOperator { .. }
            | ErrorImpl::BooleanOperandMismatch { .. } => Phase::Semantic,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnexpectedCharacter { .. } => "UnexpectedCharacter",
            ErrorImpl::UnterminatedString { .. } => "UnterminatedString",
            ErrorImpl::MalformedNumber { .. } => "MalformedNumber",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedEOF { .. } => "UnexpectedEOF",
            ErrorImpl::NotImplemented { .. } => "NotImplemented",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
            ErrorImpl::DuplicateDeclaration { .. } => "DuplicateDeclaration",
            ErrorImpl::UndeclaredIdentifier { .. } => "UndeclaredIdentifier",
            ErrorImpl::DeclarationTypeMismatch { .. } => "DeclarationTypeMismatch",
            ErrorImpl::AssignmentTypeMismatch { .. } => "AssignmentTypeMismatch",
            ErrorImpl::UnsupportedOperator { .. } => "UnsupportedOperator",
            ErrorImpl::BooleanOperandMismatch { .. } => "BooleanOperandMismatch",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedCharacter { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedString { quote } => ErrorTip::Suggestion(format!(
                "String is missing its closing `{}`",
                quote
            )),
            ErrorImpl::MalformedNumber { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, a `.` needs digits on both sides",
                token
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::UnexpectedToken { token, expected } if expected == "Semicolon" => {
                ErrorTip::Suggestion(format!(
                    "Unexpected token: `{}`, did you miss a semicolon?",
                    token
                ))
            }
            ErrorImpl::UnexpectedToken { token, expected } => {
                ErrorTip::Suggestion(format!("Expected {} but found `{}`", expected, token))
            }
            ErrorImpl::UnexpectedEOF { expected } => ErrorTip::Suggestion(format!(
                "Expected {} but the input ended",
                expected
            )),
            ErrorImpl::NotImplemented { construct } => ErrorTip::Suggestion(format!(
                "`{}` is reserved but not supported yet",
                construct
            )),
            ErrorImpl::NestingTooDeep { limit } => ErrorTip::Suggestion(format!(
                "Expressions and blocks may nest at most {} levels deep",
                limit
            )),
            ErrorImpl::DuplicateDeclaration { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` already declared", variable))
            }
            ErrorImpl::UndeclaredIdentifier { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", variable))
            }
            ErrorImpl::DeclarationTypeMismatch { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "Can't declare a `{}` and assign it a `{}`",
                    expected, received
                ))
            }
            ErrorImpl::AssignmentTypeMismatch { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "Can't assign a `{}` to a variable of type `{}`",
                    received, expected
                ))
            }
            ErrorImpl::UnsupportedOperator { operator, category } => ErrorTip::Suggestion(
                format!("Operator `{}` is not defined for `{}`", operator, category),
            ),
            ErrorImpl::BooleanOperandMismatch { .. } => ErrorTip::Suggestion(String::from(
                "Both sides of the expression have to be a `bool`",
            )),
        }
    }
}

/// Which stage of the pipeline raised an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Lexical,
    Syntactic,
    Scope,
    Semantic,
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unexpected character: {character:?}")]
    UnexpectedCharacter { character: char },
    #[error("unterminated string, expected closing {quote:?}")]
    UnterminatedString { quote: char },
    #[error("malformed number: {token:?}")]
    MalformedNumber { token: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("unexpected token {token:?}, expected {expected}")]
    UnexpectedToken { token: String, expected: String },
    #[error("expected {expected} but found end of input")]
    UnexpectedEOF { expected: String },
    #[error("{construct:?} is not implemented")]
    NotImplemented { construct: String },
    #[error("nesting deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
    #[error("variable {variable:?} already declared")]
    DuplicateDeclaration { variable: String },
    #[error("variable {variable:?} not declared")]
    UndeclaredIdentifier { variable: String },
    #[error("can't declare a {expected} and assign it a {received}")]
    DeclarationTypeMismatch { expected: Type, received: Type },
    #[error("can't assign a {received} to a {expected}")]
    AssignmentTypeMismatch { expected: Type, received: Type },
    #[error("undefined operator {operator} for {category}")]
    UnsupportedOperator { operator: String, category: Type },
    #[error("both sides of the expression have to be a bool, found {left} and {right}")]
    BooleanOperandMismatch { left: Type, right: Type },
}
