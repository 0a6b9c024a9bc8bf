//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Numeric literals (integers and floats)
//! - String literals in both quoting styles
//! - Operators and punctuation
//! - Error cases

use super::{lexer::tokenize, tokens::TokenKind};
use crate::errors::errors::ErrorImpl;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source.to_string(), Some("test.lang".to_string()))
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

fn values(source: &str) -> Vec<String> {
    tokenize(source.to_string(), Some("test.lang".to_string()))
        .unwrap()
        .into_iter()
        .map(|token| token.value)
        .collect()
}

#[test]
fn test_tokenize_declaration() {
    let tokens = tokenize("var i:int = 0;".to_string(), None).unwrap();

    let lexemes: Vec<&str> = tokens.iter().map(|token| token.value.as_str()).collect();
    assert_eq!(lexemes, vec!["var", "i", ":", "int", "=", "0", ";"]);

    assert_eq!(
        tokens.iter().map(|token| token.kind).collect::<Vec<_>>(),
        vec![
            TokenKind::Var,
            TokenKind::Identifier,
            TokenKind::Colon,
            TokenKind::TypeName,
            TokenKind::Assignment,
            TokenKind::Integer,
            TokenKind::Semicolon,
        ]
    );
}

#[test]
fn test_tokenize_keywords() {
    assert_eq!(
        kinds("var while for do end if else func print"),
        vec![
            TokenKind::Var,
            TokenKind::While,
            TokenKind::For,
            TokenKind::Do,
            TokenKind::End,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::Func,
            TokenKind::Print,
        ]
    );
}

#[test]
fn test_tokenize_type_names_and_booleans() {
    assert_eq!(
        kinds("int float string bool true false"),
        vec![
            TokenKind::TypeName,
            TokenKind::TypeName,
            TokenKind::TypeName,
            TokenKind::TypeName,
            TokenKind::Boolean,
            TokenKind::Boolean,
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo baz_123 _under CamelCase variable".to_string(), None).unwrap();

    assert!(tokens.iter().all(|token| token.kind == TokenKind::Identifier));
    assert_eq!(tokens[1].value, "baz_123");
    // Keywords only match whole words
    assert_eq!(tokens[4].value, "variable");
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 3.14 0 100.5".to_string(), None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Integer);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].kind, TokenKind::Float);
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].kind, TokenKind::Integer);
    assert_eq!(tokens[3].kind, TokenKind::Float);
}

#[test]
fn test_number_followed_by_identifier_splits() {
    assert_eq!(values("2012tiger"), vec!["2012", "tiger"]);
    assert_eq!(kinds("2012tiger"), vec![TokenKind::Integer, TokenKind::Identifier]);
}

#[test]
fn test_tokenize_strings_are_single_quoted() {
    let tokens = tokenize("\"hello\" 'world' \"\"".to_string(), None).unwrap();

    assert!(tokens.iter().all(|token| token.kind == TokenKind::String));
    assert_eq!(tokens[0].value, "'hello'");
    assert_eq!(tokens[1].value, "'world'");
    assert_eq!(tokens[2].value, "''");
}

#[test]
fn test_string_keeps_inner_whitespace_and_other_quote() {
    assert_eq!(values("\"it's  here\""), vec!["'it's  here'"]);
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("+ - * / % && || == != = < <= > >= ! & |"),
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Assignment,
            TokenKind::Less,
            TokenKind::LessEquals,
            TokenKind::Greater,
            TokenKind::GreaterEquals,
            TokenKind::Not,
            TokenKind::BitwiseAnd,
            TokenKind::BitwiseOr,
        ]
    );
}

#[test]
fn test_two_character_operators_without_spaces() {
    assert_eq!(
        kinds("a<=b==c"),
        vec![
            TokenKind::Identifier,
            TokenKind::LessEquals,
            TokenKind::Identifier,
            TokenKind::Equals,
            TokenKind::Identifier,
        ]
    );
    assert_eq!(kinds("a=-b"), vec![TokenKind::Identifier, TokenKind::Assignment, TokenKind::Dash, TokenKind::Identifier]);
}

#[test]
fn test_tokenize_punctuation() {
    assert_eq!(
        kinds("( ) [ ] ; : ,"),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::Comma,
        ]
    );
}

#[test]
fn test_whitespace_only_yields_nothing() {
    assert!(kinds(" \t\r\n  ").is_empty());
    assert!(kinds("").is_empty());
}

#[test]
fn test_token_positions() {
    let tokens = tokenize("x  = 10;".to_string(), Some("pos.lang".to_string())).unwrap();

    assert_eq!(tokens[1].span.start.0, 3);
    assert_eq!(tokens[2].span.start.0, 5);
    assert_eq!(tokens[2].span.end.0, 7);
    assert_eq!(tokens[2].span.start.1.as_str(), "pos.lang");
}

#[test]
fn test_default_file_name() {
    let tokens = tokenize("x".to_string(), None).unwrap();

    assert_eq!(tokens[0].span.start.1.as_str(), "shell");
}

#[test]
fn test_leading_dot_is_malformed() {
    let error = tokenize(".14".to_string(), None).unwrap_err();

    assert_eq!(error.kind(), &ErrorImpl::MalformedNumber { token: ".14".to_string() });
    assert_eq!(error.get_position().0, 0);
}

#[test]
fn test_trailing_dot_is_malformed() {
    let error = tokenize("x = 3.;".to_string(), None).unwrap_err();

    assert_eq!(error.kind(), &ErrorImpl::MalformedNumber { token: "3.".to_string() });
    assert_eq!(error.get_position().0, 4);
}

#[test]
fn test_double_dot_is_malformed() {
    let error = tokenize("20..12".to_string(), None).unwrap_err();

    assert!(matches!(error.kind(), ErrorImpl::MalformedNumber { .. }));
}

#[test]
fn test_unterminated_string() {
    let error = tokenize("print \"hello;".to_string(), None).unwrap_err();

    assert_eq!(error.kind(), &ErrorImpl::UnterminatedString { quote: '"' });
    assert_eq!(error.get_position().0, 6);

    let error = tokenize("'abc".to_string(), None).unwrap_err();
    assert_eq!(error.kind(), &ErrorImpl::UnterminatedString { quote: '\'' });
}

#[test]
fn test_unexpected_character() {
    let error = tokenize("tiger@tiger".to_string(), None).unwrap_err();

    assert_eq!(error.kind(), &ErrorImpl::UnexpectedCharacter { character: '@' });
    assert_eq!(error.get_position().0, 5);
}

#[test]
fn test_tokenize_is_deterministic() {
    let source = "while i < 10 do i = i + 1; end";

    assert_eq!(
        tokenize(source.to_string(), None).unwrap(),
        tokenize(source.to_string(), None).unwrap()
    );
}
