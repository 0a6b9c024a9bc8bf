use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("var", TokenKind::Var);
        map.insert("while", TokenKind::While);
        map.insert("for", TokenKind::For);
        map.insert("do", TokenKind::Do);
        map.insert("end", TokenKind::End);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("func", TokenKind::Func);
        map.insert("print", TokenKind::Print);
        map.insert("int", TokenKind::TypeName);
        map.insert("float", TokenKind::TypeName);
        map.insert("string", TokenKind::TypeName);
        map.insert("bool", TokenKind::TypeName);
        map.insert("true", TokenKind::Boolean);
        map.insert("false", TokenKind::Boolean);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Identifier,
    Integer,
    Float,
    String,
    Boolean,
    TypeName,

    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,
    BitwiseOr,
    BitwiseAnd,

    Semicolon,
    Colon,
    Comma,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    Var,
    While,
    For,
    Do,
    End,
    If,
    Else,
    Func,
    Print,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// The lexeme. String literals are stored re-wrapped in single quotes.
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}
