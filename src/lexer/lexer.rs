use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// Receives the text matched at the cursor. Handlers are responsible for
/// advancing the lexer past it.
pub type RegexHandler = fn(&mut Lexer, &str) -> Result<(), Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

fn anchored(pattern: &str) -> Regex {
    Regex::new(&format!("^(?:{})", pattern)).expect("lexer patterns are valid regular expressions")
}

lazy_static! {
    // Order matters: the first pattern matching at the cursor wins, so
    // two-character operators come before their one-character prefixes and
    // terminated strings before the lone quotes that report them unterminated.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: anchored("[ \\t\\r\\n]+"), handler: skip_handler },
        RegexPattern { regex: anchored("[a-zA-Z_][a-zA-Z0-9_]*"), handler: symbol_handler },
        RegexPattern { regex: anchored("[0-9]+(\\.[0-9]+)?"), handler: number_handler },
        RegexPattern { regex: anchored("\\.[0-9]*"), handler: stray_dot_handler },
        RegexPattern { regex: anchored("\"[^\"]*\""), handler: string_handler },
        RegexPattern { regex: anchored("'[^']*'"), handler: string_handler },
        RegexPattern { regex: anchored("[\"']"), handler: unterminated_string_handler },
        RegexPattern { regex: anchored("\\["), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[") },
        RegexPattern { regex: anchored("\\]"), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]") },
        RegexPattern { regex: anchored("\\("), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: anchored("\\)"), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: anchored("=="), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
        RegexPattern { regex: anchored("!="), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=") },
        RegexPattern { regex: anchored("!"), handler: MK_DEFAULT_HANDLER!(TokenKind::Not, "!") },
        RegexPattern { regex: anchored("="), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
        RegexPattern { regex: anchored("<="), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=") },
        RegexPattern { regex: anchored("<"), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: anchored(">="), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=") },
        RegexPattern { regex: anchored(">"), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
        RegexPattern { regex: anchored("\\|\\|"), handler: MK_DEFAULT_HANDLER!(TokenKind::Or, "||") },
        RegexPattern { regex: anchored("\\|"), handler: MK_DEFAULT_HANDLER!(TokenKind::BitwiseOr, "|") },
        RegexPattern { regex: anchored("&&"), handler: MK_DEFAULT_HANDLER!(TokenKind::And, "&&") },
        RegexPattern { regex: anchored("&"), handler: MK_DEFAULT_HANDLER!(TokenKind::BitwiseAnd, "&") },
        RegexPattern { regex: anchored(";"), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        RegexPattern { regex: anchored(":"), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
        RegexPattern { regex: anchored(","), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: anchored("\\+"), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: anchored("-"), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
        RegexPattern { regex: anchored("/"), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
        RegexPattern { regex: anchored("\\*"), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
        RegexPattern { regex: anchored("%"), handler: MK_DEFAULT_HANDLER!(TokenKind::Percent, "%") },
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    file: Arc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        Lexer {
            tokens: vec![],
            source,
            pos: 0,
            file: Arc::new(file.unwrap_or_else(|| String::from("shell"))),
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn position(&self) -> Position {
        self.position_at(self.pos)
    }

    fn position_at(&self, offset: usize) -> Position {
        Position(offset as u32, Arc::clone(&self.file))
    }

    /// Span of the next `len` bytes starting at the cursor.
    pub fn span_of(&self, len: usize) -> Span {
        Span {
            start: self.position(),
            end: self.position_at(self.pos + len),
        }
    }
}

fn skip_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    lexer.advance_n(matched.len());
    Ok(())
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    let kind = RESERVED_LOOKUP
        .get(matched)
        .copied()
        .unwrap_or(TokenKind::Identifier);

    lexer.push(MK_TOKEN!(kind, String::from(matched), lexer.span_of(matched.len())));
    lexer.advance_n(matched.len());
    Ok(())
}

fn number_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    // The pattern only takes a `.` when digits follow it, so one left
    // directly behind the match is a dangling fraction.
    if lexer.remainder()[matched.len()..].starts_with('.') {
        return Err(Error::new(
            ErrorImpl::MalformedNumber { token: format!("{}.", matched) },
            lexer.position(),
        ));
    }

    let kind = if matched.contains('.') { TokenKind::Float } else { TokenKind::Integer };

    lexer.push(MK_TOKEN!(kind, String::from(matched), lexer.span_of(matched.len())));
    lexer.advance_n(matched.len());
    Ok(())
}

fn stray_dot_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    Err(Error::new(
        ErrorImpl::MalformedNumber { token: String::from(matched) },
        lexer.position(),
    ))
}

fn string_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    // Both quoting styles end up wrapped in single quotes.
    let body = &matched[1..matched.len() - 1];

    lexer.push(MK_TOKEN!(TokenKind::String, format!("'{}'", body), lexer.span_of(matched.len())));
    lexer.advance_n(matched.len());
    Ok(())
}

fn unterminated_string_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    let quote = matched.chars().next().unwrap_or('"');

    Err(Error::new(ErrorImpl::UnterminatedString { quote }, lexer.position()))
}

/// Converts source text into tokens in a single left-to-right pass.
///
/// Lexing is all-or-nothing: the first error is returned and no partial
/// token sequence is produced.
pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        let matched = PATTERNS.iter().find_map(|pattern| {
            pattern
                .regex
                .find(lex.remainder())
                .map(|found| (pattern.handler, String::from(found.as_str())))
        });

        match matched {
            Some((handler, text)) => handler(&mut lex, &text)?,
            None => {
                return Err(Error::new(
                    ErrorImpl::UnexpectedCharacter { character: lex.at().unwrap_or_default() },
                    lex.position(),
                ));
            }
        }
    }

    debug!(tokens = lex.tokens.len(), file = %lex.file, "tokenized source");
    Ok(lex.tokens)
}
