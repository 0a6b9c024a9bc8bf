//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! The parser uses a Pratt approach with NUD/LED handlers for expressions
//! and a statement table keyed by the token that starts each statement.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for factors
//! - LED (left denotation) handlers for binary operators
//! - Binding powers for operator precedence

use std::collections::HashMap;

use tracing::debug;

use crate::{
    ast::ast::{NodeId, StatementList},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt_list,
};

/// How deep expressions and blocks may nest before parsing gives up.
pub const MAX_NESTING: usize = 256;

/// The main parser structure that maintains parsing state.
///
/// This struct holds the token stream and the lookup tables for parsing
/// statements and expressions. It tracks the current position in the token
/// stream and hands out node identities.
pub struct Parser {
    /// The list of tokens to parse
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// End of the last token, reported when input runs out
    end: Position,
    /// End of the most recently consumed token
    last_end: Position,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (factor) handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (binary operator) handlers
    led_lookup: LEDLookup,
    /// Lookup table for operator binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Counter for generating node ids
    current_id: u32,
    /// Open expressions and statement lists
    depth: usize,
}

impl Parser {
    /// Creates a new Parser instance with empty lookup tables.
    pub fn new(tokens: Vec<Token>) -> Self {
        let end = tokens
            .last()
            .map(|token| token.span.end.clone())
            .unwrap_or_else(Position::null);
        let last_end = tokens
            .first()
            .map(|token| token.span.start.clone())
            .unwrap_or_else(Position::null);

        Parser {
            tokens,
            pos: 0,
            end,
            last_end,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            current_id: 0,
            depth: 0,
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> Option<TokenKind> {
        self.current_token().map(|token| token.kind)
    }

    /// Consumes the current token, whatever its kind.
    pub fn advance(&mut self) -> Result<Token, Error> {
        match self.tokens.get(self.pos) {
            Some(token) => {
                let token = token.clone();
                self.pos += 1;
                self.last_end = token.span.end.clone();
                Ok(token)
            }
            None => Err(self.unexpected("a token")),
        }
    }

    /// Consumes the current token if it has the expected kind.
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise an
    /// `UnexpectedToken` error, or `UnexpectedEOF` when no tokens are left.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        match self.current_token() {
            Some(token) if token.kind == expected_kind => self.advance(),
            _ => Err(self.unexpected(&expected_kind.to_string())),
        }
    }

    /// Builds the error for the current token not being what was `expected`.
    pub fn unexpected(&self, expected: &str) -> Error {
        match self.current_token() {
            Some(token) => Error::new(
                ErrorImpl::UnexpectedToken {
                    token: token.value.clone(),
                    expected: String::from(expected),
                },
                token.span.start.clone(),
            ),
            None => Error::new(
                ErrorImpl::UnexpectedEOF {
                    expected: String::from(expected),
                },
                self.end.clone(),
            ),
        }
    }

    /// Opens one nesting level, failing once `MAX_NESTING` is exceeded.
    ///
    /// Every later pass recurses along the same nesting, so bounding it here
    /// bounds their stack use too.
    pub fn enter(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_NESTING {
            let position = self
                .current_token()
                .map(|token| token.span.start.clone())
                .unwrap_or_else(|| self.end.clone());

            return Err(Error::new(
                ErrorImpl::NestingTooDeep { limit: MAX_NESTING },
                position,
            ));
        }

        self.depth += 1;
        Ok(())
    }

    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.pos < self.tokens.len()
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a left denotation (binary operator) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (factor) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for the token that starts it.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Advances the internal ID counter and returns the previous value.
    pub fn advance_id(&mut self) -> NodeId {
        let id = self.current_id;
        self.current_id += 1;
        NodeId(id)
    }

    /// Span from `start` to the end of the last consumed token.
    pub fn span_from(&self, start: Position) -> Span {
        Span {
            start,
            end: self.last_end.clone(),
        }
    }
}

/// Parses a stream of tokens into an Abstract Syntax Tree.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes the lookup tables, and parses statements until the tokens
/// run out. The first error aborts the parse.
pub fn parse(tokens: Vec<Token>) -> Result<StatementList, Error> {
    let mut parser = Parser::new(tokens);
    create_token_lookups(&mut parser);

    let id = parser.advance_id();
    let start = parser.last_end.clone();
    let body = parse_stmt_list(&mut parser)?;

    // `end` and `else` stop a statement list; at top level nothing owns them.
    if parser.has_tokens() {
        return Err(parser.unexpected("a statement"));
    }

    debug!(
        statements = body.len(),
        nodes = parser.current_id,
        "parsed program"
    );

    Ok(StatementList {
        body,
        id,
        span: Span {
            start,
            end: parser.end.clone(),
        },
    })
}
