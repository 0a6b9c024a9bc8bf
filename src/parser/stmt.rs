use crate::{
    ast::{
        ast::{Assignment, Declaration, ElseBranch, Identifier, IfStmt, PrintStmt, Stmt, WhileStmt},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{expr::parse_expr, lookups::BindingPower, parser::Parser};

/// Parses statements until the tokens run out or a block terminator
/// (`end`, `else`) is reached. The terminator is left for the caller.
pub fn parse_stmt_list(parser: &mut Parser) -> Result<Vec<Stmt>, Error> {
    parser.enter()?;
    let mut body = vec![];

    while let Some(kind) = parser.current_token_kind() {
        if let Some(handler) = parser.get_stmt_lookup().get(&kind).copied() {
            body.push(handler(parser)?);
        } else if matches!(kind, TokenKind::End | TokenKind::Else) {
            break;
        } else {
            return Err(parser.unexpected("a statement"));
        }
    }

    parser.leave();
    Ok(body)
}

fn identifier_from(parser: &mut Parser, token: Token) -> Identifier {
    Identifier {
        name: token.value,
        id: parser.advance_id(),
        span: token.span,
    }
}

pub fn parse_declaration_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect(TokenKind::Var)?.span.start;
    let name = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::Colon)?;

    let type_token = parser.expect(TokenKind::TypeName)?;
    let Some(declared_type) = Type::from_keyword(&type_token.value) else {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: type_token.value,
                expected: String::from("a type name"),
            },
            type_token.span.start,
        ));
    };

    parser.expect(TokenKind::Assignment)?;
    let target = identifier_from(parser, name);
    let value = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Declaration(Declaration {
        target,
        declared_type,
        value,
        id: parser.advance_id(),
        span: parser.span_from(start),
    }))
}

pub fn parse_assignment_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let name = parser.expect(TokenKind::Identifier)?;
    let start = name.span.start.clone();
    parser.expect(TokenKind::Assignment)?;

    let target = identifier_from(parser, name);
    let value = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Assignment(Assignment {
        target,
        value,
        id: parser.advance_id(),
        span: parser.span_from(start),
    }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect(TokenKind::While)?.span.start;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Do)?;

    let body = parse_stmt_list(parser)?;
    parser.expect(TokenKind::End)?;

    Ok(Stmt::While(WhileStmt {
        condition,
        body,
        id: parser.advance_id(),
        span: parser.span_from(start),
    }))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect(TokenKind::If)?.span.start;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Do)?;

    let mut body = parse_stmt_list(parser)?;

    if parser.current_token_kind() == Some(TokenKind::Else) {
        let else_start = parser.expect(TokenKind::Else)?.span.start;
        let else_body = parse_stmt_list(parser)?;
        parser.expect(TokenKind::End)?;

        // The else block rides along as the last statement of the if body.
        body.push(Stmt::ElseBranch(ElseBranch {
            body: else_body,
            id: parser.advance_id(),
            span: parser.span_from(else_start),
        }));
    } else {
        parser.expect(TokenKind::End)?;
    }

    Ok(Stmt::If(IfStmt {
        condition,
        body,
        id: parser.advance_id(),
        span: parser.span_from(start),
    }))
}

pub fn parse_print_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect(TokenKind::Print)?.span.start;
    let value = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Print(PrintStmt {
        value,
        id: parser.advance_id(),
        span: parser.span_from(start),
    }))
}

/// `for` and `func` are reserved words without a grammar yet.
pub fn parse_unsupported_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.advance()?;

    Err(Error::new(
        ErrorImpl::NotImplemented { construct: token.value },
        token.span.start,
    ))
}
