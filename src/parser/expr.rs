use crate::{
    ast::ast::{
        BinaryExpr, BinaryOperator, BoolLiteral, Expr, FloatLiteral, Identifier, IntLiteral,
        StringLiteral,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    parser.enter()?;
    let expr = parse_expr_inner(parser, bp)?;
    parser.leave();

    Ok(expr)
}

fn parse_expr_inner(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let nud = parser
        .current_token_kind()
        .and_then(|kind| parser.get_nud_lookup().get(&kind).copied());
    let Some(nud) = nud else {
        return Err(parser.unexpected("an expression"));
    };

    let mut left = nud(parser)?;

    // While the next operator binds tighter than `bp`, fold it into lhs
    while let Some(kind) = parser.current_token_kind() {
        let operator_bp = parser
            .get_bp_lookup()
            .get(&kind)
            .copied()
            .unwrap_or(BindingPower::Default);
        if operator_bp <= bp {
            break;
        }

        let Some(led) = parser.get_led_lookup().get(&kind).copied() else {
            return Err(parser.unexpected("an operator"));
        };
        left = led(parser, left, operator_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance()?;
    let id = parser.advance_id();
    let span = token.span.clone();

    match token.kind {
        TokenKind::Integer => match token.value.parse::<i64>() {
            Ok(value) => Ok(Expr::Int(IntLiteral { value, id, span })),
            Err(_) => Err(Error::new(
                ErrorImpl::NumberParseError { token: token.value },
                span.start,
            )),
        },
        TokenKind::Float => match token.value.parse::<f64>() {
            Ok(value) => Ok(Expr::Float(FloatLiteral { value, id, span })),
            Err(_) => Err(Error::new(
                ErrorImpl::NumberParseError { token: token.value },
                span.start,
            )),
        },
        TokenKind::Boolean => Ok(Expr::Bool(BoolLiteral {
            value: token.value == "true",
            id,
            span,
        })),
        TokenKind::String => Ok(Expr::String(StringLiteral {
            value: token.value,
            id,
            span,
        })),
        TokenKind::Identifier => Ok(Expr::Identifier(Identifier {
            name: token.value,
            id,
            span,
        })),
        _ => Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: token.value,
                expected: String::from("an expression"),
            },
            span.start,
        )),
    }
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance()?;
    let Some(operator) = BinaryOperator::from_token_kind(operator_token.kind) else {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: operator_token.value,
                expected: String::from("an operator"),
            },
            operator_token.span.start,
        ));
    };

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary(BinaryExpr {
        span: Span {
            start: left.span().start.clone(),
            end: right.span().end.clone(),
        },
        left: Box::new(left),
        operator,
        right: Box::new(right),
        id: parser.advance_id(),
    }))
}

/// `( expr )`. The parentheses leave no node behind.
pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}
