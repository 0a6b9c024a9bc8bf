use std::{fmt::Display, slice::Iter};

use crate::{lexer::tokens::TokenKind, Position, Span};

use super::types::Type;

/// Identity of a node within one parse, assigned in parse order.
///
/// Later passes key their side tables (scopes, inferred types) by it, so the
/// tree itself is never mutated after parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Root of a parsed program.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementList {
    pub body: Vec<Stmt>,
    pub id: NodeId,
    pub span: Span,
}

impl StatementList {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Declaration(Declaration),
    Assignment(Assignment),
    While(WhileStmt),
    If(IfStmt),
    /// Only ever appears as the last statement of an `If` body.
    ElseBranch(ElseBranch),
    Print(PrintStmt),
}

impl Stmt {
    pub fn id(&self) -> NodeId {
        match self {
            Stmt::Declaration(stmt) => stmt.id,
            Stmt::Assignment(stmt) => stmt.id,
            Stmt::While(stmt) => stmt.id,
            Stmt::If(stmt) => stmt.id,
            Stmt::ElseBranch(stmt) => stmt.id,
            Stmt::Print(stmt) => stmt.id,
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            Stmt::Declaration(stmt) => &stmt.span,
            Stmt::Assignment(stmt) => &stmt.span,
            Stmt::While(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::ElseBranch(stmt) => &stmt.span,
            Stmt::Print(stmt) => &stmt.span,
        }
    }

    /// The optional condition and the body of a block-bearing statement.
    ///
    /// `While`, `If` and `ElseBranch` all open a scope and are walked the
    /// same way; every other statement returns `None`.
    pub fn block(&self) -> Option<(Option<&Expr>, &[Stmt])> {
        match self {
            Stmt::While(stmt) => Some((Some(&stmt.condition), &stmt.body)),
            Stmt::If(stmt) => Some((Some(&stmt.condition), &stmt.body)),
            Stmt::ElseBranch(stmt) => Some((None, &stmt.body)),
            _ => None,
        }
    }
}

/// `var name : type = value ;`
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub target: Identifier,
    pub declared_type: Type,
    pub value: Expr,
    pub id: NodeId,
    pub span: Span,
}

/// `name = value ;`
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub target: Identifier,
    pub value: Expr,
    pub id: NodeId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Vec<Stmt>,
    pub id: NodeId,
    pub span: Span,
}

/// `if cond do ... [else ...] end`. An else body is stored as a trailing
/// [`ElseBranch`] in `body`.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub body: Vec<Stmt>,
    pub id: NodeId,
    pub span: Span,
}

impl IfStmt {
    pub fn else_branch(&self) -> Option<&ElseBranch> {
        match self.body.last() {
            Some(Stmt::ElseBranch(branch)) => Some(branch),
            _ => None,
        }
    }

    /// Statements run when the condition holds, without the else branch.
    pub fn then_body(&self) -> &[Stmt] {
        match self.else_branch() {
            Some(_) => &self.body[..self.body.len() - 1],
            None => &self.body,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElseBranch {
    pub body: Vec<Stmt>,
    pub id: NodeId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintStmt {
    pub value: Expr,
    pub id: NodeId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary(BinaryExpr),
    Identifier(Identifier),
    Int(IntLiteral),
    Float(FloatLiteral),
    Bool(BoolLiteral),
    String(StringLiteral),
}

impl Expr {
    pub fn id(&self) -> NodeId {
        match self {
            Expr::Binary(expr) => expr.id,
            Expr::Identifier(expr) => expr.id,
            Expr::Int(expr) => expr.id,
            Expr::Float(expr) => expr.id,
            Expr::Bool(expr) => expr.id,
            Expr::String(expr) => expr.id,
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            Expr::Binary(expr) => &expr.span,
            Expr::Identifier(expr) => &expr.span,
            Expr::Int(expr) => &expr.span,
            Expr::Float(expr) => &expr.span,
            Expr::Bool(expr) => &expr.span,
            Expr::String(expr) => &expr.span,
        }
    }

    /// The fixed type of a literal, `None` for identifiers and operations.
    pub fn literal_type(&self) -> Option<Type> {
        match self {
            Expr::Int(_) => Some(Type::Int),
            Expr::Float(_) => Some(Type::Float),
            Expr::Bool(_) => Some(Type::Bool),
            Expr::String(_) => Some(Type::String),
            Expr::Binary(_) | Expr::Identifier(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: BinaryOperator,
    pub right: Box<Expr>,
    pub id: NodeId,
    pub span: Span,
}

impl Drop for BinaryExpr {
    // A left-leaning chain of thousands of operators would overflow the
    // stack with the recursive drop glue, so operands are unlinked first.
    fn drop(&mut self) {
        let mut pending = vec![];
        detach_binary(&mut self.left, &mut pending);
        detach_binary(&mut self.right, &mut pending);

        while let Some(mut binary) = pending.pop() {
            detach_binary(&mut binary.left, &mut pending);
            detach_binary(&mut binary.right, &mut pending);
        }
    }
}

/// Moves a binary operand out of `slot` onto `pending`, leaving a leaf.
fn detach_binary(slot: &mut Box<Expr>, pending: &mut Vec<BinaryExpr>) {
    if !matches!(**slot, Expr::Binary(_)) {
        return;
    }

    let leaf = Expr::Bool(BoolLiteral {
        value: false,
        id: NodeId(0),
        span: Span {
            start: Position::null(),
            end: Position::null(),
        },
    });

    if let Expr::Binary(binary) = std::mem::replace(&mut **slot, leaf) {
        pending.push(binary);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub id: NodeId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntLiteral {
    pub value: i64,
    pub id: NodeId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatLiteral {
    pub value: f64,
    pub id: NodeId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoolLiteral {
    pub value: bool,
    pub id: NodeId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    /// The lexeme, quotes included, e.g. `'hello'`.
    pub value: String,
    pub id: NodeId,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    And,
    Or,
    Equals,
    NotEquals,
    Less,
}

impl BinaryOperator {
    pub fn from_token_kind(kind: TokenKind) -> Option<BinaryOperator> {
        match kind {
            TokenKind::Plus => Some(BinaryOperator::Add),
            TokenKind::Dash => Some(BinaryOperator::Subtract),
            TokenKind::Star => Some(BinaryOperator::Multiply),
            TokenKind::Slash => Some(BinaryOperator::Divide),
            TokenKind::Percent => Some(BinaryOperator::Modulo),
            TokenKind::And => Some(BinaryOperator::And),
            TokenKind::Or => Some(BinaryOperator::Or),
            TokenKind::Equals => Some(BinaryOperator::Equals),
            TokenKind::NotEquals => Some(BinaryOperator::NotEquals),
            TokenKind::Less => Some(BinaryOperator::Less),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
            BinaryOperator::Equals => "==",
            BinaryOperator::NotEquals => "!=",
            BinaryOperator::Less => "<",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "plus",
            BinaryOperator::Subtract => "minus",
            BinaryOperator::Multiply => "mult",
            BinaryOperator::Divide => "div",
            BinaryOperator::Modulo => "mod",
            BinaryOperator::And => "and",
            BinaryOperator::Or => "or",
            BinaryOperator::Equals => "equals",
            BinaryOperator::NotEquals => "not equals",
            BinaryOperator::Less => "less than",
        }
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
