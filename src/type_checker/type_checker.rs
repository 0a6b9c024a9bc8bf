use std::collections::HashMap;

use tracing::debug;

use crate::{
    ast::{
        ast::{BinaryOperator, Expr, Identifier, NodeId, StatementList, Stmt},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    symbol_table::symbol_table::{ResolvedProgram, ScopeId, SymbolTable},
};

/// Inferred type of every expression node, keyed by node id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeTable {
    types: HashMap<NodeId, Type>,
}

impl TypeTable {
    pub fn get(&self, node: NodeId) -> Option<Type> {
        self.types.get(&node).copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn insert(&mut self, node: NodeId, node_type: Type) {
        self.types.insert(node, node_type);
    }
}

/// A program that passed both scope resolution and type checking.
#[derive(Debug, Clone)]
pub struct TypedProgram {
    resolved: ResolvedProgram,
    types: TypeTable,
}

impl TypedProgram {
    pub fn program(&self) -> &StatementList {
        self.resolved.program()
    }

    pub fn symbols(&self) -> &SymbolTable {
        self.resolved.symbols()
    }

    pub fn resolved(&self) -> &ResolvedProgram {
        &self.resolved
    }

    pub fn types(&self) -> &TypeTable {
        &self.types
    }

    pub fn inferred_type(&self, node: NodeId) -> Option<Type> {
        self.types.get(node)
    }

    pub fn scope_of(&self, node: NodeId) -> Option<ScopeId> {
        self.resolved.scope_of(node)
    }
}

struct TypeChecker<'a> {
    symbols: &'a SymbolTable,
    types: TypeTable,
}

impl TypeChecker<'_> {
    fn lookup(&self, identifier: &Identifier) -> Result<Type, Error> {
        self.symbols
            .scope_of(identifier.id)
            .and_then(|scope| self.symbols.get_symbol(scope, &identifier.name))
            .ok_or_else(|| {
                Error::new(
                    ErrorImpl::UndeclaredIdentifier {
                        variable: identifier.name.clone(),
                    },
                    identifier.span.start.clone(),
                )
            })
    }

    fn check_stmt(&mut self, stmt: &Stmt) -> Result<(), Error> {
        match stmt {
            Stmt::Declaration(decl) => {
                let value_type = self.check_expr(&decl.value)?;

                if value_type != decl.declared_type {
                    return Err(Error::new(
                        ErrorImpl::DeclarationTypeMismatch {
                            expected: decl.declared_type,
                            received: value_type,
                        },
                        decl.value.span().start.clone(),
                    ));
                }
            }
            Stmt::Assignment(assignment) => {
                let declared_type = self.lookup(&assignment.target)?;
                let value_type = self.check_expr(&assignment.value)?;

                if value_type != declared_type {
                    return Err(Error::new(
                        ErrorImpl::AssignmentTypeMismatch {
                            expected: declared_type,
                            received: value_type,
                        },
                        assignment.value.span().start.clone(),
                    ));
                }
            }
            Stmt::Print(print) => {
                self.check_expr(&print.value)?;
            }
            Stmt::While(_) | Stmt::If(_) | Stmt::ElseBranch(_) => {
                if let Some((condition, body)) = stmt.block() {
                    // Any condition type is accepted
                    if let Some(condition) = condition {
                        self.check_expr(condition)?;
                    }

                    for inner in body {
                        self.check_stmt(inner)?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Left operands are walked with an explicit stack since `a + b + c ...`
    /// nests to the left without limit. Right operands only nest through
    /// parentheses, which the parser bounds.
    fn check_expr(&mut self, expr: &Expr) -> Result<Type, Error> {
        let mut spine = vec![];
        let mut current = expr;

        let mut expr_type = loop {
            match current {
                Expr::Binary(binary) => {
                    spine.push(binary);
                    current = &binary.left;
                }
                Expr::Identifier(identifier) => break self.lookup(identifier)?,
                Expr::Int(_) => break Type::Int,
                Expr::Float(_) => break Type::Float,
                Expr::Bool(_) => break Type::Bool,
                Expr::String(_) => break Type::String,
            }
        };
        self.types.insert(current.id(), expr_type);

        while let Some(binary) = spine.pop() {
            let right = self.check_expr(&binary.right)?;

            expr_type = binary_result_type(expr_type, right, binary.operator)
                .map_err(|error| Error::new(error, binary.span.start.clone()))?;
            self.types.insert(binary.id, expr_type);
        }

        Ok(expr_type)
    }
}

fn unsupported(operator: BinaryOperator, category: Type) -> ErrorImpl {
    ErrorImpl::UnsupportedOperator {
        operator: operator.symbol().to_string(),
        category,
    }
}

/// Result type of `left operator right`.
///
/// A string on either side makes it a concatenation, a bool on either side
/// makes it a logical operation, anything else is arithmetic where a float
/// operand makes the result a float.
pub fn binary_result_type(left: Type, right: Type, operator: BinaryOperator) -> Result<Type, ErrorImpl> {
    if left == Type::String || right == Type::String {
        return match operator {
            BinaryOperator::Add => Ok(Type::String),
            _ => Err(unsupported(operator, Type::String)),
        };
    }

    if left == Type::Bool || right == Type::Bool {
        if left != right {
            return Err(ErrorImpl::BooleanOperandMismatch { left, right });
        }

        return match operator {
            BinaryOperator::And | BinaryOperator::Or | BinaryOperator::Equals => Ok(Type::Bool),
            _ => Err(unsupported(operator, Type::Bool)),
        };
    }

    match operator {
        BinaryOperator::Add
        | BinaryOperator::Subtract
        | BinaryOperator::Multiply
        | BinaryOperator::Divide
        | BinaryOperator::Modulo
        | BinaryOperator::Less => {}
        _ => return Err(unsupported(operator, Type::Int)),
    }

    if left == Type::Float || right == Type::Float {
        Ok(Type::Float)
    } else if operator == BinaryOperator::Less {
        Ok(Type::Bool)
    } else {
        Ok(Type::Int)
    }
}

/// Infers the type of every expression in `resolved` without consuming it.
///
/// The pass is a pure function of the resolved program, so running it twice
/// yields equal tables.
pub fn infer_types(resolved: &ResolvedProgram) -> Result<TypeTable, Error> {
    let mut checker = TypeChecker {
        symbols: resolved.symbols(),
        types: TypeTable::default(),
    };

    for stmt in resolved.program().iter() {
        checker.check_stmt(stmt)?;
    }

    debug!(typed = checker.types.len(), "inferred types");
    Ok(checker.types)
}

pub fn type_check(resolved: ResolvedProgram) -> Result<TypedProgram, Error> {
    let types = infer_types(&resolved)?;

    Ok(TypedProgram { resolved, types })
}
