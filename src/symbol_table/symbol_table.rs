use std::collections::HashMap;

use tracing::{debug, trace};

use crate::{
    ast::{
        ast::{Expr, Identifier, NodeId, StatementList, Stmt},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// Index of a scope inside its [`SymbolTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub struct Scope {
    pub variable_lookup: HashMap<String, Type>,
    pub parent: Option<ScopeId>,
}

impl Scope {
    pub fn new(parent: Option<ScopeId>) -> Self {
        Scope {
            variable_lookup: HashMap::new(),
            parent,
        }
    }

    pub fn declare_variable(
        &mut self,
        variable_name: String,
        variable_type: Type,
        current_position: Position,
    ) -> Result<(), Error> {
        if self.variable_lookup.contains_key(&variable_name) {
            Err(Error::new(
                ErrorImpl::DuplicateDeclaration {
                    variable: variable_name,
                },
                current_position,
            ))
        } else {
            self.variable_lookup.insert(variable_name, variable_type);
            Ok(())
        }
    }

    pub fn get_variable(&self, variable_name: &str) -> Option<Type> {
        self.variable_lookup.get(variable_name).copied()
    }
}

/// Arena of scopes plus the node to scope side table.
///
/// Index 0 is always the root scope. While resolving, `scope_path` holds the
/// chain of scopes currently open, innermost last.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
    scope_path: Vec<ScopeId>,
    node_scopes: HashMap<NodeId, ScopeId>,
    allow_shadowing: bool,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            scopes: vec![Scope::new(None)],
            scope_path: vec![ScopeId(0)],
            node_scopes: HashMap::new(),
            allow_shadowing: true,
        }
    }

    /// With `false`, a declaration also collides with names bound in any
    /// enclosing scope.
    pub fn with_shadowing(mut self, allow_shadowing: bool) -> Self {
        self.allow_shadowing = allow_shadowing;
        self
    }

    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    /// Binds a name in the root scope ahead of resolution. A collision is
    /// reported at `position`.
    pub fn declare(
        &mut self,
        variable_name: &str,
        variable_type: Type,
        position: Position,
    ) -> Result<(), Error> {
        self.scopes[0].declare_variable(String::from(variable_name), variable_type, position)
    }

    pub fn current_scope(&self) -> ScopeId {
        self.scope_path.last().copied().unwrap_or(ScopeId(0))
    }

    pub fn push_scope(&mut self) -> ScopeId {
        let parent = self.current_scope();
        let id = ScopeId(self.scopes.len());

        self.scopes.push(Scope::new(Some(parent)));
        self.scope_path.push(id);
        trace!(scope = id.0, parent = parent.0, "entered scope");

        id
    }

    pub fn pop_scope(&mut self) {
        // The root scope stays open
        if self.scope_path.len() > 1 {
            if let Some(id) = self.scope_path.pop() {
                trace!(scope = id.0, "left scope");
            }
        }
    }

    /// Binds `identifier` in the innermost open scope.
    pub fn declare_variable(&mut self, identifier: &Identifier, variable_type: Type) -> Result<(), Error> {
        let current = self.current_scope();

        if !self.allow_shadowing && self.get_symbol(current, &identifier.name).is_some() {
            return Err(Error::new(
                ErrorImpl::DuplicateDeclaration {
                    variable: identifier.name.clone(),
                },
                identifier.span.start.clone(),
            ));
        }

        self.scopes[current.0].declare_variable(
            identifier.name.clone(),
            variable_type,
            identifier.span.start.clone(),
        )
    }

    /// Declared type of `name` as seen from `scope`: its own bindings first,
    /// then each parent's up to the root.
    pub fn get_symbol(&self, scope: ScopeId, name: &str) -> Option<Type> {
        let mut current = self.scopes.get(scope.0);

        while let Some(scope) = current {
            if let Some(variable_type) = scope.get_variable(name) {
                return Some(variable_type);
            }
            current = scope.parent.and_then(|parent| self.scopes.get(parent.0));
        }

        None
    }

    pub fn stamp(&mut self, node: NodeId, scope: ScopeId) {
        self.node_scopes.insert(node, scope);
    }

    pub fn scope_of(&self, node: NodeId) -> Option<ScopeId> {
        self.node_scopes.get(&node).copied()
    }

    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.0)
    }

    /// Number of scopes, root included.
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

/// A parsed program whose nodes all carry scope annotations.
///
/// Only [`resolve`] and [`resolve_with`] build one, which is what lets the
/// type checker assume every identifier has a scope.
#[derive(Debug, Clone)]
pub struct ResolvedProgram {
    program: StatementList,
    symbols: SymbolTable,
}

impl ResolvedProgram {
    pub fn program(&self) -> &StatementList {
        &self.program
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn scope_of(&self, node: NodeId) -> Option<ScopeId> {
        self.symbols.scope_of(node)
    }
}

/// Resolves scopes starting from an empty root scope.
pub fn resolve(program: StatementList) -> Result<ResolvedProgram, Error> {
    resolve_with(program, SymbolTable::new())
}

/// Resolves scopes on top of `symbols`, whose root scope may already hold
/// bindings.
pub fn resolve_with(program: StatementList, mut symbols: SymbolTable) -> Result<ResolvedProgram, Error> {
    symbols.scope_path = vec![symbols.root()];
    symbols.stamp(program.id, symbols.root());

    for stmt in program.iter() {
        resolve_stmt(&mut symbols, stmt)?;
    }

    debug!(
        scopes = symbols.len(),
        annotated = symbols.node_scopes.len(),
        "resolved scopes"
    );

    Ok(ResolvedProgram { program, symbols })
}

fn resolve_stmt(symbols: &mut SymbolTable, stmt: &Stmt) -> Result<(), Error> {
    match stmt {
        Stmt::Declaration(decl) => {
            let current = symbols.current_scope();

            symbols.declare_variable(&decl.target, decl.declared_type)?;
            symbols.stamp(decl.target.id, current);
            resolve_expr(symbols, &decl.value);
            symbols.stamp(decl.id, current);
        }
        Stmt::Assignment(assignment) => {
            symbols.stamp(assignment.target.id, symbols.current_scope());
            resolve_expr(symbols, &assignment.value);
        }
        Stmt::Print(print) => resolve_expr(symbols, &print.value),
        Stmt::While(_) | Stmt::If(_) | Stmt::ElseBranch(_) => {
            if let Some((condition, body)) = stmt.block() {
                if let Some(condition) = condition {
                    resolve_expr(symbols, condition);
                }

                let scope = symbols.push_scope();
                symbols.stamp(stmt.id(), scope);

                for inner in body {
                    resolve_stmt(symbols, inner)?;
                }

                symbols.pop_scope();
            }
        }
    }

    Ok(())
}

/// Operator chains can be arbitrarily long, so the walk keeps its own stack.
fn resolve_expr(symbols: &mut SymbolTable, expr: &Expr) {
    let scope = symbols.current_scope();
    let mut pending = vec![expr];

    while let Some(expr) = pending.pop() {
        match expr {
            Expr::Binary(binary) => {
                pending.push(&binary.right);
                pending.push(&binary.left);
            }
            Expr::Identifier(identifier) => symbols.stamp(identifier.id, scope),
            Expr::Int(_) | Expr::Float(_) | Expr::Bool(_) | Expr::String(_) => {}
        }
    }
}
