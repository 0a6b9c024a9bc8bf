//! Graphviz rendering of a parsed program, for debugging the parser.
//!
//! Each node becomes `{n[label="..."]}` with `n` numbered in visiting
//! order, and every top-level statement hangs off a `program` node.

use super::ast::{Expr, StatementList, Stmt};

pub fn to_dot(program: &StatementList) -> String {
    let mut writer = DotWriter { next_id: 0 };
    let mut graph = String::from("digraph ast {\n");

    for stmt in program.iter() {
        graph.push_str("program -> ");
        graph.push_str(&writer.stmt(stmt));
        graph.push('\n');
    }

    graph.push_str("\n}");
    graph
}

struct DotWriter {
    next_id: u32,
}

impl DotWriter {
    fn node(&mut self, label: &str) -> String {
        self.next_id += 1;
        format!("{{{}[label=\"{}\"]}}", self.next_id, label.replace('"', "\\\""))
    }

    fn edges(&self, parent: &str, children: Vec<String>) -> String {
        children
            .into_iter()
            .map(|child| format!("{} -> {}", parent, child))
            .collect::<Vec<_>>()
            .join(";\n")
    }

    fn stmt(&mut self, stmt: &Stmt) -> String {
        match stmt {
            Stmt::Declaration(decl) => {
                let parent = self.node("decl");
                let children = vec![self.node(&decl.target.name), self.expr(&decl.value)];
                self.edges(&parent, children)
            }
            Stmt::Assignment(assignment) => {
                let parent = self.node("eq");
                let children = vec![self.node(&assignment.target.name), self.expr(&assignment.value)];
                self.edges(&parent, children)
            }
            Stmt::Print(print) => {
                let parent = self.node("print");
                let children = vec![self.expr(&print.value)];
                self.edges(&parent, children)
            }
            Stmt::While(_) | Stmt::If(_) | Stmt::ElseBranch(_) => {
                let label = match stmt {
                    Stmt::While(_) => "while",
                    Stmt::If(_) => "if",
                    _ => "else",
                };
                let parent = self.node(label);

                let mut children = vec![];
                if let Some((condition, body)) = stmt.block() {
                    if let Some(condition) = condition {
                        children.push(self.expr(condition));
                    }
                    for inner in body {
                        children.push(self.stmt(inner));
                    }
                }

                if children.is_empty() {
                    parent
                } else {
                    format!("{};\n{}", parent, self.edges(&parent, children))
                }
            }
        }
    }

    // Iterative so long operator chains do not exhaust the stack. Nodes are
    // still numbered parent first, then left, then right.
    fn expr(&mut self, expr: &Expr) -> String {
        let mut work = vec![DotStep::Visit(expr)];
        let mut rendered: Vec<String> = vec![];

        while let Some(step) = work.pop() {
            match step {
                DotStep::Visit(Expr::Binary(binary)) => {
                    let parent = self.node(binary.operator.name());
                    work.push(DotStep::Join(parent));
                    work.push(DotStep::Visit(&binary.right));
                    work.push(DotStep::Visit(&binary.left));
                }
                DotStep::Visit(leaf) => {
                    let node = self.leaf(leaf);
                    rendered.push(node);
                }
                DotStep::Join(parent) => {
                    let right = rendered.pop().unwrap_or_default();
                    let left = rendered.pop().unwrap_or_default();
                    rendered.push(self.edges(&parent, vec![left, right]));
                }
            }
        }

        rendered.pop().unwrap_or_default()
    }

    fn leaf(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Binary(binary) => self.node(binary.operator.name()),
            Expr::Identifier(identifier) => self.node(&identifier.name),
            Expr::Int(literal) => self.node(&literal.value.to_string()),
            Expr::Float(literal) => self.node(&format!("{:?}", literal.value)),
            Expr::Bool(literal) => self.node(&literal.value.to_string()),
            Expr::String(literal) => self.node(&literal.value),
        }
    }
}

enum DotStep<'a> {
    Visit(&'a Expr),
    Join(String),
}
