/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Statement and expression nodes, node identities
/// - types: The four primitive types of the language
/// - dot: Graphviz rendering of a tree for debugging
pub mod ast;
pub mod dot;
pub mod types;
