//! Scope resolution module.
//!
//! Walks a parsed program once, building the tree of lexical scopes and
//! recording which scope every declaration, identifier and block belongs to.
//! Scopes live in an arena and point at their parent by index.
//!
//! Name lookup itself is deferred to the type checker; the only error raised
//! here is a duplicate declaration.

pub mod symbol_table;
