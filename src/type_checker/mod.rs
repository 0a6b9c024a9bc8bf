//! Type checking module.
//!
//! Runs over a resolved program and infers the type of every expression
//! node. It verifies that:
//!
//! - Every identifier names a variable visible from its scope
//! - Binary operators are applied to operand types they support
//! - Declarations and assignments store a value of exactly the variable's type
//!
//! Inferred types are collected in a side table keyed by node id.

pub mod type_checker;

#[cfg(test)]
mod tests;
