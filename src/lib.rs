#![allow(clippy::module_inception)]

//! Front end for a small statically-typed imperative language.
//!
//! Source text goes through four passes, each consuming the previous one's
//! output:
//!
//!   source
//!     -> lexer         (tokens)
//!     -> parser        (StatementList)
//!     -> symbol_table  (ResolvedProgram: scopes stamped on nodes)
//!     -> type_checker  (TypedProgram: inferred types stamped on nodes)
//!
//! The first error in any pass aborts the compilation.

use std::sync::Arc;

use lazy_static::lazy_static;

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod symbol_table;
pub mod type_checker;

extern crate regex;

pub use symbol_table::symbol_table::{resolve, resolve_with, ResolvedProgram, SymbolTable};
pub use type_checker::type_checker::{infer_types, type_check, TypedProgram};

lazy_static! {
    static ref NULL_FILE: Arc<String> = Arc::new(String::from("<null>"));
}

/// Byte offset into a source file, tagged with the file's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub u32, pub Arc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Arc::clone(&NULL_FILE))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Settings for one run of the pipeline.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Name reported in positions and diagnostics. Defaults to `shell`.
    pub file_name: Option<String>,
    /// When false, a declaration may not reuse any name visible from an
    /// enclosing scope, not only names of its own scope.
    pub allow_shadowing: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            file_name: None,
            allow_shadowing: true,
        }
    }
}

/// Runs lex, parse, scope resolution and type checking over `source`.
#[tracing::instrument(skip_all, fields(file = options.file_name.as_deref().unwrap_or("shell")))]
pub fn compile(source: &str, options: &CompileOptions) -> Result<TypedProgram, Error> {
    let tokens = lexer::lexer::tokenize(String::from(source), options.file_name.clone())?;
    let program = parser::parser::parse(tokens)?;
    let symbols = SymbolTable::new().with_shadowing(options.allow_shadowing);
    let resolved = resolve_with(program, symbols)?;

    type_check(resolved)
}

/// Returns the 1-based line number, the line's text and the byte column of
/// `position` within `source`. The column is a byte count; slice the line
/// with it before counting characters.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;
    let mut start = 0;

    for (index, line) in source.split_inclusive('\n').enumerate() {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((index + 1, line.to_string(), pos - start));
        }

        start = end;
    }

    None
}

/// Formats `error` as a caret diagnostic pointing into `source`:
///
/// ```text
/// Error: UndeclaredIdentifier (Variable `i` not declared)
/// -> shell
///   |
/// 1 | print i + 1;
///   | ------^
/// ```
pub fn render_error(error: &Error, source: &str) -> String {
    let position = error.get_position();
    let mut lines = vec![];

    if let ErrorTip::None = error.get_tip() {
        lines.push(format!("Error: {}", error.get_error_name()));
    } else {
        lines.push(format!("Error: {} ({})", error.get_error_name(), error.get_tip()));
    }
    lines.push(format!("-> {}", position.1));

    // Errors at end of input point just past the last line.
    let located = get_line_at_position(source, position.0).or_else(|| {
        source.split_inclusive('\n').enumerate().last().map(|(index, line)| {
            let column = line.trim_end_matches('\n').len();
            (index + 1, line.to_string(), column)
        })
    });

    if let Some((line, line_text, line_pos)) = located {
        let line_string = line.to_string();
        let padding = line_string.len() + 2;

        lines.push(format!("{:>padding$}", "|"));

        let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
        lines.push(format!("{} | {}", line_string, line_text_removed.trim_end()));

        // Carets are laid out per character, not per byte
        let column = line_text
            .get(..line_pos)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(line_pos);
        let arrows = column.saturating_sub(removed_whitespace) + 1;
        lines.push(format!("{:>padding$} {:->arrows$}", "|", "^"));
    }

    lines.join("\n")
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let trimmed = string.trim_start_matches([' ', '\t']);

    (String::from(trimmed), string.len() - trimmed.len())
}
