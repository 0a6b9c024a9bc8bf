//! Error types and error handling for the front end.
//!
//! This module defines the error types shared by every stage of the
//! pipeline. It includes:
//!
//! - Error structures with source position information
//! - One variant per failure, grouped by the phase that raises it
//! - Helpful error messages and suggestions

pub mod errors;

#[cfg(test)]
mod tests;
