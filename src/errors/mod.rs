//! Error types and error handling for the front-end.
//!
//! This module defines the errors the expression parser raises after it has
//! committed to a grammar form. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for each malformed shape
//! - Helpful error messages and suggestions
//!
//! Expected absence of an expression is not an error, and neither are stray
//! characters or unknown directives, which the lexer represents as tokens.

pub mod errors;

#[cfg(test)]
mod tests;
