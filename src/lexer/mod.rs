//! Lexical analysis module for the front-end.
//!
//! This module turns C source text into tokens and buffers them for the
//! parser. It handles:
//!
//! - Tokenization of source code using regex patterns
//! - Recognition of keywords, identifiers, literals, punctuators and directives
//! - Stray characters, which become tokens instead of errors
//! - Token buffering with mark/rewind for backtracking

pub mod backtracking;
pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
