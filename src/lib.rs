#![allow(clippy::module_inception)]

//! Front-end of a C-family compiler: tokens in, typed syntax tree out.
//!
//! Source text flows through the [`lexer::lexer::Lexer`], is buffered by the
//! [`lexer::backtracking::BacktrackingLexer`] so the parser can speculate, and
//! is turned into [`ast::ast::Expression`] trees by
//! [`parser::parser::parse_expression`].

use std::rc::Rc;

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// A byte offset into a named source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

/// Range of source text a syntax node was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }

    /// Span covering `first` through `last`.
    pub fn between(first: &Span, last: &Span) -> Self {
        Span {
            start: first.start.clone(),
            end: last.end.clone(),
        }
    }
}
