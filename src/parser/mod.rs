//! Parser module for building expression trees.
//!
//! This module contains the recursive-descent parser that turns the token
//! stream into [`Expression`](crate::ast::ast::Expression) nodes. It handles:
//!
//! - Primary expressions (identifiers, literals, parenthesized expressions)
//! - Postfix chains (indexing, calls, member and pointer access, `++`/`--`)
//! - Backtracking out of parenthesized forms that turn out not to be expressions
//!
//! Postfix operators are dispatched through a lookup table keyed by symbol,
//! and each handler wraps the expression parsed so far, which makes chains
//! left-associative.

pub mod expr;
pub mod lookups;
pub mod parser;

#[cfg(test)]
mod property_tests;
