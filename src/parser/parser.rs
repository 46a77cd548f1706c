//! Parser state for building expression trees.
//!
//! This module contains the Parser struct and the `parse_expression` entry
//! point. The parser reads through a [`BacktrackingLexer`], so any grammar
//! function can take a [`Mark`], try an alternative, and rewind if it does
//! not pan out.

use std::rc::Rc;

use tracing::{debug, instrument};

use crate::{
    ast::ast::Expression,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        backtracking::{BacktrackingLexer, Mark},
        tokens::{Symbol, Token},
    },
    Position,
};

use super::expr::parse_expr;

/// How deeply expressions may nest inside brackets, parentheses and call
/// arguments before parsing fails with `NestingTooDeep`. C requires at
/// least 63 levels of parenthesized nesting.
pub const MAX_NESTING_DEPTH: usize = 128;

/// The parsing state: a borrowed token buffer plus token-level helpers.
///
/// Comment tokens stay in the buffer but are invisible to the grammar:
/// `current_token` looks past them and `advance` consumes them along with
/// the token that follows.
pub struct Parser<'a> {
    lexer: &'a mut BacktrackingLexer,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(lexer: &'a mut BacktrackingLexer) -> Self {
        Parser { lexer, depth: 0 }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&mut self) -> Rc<Token> {
        let mut n = 0;
        loop {
            let token = self.lexer.peek(n);
            if !token.is_comment() {
                return token;
            }
            n += 1;
        }
    }

    /// Consumes the current token, and any comments before it, and returns it.
    pub fn advance(&mut self) -> Rc<Token> {
        loop {
            let token = self.lexer.read_token();
            if !token.is_comment() {
                return token;
            }
        }
    }

    /// Enters one more level of nested expression.
    pub fn enter(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error(ErrorImpl::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
            }));
        }

        self.depth += 1;
        Ok(())
    }

    pub fn leave(&mut self) {
        self.depth -= 1;
    }

    pub fn at_symbol(&mut self, symbol: Symbol) -> bool {
        self.current_token().kind.is_symbol(symbol)
    }

    pub fn mark(&self) -> Mark {
        self.lexer.mark()
    }

    pub fn rewind(&mut self, mark: Mark) {
        self.lexer.rewind(mark)
    }

    /// Returns the start of the current token.
    pub fn get_position(&mut self) -> Position {
        self.current_token().span.start.clone()
    }

    /// Consumes the current token if it is `expected`.
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise an
    /// `ExpectedToken` error. The mismatched token is left unconsumed.
    pub fn expect(&mut self, expected: Symbol) -> Result<Rc<Token>, Error> {
        let token = self.current_token();
        if token.kind.is_symbol(expected) {
            return Ok(self.advance());
        }

        Err(self.error(ErrorImpl::ExpectedToken {
            expected: expected.to_string(),
            found: token.to_string(),
        }))
    }

    /// Consumes the current token if it is an identifier naming a member
    /// reached through `operator`.
    pub fn expect_identifier(&mut self, operator: &Token) -> Result<Rc<Token>, Error> {
        let token = self.current_token();
        if token.kind.is_identifier() {
            return Ok(self.advance());
        }

        Err(self.error(ErrorImpl::ExpectedIdentifier {
            after: operator.to_string(),
            found: token.to_string(),
        }))
    }

    /// Builds an error located at the current token.
    pub fn error(&mut self, error: ErrorImpl) -> Error {
        let position = self.get_position();
        debug!(offset = position.0, %error, "parse failure");
        Error::new(error, position)
    }
}

/// Parses one expression starting at the lexer's cursor.
///
/// # Returns
///
/// - `Ok(Some(expression))` - a complete, valid expression tree
/// - `Ok(None)` - the next token cannot begin an expression; nothing was consumed
/// - `Err(error)` - the input was malformed after the parser committed to a form
#[instrument(level = "trace", skip_all)]
pub fn parse_expression(lexer: &mut BacktrackingLexer) -> Result<Option<Expression>, Error> {
    let mut parser = Parser::new(lexer);
    parse_expr(&mut parser)
}
