//! Token buffering with mark/rewind for speculative parsing.
//!
//! The [`BacktrackingLexer`] pulls tokens lazily from any [`TokenSource`] and
//! keeps every token it has handed out in a buffer. A [`Mark`] is just a
//! saved cursor, so rewinding never re-scans input and replays the very same
//! `Rc<Token>` values in the same order.

use std::{
    rc::Rc,
    sync::atomic::{AtomicUsize, Ordering},
};

use tracing::{debug, trace};

use super::{lexer::TokenSource, tokens::Token};

static NEXT_LEXER_ID: AtomicUsize = AtomicUsize::new(0);

/// A saved cursor position, valid only for the lexer and epoch it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    lexer_id: usize,
    epoch: usize,
    cursor: usize,
}

pub struct BacktrackingLexer {
    lexer: Box<dyn TokenSource>,
    buffer: Vec<Rc<Token>>,
    /// Index in `buffer` of the next token to read.
    cursor: usize,
    id: usize,
    /// Bumped by every `commit`, which invalidates older marks.
    epoch: usize,
}

impl BacktrackingLexer {
    pub fn new(lexer: impl TokenSource + 'static) -> Self {
        BacktrackingLexer {
            lexer: Box::new(lexer),
            buffer: vec![],
            cursor: 0,
            id: NEXT_LEXER_ID.fetch_add(1, Ordering::Relaxed),
            epoch: 0,
        }
    }

    fn eof_buffered(&self) -> bool {
        self.buffer.last().is_some_and(|token| token.is_eof())
    }

    /// Makes sure `buffer[index]` exists, unless EOF was already buffered.
    fn fill(&mut self, index: usize) {
        while self.buffer.len() <= index && !self.eof_buffered() {
            let token = self.lexer.read_token();
            trace!(index = self.buffer.len(), token = %token, "buffered token");
            self.buffer.push(Rc::new(token));
        }
    }

    /// Returns the token `n` positions past the cursor without consuming it.
    ///
    /// Looking past the end of input yields the EOF token.
    pub fn peek(&mut self, n: usize) -> Rc<Token> {
        let index = self.cursor + n;
        self.fill(index);
        let index = index.min(self.buffer.len() - 1);
        Rc::clone(&self.buffer[index])
    }

    /// Consumes and returns the next token. EOF is returned but never consumed.
    pub fn read_token(&mut self) -> Rc<Token> {
        let token = self.peek(0);
        if !token.is_eof() {
            self.cursor += 1;
        }
        token
    }

    pub fn mark(&self) -> Mark {
        debug!(cursor = self.cursor, epoch = self.epoch, "mark");
        Mark {
            lexer_id: self.id,
            epoch: self.epoch,
            cursor: self.cursor,
        }
    }

    /// Moves the cursor back to `mark`, making every token read since then
    /// available again.
    ///
    /// # Panics
    ///
    /// If `mark` came from another lexer, from an earlier epoch, or lies
    /// ahead of the cursor. Each of these is a parser bug.
    pub fn rewind(&mut self, mark: Mark) {
        assert_eq!(
            mark.lexer_id, self.id,
            "rewind to a mark taken on a different lexer"
        );
        assert_eq!(
            mark.epoch, self.epoch,
            "rewind to a mark from a committed epoch"
        );
        assert!(
            mark.cursor <= self.cursor,
            "rewind to a mark ahead of the cursor ({} > {})",
            mark.cursor,
            self.cursor
        );

        debug!(from = self.cursor, to = mark.cursor, epoch = self.epoch, "rewind");
        self.cursor = mark.cursor;
    }

    /// Drops every consumed token and starts a new epoch.
    ///
    /// Marks taken before the commit can no longer be rewound to.
    pub fn commit(&mut self) {
        self.buffer.drain(..self.cursor);
        self.cursor = 0;
        self.epoch += 1;
        debug!(epoch = self.epoch, retained = self.buffer.len(), "commit");
    }

    /// Number of tokens currently held, consumed or not.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}
