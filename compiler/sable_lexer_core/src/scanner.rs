//! Position tracker.
//!
//! The scanner keeps the byte offset together with the 1-based line and
//! column, and remembers the extent of the last token so callers can attach
//! it to nodes and error messages. Saving and restoring a [`Checkpoint`] is
//! the only backtracking mechanism.

use crate::combinators::Matcher;
use crate::fragments;

/// Saved scanner state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Checkpoint {
    pos: usize,
    line: u32,
    column: u32,
}

impl Checkpoint {
    pub fn pos(&self) -> usize {
        self.pos
    }
}

/// Cursor over an immutable source text.
#[derive(Clone, Debug)]
pub struct Scanner<'a> {
    src: &'a str,
    pos: usize,
    line: u32,
    column: u32,
    token_start: usize,
    token_end: usize,
}

/// Number of characters in `bytes`, counting UTF-8 lead bytes only.
fn char_count(bytes: &[u8]) -> u32 {
    let n = bytes.iter().filter(|&&b| (b & 0xC0) != 0x80).count();
    u32::try_from(n).unwrap_or(u32::MAX)
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        Scanner {
            src,
            pos: 0,
            line: 1,
            column: 1,
            token_start: 0,
            token_end: 0,
        }
    }

    #[inline]
    pub fn source(&self) -> &'a str {
        self.src
    }

    #[inline]
    pub fn bytes(&self) -> &'a [u8] {
        self.src.as_bytes()
    }

    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    #[inline]
    pub fn peek_byte(&self) -> Option<u8> {
        self.bytes().get(self.pos).copied()
    }

    #[inline]
    pub fn peek_byte_at(&self, offset: usize) -> Option<u8> {
        self.bytes().get(self.pos + offset).copied()
    }

    /// Text from the current position to the end.
    pub fn rest(&self) -> &'a str {
        self.slice(self.pos, self.src.len())
    }

    /// Source text between two offsets; empty if the range is not on
    /// character boundaries.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        self.src.get(start..end).unwrap_or_default()
    }

    /// Start and end of the most recently consumed token.
    pub fn token(&self) -> (usize, usize) {
        (self.token_start, self.token_end)
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.pos;
        self.line = checkpoint.line;
        self.column = checkpoint.column;
    }

    /// Move forward to `end`, updating line and column.
    ///
    /// Offsets behind the current position are ignored.
    pub fn advance_to(&mut self, end: usize) {
        let end = end.min(self.src.len());
        if end <= self.pos {
            return;
        }
        let chunk = &self.bytes()[self.pos..end];
        match memchr::memrchr(b'\n', chunk) {
            Some(last_nl) => {
                let newlines = memchr::memchr_iter(b'\n', chunk).count();
                self.line = self
                    .line
                    .saturating_add(u32::try_from(newlines).unwrap_or(u32::MAX));
                self.column = char_count(&chunk[last_nl + 1..]) + 1;
            }
            None => self.column = self.column.saturating_add(char_count(chunk)),
        }
        self.pos = end;
    }

    /// Match `m` at the current position without skipping anything.
    pub fn eat<M: Matcher>(&mut self, m: M) -> Option<&'a str> {
        let start = self.pos;
        let end = m.run(self.bytes(), start)?;
        self.advance_to(end);
        self.token_start = start;
        self.token_end = end;
        Some(self.slice(start, end))
    }

    pub fn eat_char(&mut self, c: u8) -> bool {
        if self.peek_byte() == Some(c) {
            self.advance_to(self.pos + 1);
            true
        } else {
            false
        }
    }

    /// Skip whitespace and comments, then match `m`.
    ///
    /// On failure nothing is consumed, not even the whitespace.
    pub fn lex<M: Matcher>(&mut self, m: M) -> Option<&'a str> {
        let saved = self.checkpoint();
        self.skip_ws();
        let text = self.eat(m);
        if text.is_none() {
            self.restore(saved);
        }
        text
    }

    pub fn lex_char(&mut self, c: u8) -> bool {
        let saved = self.checkpoint();
        self.skip_ws();
        if self.eat_char(c) {
            true
        } else {
            self.restore(saved);
            false
        }
    }

    /// Offset where `m` would end after skipping whitespace; consumes nothing.
    pub fn peek<M: Matcher>(&self, m: M) -> Option<usize> {
        m.run(self.bytes(), self.after_ws())
    }

    /// Offset where `m` would end at the current position; consumes nothing.
    pub fn peek_raw<M: Matcher>(&self, m: M) -> Option<usize> {
        m.run(self.bytes(), self.pos)
    }

    /// The first byte after any whitespace and comments.
    pub fn peek_byte_after_ws(&self) -> Option<u8> {
        self.bytes().get(self.after_ws()).copied()
    }

    fn after_ws(&self) -> usize {
        fragments::optional_css_whitespace(self.bytes(), self.pos).unwrap_or(self.pos)
    }

    /// Skip whitespace and comments. Returns true if anything was skipped.
    pub fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        if let Some(end) = fragments::optional_css_whitespace(self.bytes(), start) {
            self.advance_to(end);
        }
        self.pos > start
    }

    /// Whitespace or a comment starts at the current position.
    pub fn at_whitespace(&self) -> bool {
        self.peek_byte().is_some_and(fragments::is_space)
            || self.peek_raw(fragments::comment).is_some()
    }
}

#[cfg(test)]
mod tests;
