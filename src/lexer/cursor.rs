//! Cursor position management for the lexer.
//!
//! This module provides methods for tracking and advancing the lexer's
//! position within the input source code.

use super::Lexer;
use crate::token::Span;

impl<'a> Lexer<'a> {
    /// Returns the current character without consuming it.
    ///
    /// Returns `None` if the end of input has been reached.
    pub(super) fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the unconsumed remainder of the input.
    pub(super) fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Returns `true` if the end of input has been reached.
    pub(super) fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Advances the lexer by one character.
    ///
    /// Updates the position, line, and column tracking. A newline bumps the
    /// line counter and marks the next token as line-starting.
    pub(super) fn advance(&mut self) {
        if let Some(c) = self.current_char() {
            self.pos += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
                self.at_line_start = true;
            } else {
                self.column += 1;
            }
        }
    }

    /// Returns a span from the given start state to the current position.
    pub(super) fn span_from(&self, start_pos: usize, start_line: usize, start_column: usize) -> Span {
        Span::new(self.file, start_pos, self.pos, start_line, start_column)
    }
}
