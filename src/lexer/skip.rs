//! Whitespace and comment skipping for the lexer.
//!
//! This module provides methods for skipping over whitespace characters,
//! line comments, and block comments during tokenization.

use super::Lexer;
use super::error::LexError;

impl<'a> Lexer<'a> {
    /// Skips whitespace and comments in a loop.
    ///
    /// This method handles the case where a comment is followed by
    /// whitespace, which is followed by another comment, and so on.
    ///
    /// # Errors
    ///
    /// Returns an error if a block comment is never closed.
    pub(super) fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            self.skip_whitespace();
            if !self.skip_comment()? {
                return Ok(());
            }
        }
    }

    /// Skips consecutive whitespace characters.
    ///
    /// Newlines are ordinary whitespace here; [`advance`](Lexer::advance)
    /// records them in the line counter and line-start flag.
    fn skip_whitespace(&mut self) {
        while self.current_char().is_some_and(|c| c.is_ascii_whitespace()) {
            self.advance();
        }
    }

    /// Skips a line or block comment if one is present at the current
    /// position.
    ///
    /// Line comments start with `//` and extend to the end of the line.
    /// Block comments are delimited by `/*` and `*/` and do not nest.
    ///
    /// # Returns
    ///
    /// `true` if a comment was skipped, `false` otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if a block comment is still open at end of input.
    fn skip_comment(&mut self) -> Result<bool, LexError> {
        if self.rest().starts_with("//") {
            while let Some(c) = self.current_char() {
                if c == '\n' {
                    self.advance();
                    break;
                }
                self.advance();
            }
            return Ok(true);
        }

        if self.rest().starts_with("/*") {
            let start_pos = self.pos;
            let start_line = self.line;
            let start_column = self.column;
            self.advance();
            self.advance();
            while !self.rest().starts_with("*/") {
                if self.is_eof() {
                    return Err(LexError::unclosed_block_comment(self.span_from(
                        start_pos,
                        start_line,
                        start_column,
                    )));
                }
                self.advance();
            }
            self.advance();
            self.advance();
            return Ok(true);
        }

        Ok(false)
    }
}
