//! Lexical analyzer for the mincc compiler.
//!
//! This module provides the [`Lexer`] struct which converts source text
//! into a stream of [`Token`]s for preprocessing and parsing.
//!
//! # Overview
//!
//! The lexer performs the following tasks:
//! - Scans the input byte by byte (the source character set is ASCII)
//! - Recognizes numbers, string literals, identifiers, keywords, and
//!   punctuators
//! - Tracks source positions for error reporting
//! - Marks the first token of every line (`at_line_start`), which the
//!   preprocessor uses to delimit directives
//! - Skips whitespace and both comment forms
//!
//! # Supported Tokens
//!
//! - **Keywords**: `return`, `if`, `else`, `while`, `for`, `int`, `char`,
//!   `short`, `long`, `void`, `struct`, `union`, `typedef`, `sizeof`,
//!   emitted as [`TokenKind::Punct`] with their text preserved
//! - **Identifiers**: `[A-Za-z_][A-Za-z_0-9]*`
//! - **Integer literals**: sequences of decimal digits, stored as `i64`
//! - **String literals**: double-quoted, with escape sequences
//!   (`\n \t \r \\ \" \a \b \f \v`) and octal escapes (`\0dd`); the
//!   decoded bytes plus a trailing NUL are stored in the token
//! - **Punctuators**: `== != <= >= ->` before any of
//!   `+ - * / & | ^ % ! = < > ( ) { } [ ] , ; . #`
//! - **Comments**: `// ...` to end of line and `/* ... */`
//!
//! # Module Structure
//!
//! - [`error`] - Error types for lexical analysis
//! - [`cursor`] - Position tracking and character navigation
//! - [`skip`] - Whitespace and comment handling
//! - [`tokens`] - Token recognition and reading
//! - `tests` - Unit tests (test-only)
//!
//! # See Also
//!
//! * [`crate::token`] - Token type definitions
//! * [`crate::preprocess`] - Directive expansion over the token stream

mod cursor;
mod error;
mod skip;
mod tokens;

#[cfg(test)]
mod tests;

pub use error::LexError;

use crate::token::{Span, Token, TokenKind};

/// A lexical analyzer over one source file.
///
/// The `Lexer` maintains its position within the input and tracks
/// line/column numbers for error reporting. It is designed to be used once
/// per source file.
///
/// # Lifetime
///
/// The `'a` lifetime parameter ties the lexer to the input string slice,
/// ensuring the input remains valid while the lexer is in use.
pub struct Lexer<'a> {
    /// The source text being tokenized.
    pub(super) input: &'a str,
    /// Index of the file in the source map (stamped into every span).
    pub(super) file: usize,
    /// Current byte position in the input.
    pub(super) pos: usize,
    /// Current line number (1-indexed).
    pub(super) line: usize,
    /// Current column number (1-indexed).
    pub(super) column: usize,
    /// True if the next emitted token is the first on its line.
    pub(super) at_line_start: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a new `Lexer` for the given input text.
    ///
    /// `file` is the source-map index of the text; it is recorded in every
    /// emitted span so diagnostics can find the right file.
    pub fn new(input: &'a str, file: usize) -> Self {
        Lexer {
            input,
            file,
            pos: 0,
            line: 1,
            column: 1,
            at_line_start: true,
        }
    }

    /// Tokenizes the entire input and returns a vector of tokens.
    ///
    /// The returned vector always ends with a [`TokenKind::Eof`] token.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A character outside the language's alphabet is encountered
    /// - A string literal runs into a newline or the end of input
    /// - A block comment is never closed
    /// - An integer literal exceeds the `i64` range
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments()?;

            if self.is_eof() {
                let span = Span::new(self.file, self.pos, self.pos, self.line, self.column);
                tokens.push(Token::new(TokenKind::Eof, span, self.at_line_start));
                break;
            }

            let at_line_start = self.at_line_start;
            let mut token = self.next_token()?;
            token.at_line_start = at_line_start;
            self.at_line_start = false;
            tokens.push(token);
        }

        Ok(tokens)
    }
}
