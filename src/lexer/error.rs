//! Lexical analysis error types.
//!
//! This module defines [`LexError`], which represents errors that can occur
//! during tokenization.

use crate::token::Span;

/// An error that occurred during lexical analysis.
///
/// `LexError` contains a human-readable message and the source location
/// where the error occurred, enabling rich error reporting with tools
/// like [`ariadne`].
///
/// [`ariadne`]: https://docs.rs/ariadne
#[derive(Debug)]
pub struct LexError {
    /// A human-readable description of the error.
    pub message: String,
    /// The source location where the error occurred.
    pub span: Span,
}

impl LexError {
    /// Creates a "stray character" error for a byte outside the language's
    /// alphabet.
    pub fn stray_character(c: char, span: Span) -> Self {
        LexError {
            message: format!("stray character '{}'", c.escape_default()),
            span,
        }
    }

    /// Creates an error for a string literal that runs into a newline or
    /// the end of input.
    pub fn unclosed_string_literal(span: Span) -> Self {
        LexError {
            message: "unclosed string literal".to_string(),
            span,
        }
    }

    /// Creates an error for a `/*` comment that is never closed.
    pub fn unclosed_block_comment(span: Span) -> Self {
        LexError {
            message: "unclosed block comment".to_string(),
            span,
        }
    }

    /// Creates an error for an integer literal that does not fit in `i64`.
    pub fn integer_overflow(literal: &str, span: Span) -> Self {
        LexError {
            message: format!("integer literal '{}' is too large", literal),
            span,
        }
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: {}",
            self.span.line, self.span.column, self.message
        )
    }
}

impl std::error::Error for LexError {}
