//! Preprocessing error types.

use std::path::Path;

use crate::lexer::LexError;
use crate::token::Span;

/// An error that occurred during preprocessing.
///
/// `PreprocessError` contains a human-readable message and the source
/// location of the offending directive token, enabling rich error
/// reporting.
///
/// # See Also
///
/// * [`crate::lexer::LexError`] - Similar error type for lexical errors
#[derive(Debug)]
pub struct PreprocessError {
    /// A human-readable description of the error.
    pub message: String,
    /// The source location where the error occurred.
    pub span: Span,
}

impl PreprocessError {
    /// Creates an error for an `#include` whose file cannot be read.
    pub fn cannot_open(path: &Path, cause: &std::io::Error, span: Span) -> Self {
        PreprocessError {
            message: format!("cannot open included file: {}: {}", path.display(), cause),
            span,
        }
    }

    /// Creates an error for an `#include` not followed by a string literal.
    pub fn expected_string_literal(span: Span) -> Self {
        PreprocessError {
            message: "expected a string literal".to_string(),
            span,
        }
    }

    /// Creates an error for a `#define` not followed by a macro name.
    pub fn expected_identifier(span: Span) -> Self {
        PreprocessError {
            message: "expected an identifier".to_string(),
            span,
        }
    }

    /// Creates an error for an unrecognized directive name.
    pub fn invalid_directive(span: Span) -> Self {
        PreprocessError {
            message: "invalid preprocessor directive".to_string(),
            span,
        }
    }

    /// Creates an error for an include chain that exceeds the nesting cap.
    pub fn include_too_deep(span: Span) -> Self {
        PreprocessError {
            message: "#include nested too deeply".to_string(),
            span,
        }
    }
}

/// Lexical errors inside included files surface through the preprocessor;
/// the message and span carry over unchanged.
impl From<LexError> for PreprocessError {
    fn from(error: LexError) -> Self {
        PreprocessError {
            message: error.message,
            span: error.span,
        }
    }
}

impl std::fmt::Display for PreprocessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: {}",
            self.span.line, self.span.column, self.message
        )
    }
}

impl std::error::Error for PreprocessError {}
