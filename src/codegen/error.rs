//! Code generation error types.
//!
//! This module defines [`CodegenError`], which represents errors that can
//! occur while emitting assembly.

use crate::token::Span;

/// An error that occurred during code generation.
///
/// Contains a human-readable message and optionally the source location
/// where the error occurred, enabling rich error reporting.
#[derive(Debug)]
pub struct CodegenError {
    /// A human-readable description of the error.
    pub message: String,
    /// The source location where the error occurred, if available.
    pub span: Option<Span>,
}

impl CodegenError {
    /// Creates an error for assigning to or taking the address of a value
    /// with no storage location.
    pub fn not_an_lvalue(span: Span) -> Self {
        CodegenError {
            message: "not an lvalue".to_string(),
            span: Some(span),
        }
    }

    /// Creates an error for a call with more arguments than there are
    /// parameter registers.
    pub fn too_many_args(span: Span) -> Self {
        CodegenError {
            message: "too many function arguments (at most 6 are supported)".to_string(),
            span: Some(span),
        }
    }

    /// Creates an internal error for trees the earlier passes can never
    /// hand over. Seeing this message indicates a compiler bug.
    pub fn internal(what: &str, span: Option<Span>) -> Self {
        CodegenError {
            message: format!("internal error: {}", what),
            span,
        }
    }
}

/// Write failures on the output sink surface as codegen errors.
impl From<std::io::Error> for CodegenError {
    fn from(error: std::io::Error) -> Self {
        CodegenError {
            message: format!("failed to write assembly: {}", error),
            span: None,
        }
    }
}

impl std::fmt::Display for CodegenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(span) = &self.span {
            write!(f, "{}:{}: {}", span.line, span.column, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for CodegenError {}
