//! Type annotation error types.

use crate::token::Span;

/// An error that occurred while decorating expressions with types.
///
/// Contains a human-readable message and the source location of the
/// offending expression.
#[derive(Debug)]
pub struct TypeError {
    /// A human-readable description of the error.
    pub message: String,
    /// The source location where the error occurred.
    pub span: Span,
}

impl TypeError {
    /// Creates an error for arithmetic on an unsupported operand mix
    /// (e.g. adding two pointers).
    pub fn invalid_operands(span: Span) -> Self {
        TypeError {
            message: "invalid operands".to_string(),
            span,
        }
    }

    /// Creates an error for dereferencing a non-pointer value.
    pub fn not_a_pointer(span: Span) -> Self {
        TypeError {
            message: "not a pointer".to_string(),
            span,
        }
    }

    /// Creates an error for a statement expression with no value.
    pub fn void_stmt_expr(span: Span) -> Self {
        TypeError {
            message: "statement expression returning void is not supported".to_string(),
            span,
        }
    }

    /// Creates an internal error for AST shapes the parser can never
    /// produce. Seeing this message indicates a compiler bug.
    pub fn internal(what: &str, span: Span) -> Self {
        TypeError {
            message: format!("internal error: {}", what),
            span,
        }
    }
}

impl std::fmt::Display for TypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: {}",
            self.span.line, self.span.column, self.message
        )
    }
}

impl std::error::Error for TypeError {}
