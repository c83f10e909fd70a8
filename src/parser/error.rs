//! Parse error types.

use crate::token::Span;
use crate::typing::TypeError;

/// An error that occurred during parsing.
///
/// `ParseError` contains a human-readable message and the source location
/// where the error occurred, enabling rich error reporting.
///
/// # See Also
///
/// * [`crate::lexer::LexError`] - Similar error type for lexical errors
#[derive(Debug)]
pub struct ParseError {
    /// A human-readable description of the error.
    pub message: String,
    /// The source location where the error occurred.
    pub span: Span,
}

impl ParseError {
    /// Creates an error for a token that differs from the expected one.
    pub fn expected(expected: &str, found: &str, span: Span) -> Self {
        ParseError {
            message: format!("expected '{}', found {}", expected, found),
            span,
        }
    }

    /// Creates an error for a missing identifier.
    pub fn expected_identifier(span: Span) -> Self {
        ParseError {
            message: "expected an identifier".to_string(),
            span,
        }
    }

    /// Creates an error for a declarator without a name.
    pub fn expected_variable_name(span: Span) -> Self {
        ParseError {
            message: "expected a variable name".to_string(),
            span,
        }
    }

    /// Creates an error for a missing number (array lengths).
    pub fn expected_number(span: Span) -> Self {
        ParseError {
            message: "expected a number".to_string(),
            span,
        }
    }

    /// Creates an error for a token that cannot begin an expression.
    pub fn expected_expression(span: Span) -> Self {
        ParseError {
            message: "expected an expression".to_string(),
            span,
        }
    }

    /// Creates an error for an unacceptable base-type combination
    /// (e.g. `long char`).
    pub fn invalid_type(span: Span) -> Self {
        ParseError {
            message: "invalid type".to_string(),
            span,
        }
    }

    /// Creates an error for a name with no visible definition.
    pub fn undefined_variable(name: &str, span: Span) -> Self {
        ParseError {
            message: format!("undefined variable '{}'", name),
            span,
        }
    }

    /// Creates an error for member access on a non-aggregate value.
    pub fn not_a_struct(span: Span) -> Self {
        ParseError {
            message: "not a struct".to_string(),
            span,
        }
    }

    /// Creates an error for a member name missing from the aggregate.
    pub fn no_such_member(name: &str, span: Span) -> Self {
        ParseError {
            message: format!("no such member '{}'", name),
            span,
        }
    }

    /// Creates an error for a `struct Tag` reference with no visible tag.
    pub fn unknown_struct_type(span: Span) -> Self {
        ParseError {
            message: "unknown struct type".to_string(),
            span,
        }
    }

    /// Creates an error for declaring a variable of type `void`.
    pub fn void_variable(span: Span) -> Self {
        ParseError {
            message: "variable declared void".to_string(),
            span,
        }
    }

    /// Creates an error for `typedef` in a position that takes no storage
    /// class (parameters, casts, `sizeof`).
    pub fn storage_class_not_allowed(span: Span) -> Self {
        ParseError {
            message: "storage class specifier is not allowed in this context".to_string(),
            span,
        }
    }

    /// Creates an error for a statement expression whose last statement is
    /// not an expression statement.
    pub fn void_stmt_expr(span: Span) -> Self {
        ParseError {
            message: "statement expression returning void is not supported".to_string(),
            span,
        }
    }

    /// Creates an internal error for states the grammar can never reach.
    /// Seeing this message indicates a compiler bug.
    pub fn internal(what: &str, span: Span) -> Self {
        ParseError {
            message: format!("internal error: {}", what),
            span,
        }
    }
}

/// Type errors raised while the parser classifies operators surface as
/// parse errors; the message and span carry over unchanged.
impl From<TypeError> for ParseError {
    fn from(error: TypeError) -> Self {
        ParseError {
            message: error.message,
            span: error.span,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: {}",
            self.span.line, self.span.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}
