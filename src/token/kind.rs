//! Token kinds for the mincc lexer.
//!
//! This module defines the [`TokenKind`] enum representing all possible
//! token types in the source language.

/// The kind of token recognized by the lexer.
///
/// Keywords and punctuators share the [`Punct`](TokenKind::Punct) variant:
/// the language's keyword set is fixed and small, and the parser matches
/// both by their source text (via [`Token::is`](super::Token::is)), so a
/// separate variant per keyword would only duplicate the spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// A punctuator or keyword, e.g. `+`, `==`, `->`, `return`, `int`.
    ///
    /// The contained `String` is the exact source text.
    Punct(String),

    /// An identifier (variable, function, typedef, or tag name).
    ///
    /// Identifiers start with an ASCII letter or underscore, followed by
    /// any number of ASCII alphanumerics or underscores.
    Ident(String),

    /// A string literal enclosed in double quotes.
    ///
    /// The contained bytes are the decoded value (escape sequences already
    /// processed) plus a terminating NUL, so the literal can be emitted
    /// verbatim as array-of-char initializer data.
    Str(Vec<u8>),

    /// An integer literal (decimal digits only).
    Num(i64),

    /// End of file marker.
    ///
    /// The lexer always appends this as the final token, ensuring the
    /// token vector is never empty.
    Eof,
}
