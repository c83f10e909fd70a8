//! Unit tests for the lexer module.

use super::*;
use crate::token::TokenKind;

/// Helper function to tokenize input and return only the kinds.
pub(super) fn tokenize_kinds(input: &str) -> Vec<TokenKind> {
    let mut lexer = Lexer::new(input, 0);
    lexer
        .tokenize()
        .unwrap_or_else(|e| panic!("Tokenization failed for input {:?}: {}", input, e))
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

/// Helper function to tokenize input and return the full tokens.
pub(super) fn tokenize_ok(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input, 0);
    lexer
        .tokenize()
        .unwrap_or_else(|e| panic!("Tokenization failed for input {:?}: {}", input, e))
}

/// Helper function to tokenize input and return the error.
pub(super) fn tokenize_error(input: &str) -> LexError {
    let mut lexer = Lexer::new(input, 0);
    match lexer.tokenize() {
        Ok(tokens) => panic!(
            "Expected tokenization to fail for input {:?}, but it succeeded with {} tokens",
            input,
            tokens.len()
        ),
        Err(e) => e,
    }
}

/// Shorthand for an expected punctuator or keyword kind.
pub(super) fn punct(s: &str) -> TokenKind {
    TokenKind::Punct(s.to_string())
}

/// Shorthand for an expected identifier kind.
pub(super) fn ident(s: &str) -> TokenKind {
    TokenKind::Ident(s.to_string())
}
