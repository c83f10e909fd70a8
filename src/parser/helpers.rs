//! Parser helper methods for token navigation and basic operations.

use super::Parser;
use super::error::ParseError;
use crate::token::{Span, Token, TokenKind};

impl Parser {
    /// Returns a user-friendly display string for a token.
    pub(super) fn token_display(token: &Token) -> String {
        match &token.kind {
            TokenKind::Punct(s) => format!("'{}'", s),
            TokenKind::Ident(s) => format!("identifier '{}'", s),
            TokenKind::Str(_) => "string literal".to_string(),
            TokenKind::Num(n) => format!("number '{}'", n),
            TokenKind::Eof => "end of file".to_string(),
        }
    }

    /// Returns a reference to the current token.
    ///
    /// Safe to call at any time: past the end it returns the last token,
    /// which the lexer guarantees is `Eof`.
    pub(super) fn current(&self) -> &Token {
        let idx = self.pos.min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    /// Returns the token `n` positions ahead (saturating at `Eof`).
    pub(super) fn peek(&self, n: usize) -> &Token {
        let idx = (self.pos + n).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    /// Returns the span of the current token.
    pub(super) fn current_span(&self) -> Span {
        self.current().span
    }

    /// Returns `true` if the current token is `Eof`.
    pub(super) fn is_eof(&self) -> bool {
        self.current().is_eof()
    }

    /// Advances to the next token.
    ///
    /// Does nothing if already at `Eof`.
    pub(super) fn advance(&mut self) {
        if !self.is_eof() {
            self.pos += 1;
        }
    }

    /// Consumes the current token if it has exactly the given text.
    ///
    /// # Returns
    ///
    /// `true` if the token matched and was consumed.
    pub(super) fn consume(&mut self, text: &str) -> bool {
        if self.current().is(text) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects the current token to have the given text and advances.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] naming the expected and found tokens.
    pub(super) fn expect(&mut self, text: &str) -> Result<(), ParseError> {
        if self.consume(text) {
            Ok(())
        } else {
            Err(ParseError::expected(
                text,
                &Self::token_display(self.current()),
                self.current_span(),
            ))
        }
    }

    /// Expects an identifier token and returns its name and span.
    pub(super) fn expect_identifier(&mut self) -> Result<(String, Span), ParseError> {
        match self.current().ident() {
            Some(name) => {
                let name = name.to_string();
                let span = self.current_span();
                self.advance();
                Ok((name, span))
            }
            None => Err(ParseError::expected_identifier(self.current_span())),
        }
    }

    /// Expects a number token and returns its value.
    pub(super) fn expect_number(&mut self) -> Result<i64, ParseError> {
        match self.current().kind {
            TokenKind::Num(value) => {
                self.advance();
                Ok(value)
            }
            _ => Err(ParseError::expected_number(self.current_span())),
        }
    }
}
