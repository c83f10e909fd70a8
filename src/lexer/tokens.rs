//! Token reading and recognition for the lexer.
//!
//! This module provides methods for reading the individual token types:
//! numbers, string literals, identifiers/keywords, and punctuators.

use super::Lexer;
use super::error::LexError;
use crate::token::{Token, TokenKind};

/// Keywords of the language.
///
/// Keywords are emitted as [`TokenKind::Punct`] with their text preserved;
/// the parser recognizes them by spelling.
const KEYWORDS: &[&str] = &[
    "return", "if", "else", "while", "for", "int", "char", "short", "long", "void", "struct",
    "union", "typedef", "sizeof",
];

/// Multi-character punctuators, matched before their single-character
/// prefixes so `<=` never lexes as `<` `=`.
const TWO_CHAR_PUNCTS: &[&str] = &["==", "!=", "<=", ">=", "->"];

/// Single-character punctuators.
const SINGLE_CHAR_PUNCTS: &str = "+-*/&|^%!=<>(){}[],;.#";

impl<'a> Lexer<'a> {
    /// Reads and returns the next token from the input.
    ///
    /// Called repeatedly by [`tokenize`](super::Lexer::tokenize); assumes
    /// whitespace and comments have already been skipped and that the input
    /// is not at end of file.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] for a malformed literal or a character that
    /// cannot begin any token.
    pub(super) fn next_token(&mut self) -> Result<Token, LexError> {
        let start_pos = self.pos;
        let start_line = self.line;
        let start_column = self.column;

        let c = match self.current_char() {
            Some(c) => c,
            None => {
                let span = self.span_from(start_pos, start_line, start_column);
                return Ok(Token::new(TokenKind::Eof, span, false));
            }
        };

        if c.is_ascii_digit() {
            return self.read_number(start_pos, start_line, start_column);
        }

        if c == '"' {
            return self.read_string(start_pos, start_line, start_column);
        }

        if c.is_ascii_alphabetic() || c == '_' {
            return self.read_identifier(start_pos, start_line, start_column);
        }

        if let Some(punct) = TWO_CHAR_PUNCTS.iter().find(|p| self.rest().starts_with(**p)) {
            self.advance();
            self.advance();
            let span = self.span_from(start_pos, start_line, start_column);
            return Ok(Token::new(TokenKind::Punct(punct.to_string()), span, false));
        }

        if SINGLE_CHAR_PUNCTS.contains(c) {
            self.advance();
            let span = self.span_from(start_pos, start_line, start_column);
            return Ok(Token::new(TokenKind::Punct(c.to_string()), span, false));
        }

        self.advance();
        let span = self.span_from(start_pos, start_line, start_column);
        Err(LexError::stray_character(c, span))
    }

    /// Reads an integer literal (a run of decimal digits).
    fn read_number(
        &mut self,
        start_pos: usize,
        start_line: usize,
        start_column: usize,
    ) -> Result<Token, LexError> {
        while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        let literal = &self.input[start_pos..self.pos];
        let span = self.span_from(start_pos, start_line, start_column);
        let value: i64 = literal
            .parse()
            .map_err(|_: std::num::ParseIntError| LexError::integer_overflow(literal, span))?;

        Ok(Token::new(TokenKind::Num(value), span, false))
    }

    /// Reads a string literal from the input.
    ///
    /// The opening double quote is at the current position. Escape
    /// sequences are decoded; the resulting bytes plus a terminating NUL
    /// become the token's contents, ready to serve as array-of-char
    /// initializer data.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] if the literal runs into a newline or the end
    /// of input before the closing quote.
    fn read_string(
        &mut self,
        start_pos: usize,
        start_line: usize,
        start_column: usize,
    ) -> Result<Token, LexError> {
        self.advance(); // skip opening "
        let mut contents = Vec::new();

        loop {
            match self.current_char() {
                Some('"') => {
                    self.advance(); // skip closing "
                    contents.push(0);
                    let span = self.span_from(start_pos, start_line, start_column);
                    return Ok(Token::new(TokenKind::Str(contents), span, false));
                }
                Some('\\') => {
                    self.advance(); // skip backslash
                    contents.push(self.read_escaped_char(start_pos, start_line, start_column)?);
                }
                Some('\n') | None => {
                    return Err(LexError::unclosed_string_literal(self.span_from(
                        start_pos,
                        start_line,
                        start_column,
                    )));
                }
                Some(c) => {
                    let mut buf = [0u8; 4];
                    contents.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                    self.advance();
                }
            }
        }
    }

    /// Decodes one escape sequence; the backslash is already consumed.
    ///
    /// Octal escapes (`\0` through `\777`, up to three digits) yield the
    /// encoded byte. The named escapes `n t r a b f v` yield their control
    /// characters. Any other character denotes itself, which also covers
    /// `\\` and `\"`.
    fn read_escaped_char(
        &mut self,
        start_pos: usize,
        start_line: usize,
        start_column: usize,
    ) -> Result<u8, LexError> {
        let c = self.current_char().ok_or_else(|| {
            LexError::unclosed_string_literal(self.span_from(start_pos, start_line, start_column))
        })?;

        if let Some(first) = c.to_digit(8) {
            self.advance();
            let mut value = first;
            for _ in 0..2 {
                match self.current_char().and_then(|d| d.to_digit(8)) {
                    Some(digit) => {
                        value = value * 8 + digit;
                        self.advance();
                    }
                    None => break,
                }
            }
            return Ok(value as u8);
        }

        self.advance();
        Ok(match c {
            'n' => b'\n',
            't' => b'\t',
            'r' => b'\r',
            'a' => 0x07,
            'b' => 0x08,
            'f' => 0x0c,
            'v' => 0x0b,
            _ => c as u8,
        })
    }

    /// Reads an identifier or keyword from the input.
    ///
    /// Identifiers consist of an ASCII letter or underscore followed by any
    /// number of ASCII alphanumerics or underscores. If the text matches a
    /// keyword it is emitted as a [`TokenKind::Punct`] instead.
    fn read_identifier(
        &mut self,
        start_pos: usize,
        start_line: usize,
        start_column: usize,
    ) -> Result<Token, LexError> {
        while self
            .current_char()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.advance();
        }

        let text = &self.input[start_pos..self.pos];
        let span = self.span_from(start_pos, start_line, start_column);

        let kind = if KEYWORDS.contains(&text) {
            TokenKind::Punct(text.to_string())
        } else {
            TokenKind::Ident(text.to_string())
        };

        Ok(Token::new(kind, span, false))
    }
}
