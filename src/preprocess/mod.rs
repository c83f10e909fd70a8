//! Preprocessor for the mincc compiler.
//!
//! This module expands the token stream produced by the lexer into the
//! stream the parser consumes: `#include "..."` trees are spliced in place
//! and object-like `#define` macros are expanded.
//!
//! # Overview
//!
//! Directives are line-oriented. A directive is a `#` token that starts a
//! line; its body runs to the last token before the next line-starting
//! token (the lexer records this in
//! [`Token::at_line_start`](crate::token::Token::at_line_start)).
//!
//! Supported directives:
//!
//! - `#define IDENT tok...` records an object-like macro whose body is
//!   the rest of the line (possibly empty). Later occurrences of `IDENT`
//!   are replaced by a copy of the body. Expansion is non-recursive per
//!   token: replacement output is never rescanned.
//! - `#include "path"` loads the referenced file relative to the
//!   directory of the including file, tokenizes and recursively
//!   preprocesses it, and splices the result into the stream. Extra tokens
//!   between the path and the end of the line produce a warning and are
//!   skipped.
//! - `#` alone on a line is a null directive and is dropped.
//!
//! Macros live in a single table for the whole run, so a macro defined in
//! an included file is visible to everything preprocessed after the
//! directive.
//!
//! # See Also
//!
//! * [`crate::lexer`] - Produces the per-file token streams
//! * [`crate::parser`] - Consumes the preprocessed stream

mod error;

#[cfg(test)]
mod tests;

pub use error::PreprocessError;

use std::collections::HashMap;

use crate::lexer::Lexer;
use crate::source::SourceMap;
use crate::token::{Token, TokenKind};

/// Upper bound on `#include` nesting, so an include cycle is reported
/// instead of recursing forever.
const MAX_INCLUDE_DEPTH: usize = 64;

/// Preprocessor state: the macro table and the current include depth.
struct Preprocessor {
    macros: HashMap<String, Vec<Token>>,
    include_depth: usize,
}

/// Preprocesses a token stream.
///
/// `tokens` is the lexed root file, ending in EOF. `sources` receives every
/// file loaded through `#include`; spans in the output refer into it.
///
/// # Errors
///
/// Returns a [`PreprocessError`] for an unreadable include file, a
/// malformed directive, or a lexical error inside an included file.
pub fn preprocess(
    tokens: Vec<Token>,
    sources: &mut SourceMap,
) -> Result<Vec<Token>, PreprocessError> {
    let eof = tokens.last().cloned();
    let mut pp = Preprocessor {
        macros: HashMap::new(),
        include_depth: 0,
    };
    let mut out = pp.run(&tokens, sources)?;
    if let Some(eof) = eof.filter(Token::is_eof) {
        out.push(eof);
    }
    Ok(out)
}

impl Preprocessor {
    /// Processes one file's token stream, appending everything up to (but
    /// not including) its EOF token to the result.
    fn run(
        &mut self,
        tokens: &[Token],
        sources: &mut SourceMap,
    ) -> Result<Vec<Token>, PreprocessError> {
        let mut out = Vec::with_capacity(tokens.len());
        let mut pos = 0;

        while pos < tokens.len() {
            let tok = &tokens[pos];
            if tok.is_eof() {
                break;
            }

            // Macro expansion. The copied body is appended to the output
            // directly, so it is never rescanned for further expansion.
            if let TokenKind::Ident(name) = &tok.kind {
                if let Some(body) = self.macros.get(name) {
                    out.extend(body.iter().cloned());
                    pos += 1;
                    continue;
                }
            }

            // Anything that is not a line-starting `#` passes through.
            if !(tok.at_line_start && tok.is("#")) {
                out.push(tok.clone());
                pos += 1;
                continue;
            }

            pos = self.directive(tokens, pos, sources, &mut out)?;
        }

        Ok(out)
    }

    /// Handles one directive starting at the `#` token at `pos`; returns
    /// the position of the first token after the directive.
    fn directive(
        &mut self,
        tokens: &[Token],
        pos: usize,
        sources: &mut SourceMap,
        out: &mut Vec<Token>,
    ) -> Result<usize, PreprocessError> {
        let name = match tokens.get(pos + 1) {
            Some(tok) if !tok.at_line_start => tok,
            // `#` alone on its line is a null directive.
            _ => return Ok(pos + 1),
        };

        if name.is("define") {
            return self.define(tokens, pos + 2);
        }

        if name.is("include") {
            return self.include(tokens, pos + 2, sources, out);
        }

        Err(PreprocessError::invalid_directive(name.span))
    }

    /// Records an object-like macro; `pos` is the expected macro name.
    fn define(&mut self, tokens: &[Token], pos: usize) -> Result<usize, PreprocessError> {
        let name_tok = tokens
            .get(pos)
            .filter(|t| !t.at_line_start)
            .ok_or_else(|| PreprocessError::expected_identifier(tokens[pos - 1].span))?;
        let name = name_tok
            .ident()
            .ok_or_else(|| PreprocessError::expected_identifier(name_tok.span))?
            .to_string();

        let mut body = Vec::new();
        let mut pos = pos + 1;
        while tokens.get(pos).is_some_and(|t| !t.at_line_start && !t.is_eof()) {
            body.push(tokens[pos].clone());
            pos += 1;
        }

        // Redefinition replaces the previous body.
        self.macros.insert(name, body);
        Ok(pos)
    }

    /// Splices an included file; `pos` is the expected path string literal.
    fn include(
        &mut self,
        tokens: &[Token],
        pos: usize,
        sources: &mut SourceMap,
        out: &mut Vec<Token>,
    ) -> Result<usize, PreprocessError> {
        let path_tok = tokens
            .get(pos)
            .filter(|t| !t.at_line_start)
            .ok_or_else(|| PreprocessError::expected_string_literal(tokens[pos - 1].span))?;
        let TokenKind::Str(bytes) = &path_tok.kind else {
            return Err(PreprocessError::expected_string_literal(path_tok.span));
        };

        if self.include_depth >= MAX_INCLUDE_DEPTH {
            return Err(PreprocessError::include_too_deep(path_tok.span));
        }

        // The stored literal carries its terminating NUL; drop it.
        let relative = String::from_utf8_lossy(&bytes[..bytes.len().saturating_sub(1)]).into_owned();
        let path = sources.file(path_tok.span.file).dir().join(&relative);
        let file = sources
            .load(&path)
            .map_err(|e| PreprocessError::cannot_open(&path, &e, path_tok.span))?;

        // The lexer borrows the text, so take a copy before handing the
        // source map to the recursive call.
        let text = sources.file(file).text.clone();
        let included = Lexer::new(&text, file).tokenize()?;

        self.include_depth += 1;
        let spliced = self.run(&included, sources)?;
        self.include_depth -= 1;
        out.extend(spliced);

        // Extraneous tokens before the end of the line are skipped with a
        // warning rather than failing the compilation.
        let mut pos = pos + 1;
        if tokens.get(pos).is_some_and(|t| !t.at_line_start && !t.is_eof()) {
            let extra = &tokens[pos];
            eprintln!(
                "warning: {}:{}:{}: extra token after #include",
                sources.file(extra.span.file).name,
                extra.span.line,
                extra.span.column
            );
            while tokens.get(pos).is_some_and(|t| !t.at_line_start && !t.is_eof()) {
                pos += 1;
            }
        }
        Ok(pos)
    }
}
