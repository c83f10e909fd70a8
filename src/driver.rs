//! Compilation driver for the mincc binary.
//!
//! Runs the pipeline (load, tokenize, preprocess, parse, annotate,
//! generate) against a root source file and unifies the per-phase errors
//! for reporting.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::diagnostics;

use mincc::codegen::{self, CodegenError};
use mincc::lexer::{LexError, Lexer};
use mincc::parser::{ParseError, Parser};
use mincc::preprocess::{PreprocessError, preprocess};
use mincc::source::SourceMap;
use mincc::token::Span;
use mincc::typing::{self, TypeError};

/// A compilation error from any phase of the compiler.
///
/// This enum unifies the per-phase error types plus the driver's own I/O
/// failures, so the reporting path has a single input.
pub(crate) enum CompileError {
    /// An error during tokenization of the root file.
    Lex(LexError),
    /// An error during preprocessing (includes lexical errors in included
    /// files).
    Preprocess(PreprocessError),
    /// An error during parsing.
    Parse(ParseError),
    /// An error during type annotation.
    Type(TypeError),
    /// An error during code generation.
    Codegen(CodegenError),
    /// The root source file could not be read.
    FileRead {
        path: String,
        source: io::Error,
    },
    /// The assembly output could not be created or written.
    Output {
        path: String,
        source: io::Error,
    },
}

impl CompileError {
    /// Returns the message and, when one exists, the source span to
    /// report the error at.
    pub(crate) fn parts(&self) -> (String, Option<Span>) {
        match self {
            CompileError::Lex(e) => (e.message.clone(), Some(e.span)),
            CompileError::Preprocess(e) => (e.message.clone(), Some(e.span)),
            CompileError::Parse(e) => (e.message.clone(), Some(e.span)),
            CompileError::Type(e) => (e.message.clone(), Some(e.span)),
            CompileError::Codegen(e) => (e.message.clone(), e.span),
            CompileError::FileRead { path, source } => {
                (format!("cannot open file '{}': {}", path, source), None)
            }
            CompileError::Output { path, source } => (
                format!("cannot write output '{}': {}", path, source),
                None,
            ),
        }
    }
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::Lex(e) => write!(f, "{}", e),
            CompileError::Preprocess(e) => write!(f, "{}", e),
            CompileError::Parse(e) => write!(f, "{}", e),
            CompileError::Type(e) => write!(f, "{}", e),
            CompileError::Codegen(e) => write!(f, "{}", e),
            CompileError::FileRead { path, source } => {
                write!(f, "cannot open file '{}': {}", path, source)
            }
            CompileError::Output { path, source } => {
                write!(f, "cannot write output '{}': {}", path, source)
            }
        }
    }
}

/// Compiles `path`, writing assembly to `out`.
///
/// Every file touched during the run (the root and all includes) is
/// registered in `sources` so diagnostics can show source context.
pub(crate) fn compile(
    path: &str,
    out: &mut dyn Write,
    sources: &mut SourceMap,
) -> Result<(), CompileError> {
    let file = sources
        .load(Path::new(path))
        .map_err(|source| CompileError::FileRead {
            path: path.to_string(),
            source,
        })?;

    // The lexer borrows the text while the preprocessor may grow the map.
    let text = sources.file(file).text.clone();
    let tokens = Lexer::new(&text, file)
        .tokenize()
        .map_err(CompileError::Lex)?;
    let tokens = preprocess(tokens, sources).map_err(CompileError::Preprocess)?;

    let mut program = Parser::new(tokens).parse().map_err(CompileError::Parse)?;
    typing::annotate(&mut program).map_err(CompileError::Type)?;

    codegen::codegen(&program, out).map_err(CompileError::Codegen)?;
    Ok(())
}

/// Compiles `path` to standard output or `output`, reporting any
/// diagnostic.
///
/// # Returns
///
/// The process exit code: 0 on success, 1 on any diagnostic.
pub(crate) fn run(path: &str, output: Option<&str>) -> i32 {
    let mut sources = SourceMap::new();

    let result = match output {
        Some(out_path) => match File::create(out_path) {
            Ok(file) => {
                let mut writer = BufWriter::new(file);
                compile(path, &mut writer, &mut sources).and_then(|()| {
                    writer.flush().map_err(|source| CompileError::Output {
                        path: out_path.to_string(),
                        source,
                    })
                })
            }
            Err(source) => Err(CompileError::Output {
                path: out_path.to_string(),
                source,
            }),
        },
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            compile(path, &mut writer, &mut sources).and_then(|()| {
                writer.flush().map_err(|source| CompileError::Output {
                    path: "<stdout>".to_string(),
                    source,
                })
            })
        }
    };

    match result {
        Ok(()) => 0,
        Err(error) => {
            diagnostics::report_error(&sources, &error);
            1
        }
    }
}
