//! Common test utilities for mincc integration tests.
//!
//! This module provides shared helper functions used across the
//! integration test files.

// Each test file is compiled as a separate crate, so not all functions
// are used in every test file. This is expected behavior.
#![allow(dead_code)]

use std::path::Path;

use mincc::codegen;
use mincc::lexer::Lexer;
use mincc::parser::Parser;
use mincc::preprocess::preprocess;
use mincc::source::SourceMap;
use mincc::typing;

/// Runs the full pipeline over an in-memory source string.
///
/// The source is registered as `main.c`, so `#include` paths resolve
/// against the current directory; include tests should use
/// [`compile_file`] with a real directory instead.
pub fn compile_to_asm(source: &str) -> Result<String, String> {
    let mut sources = SourceMap::new();
    let file = sources.add("main.c", source);
    compile_loaded(&mut sources, file)
}

/// Runs the full pipeline over a file on disk.
pub fn compile_file(path: &Path) -> Result<String, String> {
    let mut sources = SourceMap::new();
    let file = sources.load(path).map_err(|e| e.to_string())?;
    compile_loaded(&mut sources, file)
}

fn compile_loaded(sources: &mut SourceMap, file: usize) -> Result<String, String> {
    let text = sources.file(file).text.clone();

    let tokens = Lexer::new(&text, file)
        .tokenize()
        .map_err(|e| e.to_string())?;
    let tokens = preprocess(tokens, sources).map_err(|e| e.to_string())?;

    let mut program = Parser::new(tokens).parse().map_err(|e| e.to_string())?;
    typing::annotate(&mut program).map_err(|e| e.to_string())?;

    let mut out = Vec::new();
    codegen::codegen(&program, &mut out).map_err(|e| e.to_string())?;
    String::from_utf8(out).map_err(|e| e.to_string())
}

/// Asserts that the assembly defines the given global symbol.
pub fn assert_defines(asm: &str, symbol: &str) {
    assert!(
        asm.contains(&format!(".globl {}", symbol)) && asm.contains(&format!("{}:", symbol)),
        "assembly does not define {}:\n{}",
        symbol,
        asm
    );
}
