//! The mincc compiler library.
//!
//! This library provides the core components of mincc, a small compiler
//! for a C-like language that emits x86-64 System V assembly:
//! tokenization, preprocessing, parsing, type annotation, and code
//! generation.
//!
//! # Modules
//!
//! - [`source`] - In-memory source file storage
//! - [`token`] - Token types and source location tracking
//! - [`lexer`] - Lexical analysis (tokenization)
//! - [`preprocess`] - `#include` splicing and object-like macro expansion
//! - [`ast`] - Abstract Syntax Tree and type definitions
//! - [`parser`] - Recursive descent parser with scoped symbol tables
//! - [`typing`] - Expression type annotation
//! - [`codegen`] - x86-64 assembly generation
//!
//! # Example
//!
//! ```
//! use mincc::codegen;
//! use mincc::lexer::Lexer;
//! use mincc::parser::Parser;
//! use mincc::preprocess::preprocess;
//! use mincc::source::SourceMap;
//! use mincc::typing;
//!
//! let source = "int main() { return 0; }";
//!
//! let mut sources = SourceMap::new();
//! let file = sources.add("main.c", source);
//!
//! let tokens = Lexer::new(source, file).tokenize().expect("lex error");
//! let tokens = preprocess(tokens, &mut sources).expect("preprocess error");
//! let mut program = Parser::new(tokens).parse().expect("parse error");
//! typing::annotate(&mut program).expect("type error");
//!
//! let mut asm = Vec::new();
//! codegen::codegen(&program, &mut asm).expect("codegen error");
//! assert!(String::from_utf8(asm).unwrap().contains("main:"));
//! ```

pub mod ast;
pub mod codegen;
pub mod lexer;
pub mod parser;
pub mod preprocess;
pub mod source;
pub mod token;
pub mod typing;
