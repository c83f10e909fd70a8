//! Unit tests for the parser module.

use super::*;
use crate::ast::{BinaryOp, Expr, ExprKind, Function, Stmt, StmtKind, VarRef};
use crate::lexer::Lexer;

/// Lexes and parses a full program.
pub(super) fn parse_program(input: &str) -> Program {
    let tokens = Lexer::new(input, 0)
        .tokenize()
        .unwrap_or_else(|e| panic!("Tokenization failed for input {:?}: {}", input, e));
    Parser::new(tokens)
        .parse()
        .unwrap_or_else(|e| panic!("Parsing failed for input {:?}: {}", input, e))
}

/// Lexes and parses a program expected to fail, returning the error.
pub(super) fn parse_error_of(input: &str) -> ParseError {
    let tokens = Lexer::new(input, 0)
        .tokenize()
        .unwrap_or_else(|e| panic!("Tokenization failed for input {:?}: {}", input, e));
    match Parser::new(tokens).parse() {
        Ok(_) => panic!("Expected parsing to fail for input {:?}", input),
        Err(e) => e,
    }
}

/// Returns the function named `main`.
pub(super) fn main_fn(program: &Program) -> &Function {
    program
        .functions
        .iter()
        .find(|f| f.name == "main")
        .expect("program has no main function")
}

/// Returns the expression of the `n`-th top-level expression statement in
/// `main` (declarations and other statements are skipped).
pub(super) fn nth_expr_stmt<'a>(program: &'a Program, n: usize) -> &'a Expr {
    main_fn(program)
        .body
        .iter()
        .filter_map(|stmt| match &stmt.kind {
            StmtKind::Expr(expr) => Some(expr),
            _ => None,
        })
        .nth(n)
        .expect("not enough expression statements in main")
}

/// Returns the expression of the first `return` statement in `main`.
pub(super) fn return_expr<'a>(program: &'a Program) -> &'a Expr {
    main_fn(program)
        .body
        .iter()
        .find_map(|stmt| match &stmt.kind {
            StmtKind::Return(expr) => Some(expr),
            _ => None,
        })
        .expect("main has no return statement")
}

mod scopes;
