//! Abstract Syntax Tree definitions for the mincc compiler.
//!
//! This module defines the data structures that represent parsed programs.
//! The AST is produced by the [`crate::parser`], decorated by
//! [`crate::typing`], and consumed by [`crate::codegen`].
//!
//! # Structure
//!
//! - [`Program`] - The root node: globals plus function definitions
//! - [`Function`] - A function with its parameters, locals, and body
//! - [`Stmt`] - Statements (expression, return, control flow, blocks)
//! - [`Expr`] - Expressions, each carrying an optional decorated [`Type`]
//! - [`Type`] - The type representation with sizes and alignment
//!
//! Each AST node includes source location information
//! ([`Span`](crate::token::Span)) for error reporting.
//!
//! # Module Structure
//!
//! - [`types`] - Types, members, parameters, and layout
//! - [`expr`] - Expression nodes and operators
//! - [`stmt`] - Statement nodes
//! - [`program`] - Variables, functions, and the program root
//!
//! # See Also
//!
//! * [`crate::parser`] - Produces the AST from tokens
//! * [`crate::typing`] - Decorates expressions with their types
//! * [`crate::codegen`] - Emits assembly from the typed AST

mod expr;
mod program;
mod stmt;
mod types;

pub use expr::{BinaryOp, Expr, ExprKind};
pub use program::{Function, GlobalVar, Program, Var, VarRef};
pub use stmt::{Stmt, StmtKind};
pub use types::{Member, Param, Type, TypeKind, align_to};
