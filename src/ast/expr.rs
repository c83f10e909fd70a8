//! Expression nodes for the AST.

use crate::token::Span;

use super::program::VarRef;
use super::stmt::Stmt;
use super::types::{Member, Type};

/// A binary operator, after pointer classification.
///
/// The parser rewrites source-level `+` and `-` into the pointer-aware
/// variants based on the operand types; by the time the AST exists there is
/// no unclassified addition. The pointer operand of [`PtrAdd`] and
/// [`PtrSub`] is always the left-hand side.
///
/// [`PtrAdd`]: BinaryOp::PtrAdd
/// [`PtrSub`]: BinaryOp::PtrSub
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// Integer addition.
    Add,
    /// Pointer plus integer (pointer on the left).
    PtrAdd,
    /// Integer subtraction.
    Sub,
    /// Pointer minus integer.
    PtrSub,
    /// Pointer minus pointer, yielding an element count.
    PtrDiff,
    /// Multiplication.
    Mul,
    /// Division.
    Div,
    /// Equality comparison.
    Eq,
    /// Inequality comparison.
    Ne,
    /// Less-than comparison.
    Lt,
    /// Less-than-or-equal comparison.
    Le,
}

/// The kind of an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// An integer literal, including folded `sizeof` values.
    Num(i64),

    /// A reference to a local or global variable.
    Var(VarRef),

    /// A binary operation.
    Binary {
        /// The classified operator.
        op: BinaryOp,
        /// The left operand (the pointer operand for pointer arithmetic).
        lhs: Box<Expr>,
        /// The right operand.
        rhs: Box<Expr>,
    },

    /// An assignment. The left-hand side must be an lvalue.
    Assign {
        /// The assigned-to expression.
        lhs: Box<Expr>,
        /// The value expression.
        rhs: Box<Expr>,
    },

    /// Address-of (`&x`).
    Addr(Box<Expr>),

    /// Dereference (`*p`). Also produced by the `a[b]` desugaring.
    Deref(Box<Expr>),

    /// Struct or union member access (`s.m`; `p->m` desugars through
    /// [`Deref`](ExprKind::Deref)).
    Member {
        /// The aggregate expression.
        base: Box<Expr>,
        /// The resolved member (name, type, offset).
        member: Member,
    },

    /// A cast to the type stored in the node's `ty`.
    Cast(Box<Expr>),

    /// The comma operator; evaluates `lhs`, discards it, yields `rhs`.
    Comma {
        /// The discarded operand.
        lhs: Box<Expr>,
        /// The resulting operand.
        rhs: Box<Expr>,
    },

    /// A call, after argument materialization.
    ///
    /// `args` holds the local slots of the per-argument temporaries; the
    /// assignments that fill them are chained in front of this node with
    /// [`Comma`](ExprKind::Comma), so arguments evaluate left to right.
    FunCall {
        /// The callee name (unmangled).
        name: String,
        /// Local slots of the argument temporaries, in argument order.
        args: Vec<usize>,
    },

    /// A statement expression `({ ...; expr; })`.
    ///
    /// The last statement is an expression statement whose value becomes
    /// the value of the whole construct.
    StmtExpr(Vec<Stmt>),

    /// A no-op expression used to seed call-argument comma chains.
    Null,
}

/// An expression with its source location and decorated type.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    /// The kind of expression.
    pub kind: ExprKind,
    /// The result type, filled in by the type annotator.
    ///
    /// `None` only before annotation; every expression is typed before
    /// code generation sees it.
    pub ty: Option<Type>,
    /// The representative source location of this expression.
    pub span: Span,
}

impl Expr {
    /// Creates a new, not-yet-typed expression.
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr {
            kind,
            ty: None,
            span,
        }
    }

    /// Creates an expression with a preset type (casts, folded constants).
    pub fn with_ty(kind: ExprKind, ty: Type, span: Span) -> Self {
        Expr {
            kind,
            ty: Some(ty),
            span,
        }
    }
}
