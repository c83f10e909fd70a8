//! Type annotation for the mincc compiler.
//!
//! This module decorates every expression node with its result type.
//! The walk is post-order: children first, then the node's own type is
//! derived. A node that already carries a type is left untouched, which
//! makes the pass idempotent and preserves the preset types of casts and
//! folded constants.
//!
//! The parser calls [`annotate_expr`] eagerly on the operands of `+` and
//! `-` (their pointer classification depends on the operand types) and on
//! every finished statement; [`annotate`] runs the same walk over a whole
//! program, which is what the driver does after parsing.
//!
//! # Typing rules
//!
//! - number and call expressions are `int`
//! - a variable has its declared type
//! - `&x` is pointer-to-`x`'s-type, except `&array` which is pointer to
//!   the element type
//! - `*p` is the base type of a pointer or array; anything else is an
//!   error
//! - assignment and arithmetic take the left operand's type
//! - comparisons and pointer difference are `int`
//! - member access takes the member's type; casts keep their target type
//! - the comma operator takes the right operand's type
//! - a statement expression takes the type of its final expression
//!   statement
//!
//! # See Also
//!
//! * [`crate::parser`] - Calls into this module during parsing
//! * [`crate::codegen`] - Relies on every expression being typed

mod error;

pub use error::TypeError;

use crate::ast::{
    BinaryOp, Expr, ExprKind, Function, GlobalVar, Program, Stmt, StmtKind, Type, TypeKind, Var,
    VarRef,
};
use crate::token::Span;

/// The variable tables an expression's types are derived from.
///
/// Borrowed from the function under construction (in the parser) or from
/// the finished program (in the whole-program pass).
pub struct TypeContext<'a> {
    locals: &'a [Var],
    globals: &'a [GlobalVar],
}

impl<'a> TypeContext<'a> {
    /// Creates a context over the given variable tables.
    pub fn new(locals: &'a [Var], globals: &'a [GlobalVar]) -> Self {
        TypeContext { locals, globals }
    }

    /// Returns the declared type of a variable reference.
    fn var_ty(&self, var: VarRef) -> &Type {
        // Slot indices are created by the parser against these same
        // tables, so they are always in bounds.
        match var {
            VarRef::Local(slot) => &self.locals[slot].ty,
            VarRef::Global(index) => &self.globals[index].ty,
        }
    }
}

/// Decorates every expression in the program with its type.
///
/// Running the pass twice produces identical decorations: nodes that are
/// already typed are skipped.
///
/// # Errors
///
/// Returns a [`TypeError`] for a dereference of a non-pointer or a
/// statement expression without a value.
pub fn annotate(program: &mut Program) -> Result<(), TypeError> {
    let Program { globals, functions } = program;
    for function in functions.iter_mut() {
        let Function { locals, body, .. } = function;
        let ctx = TypeContext::new(locals, globals);
        for stmt in body.iter_mut() {
            annotate_stmt(stmt, &ctx)?;
        }
    }
    Ok(())
}

/// Decorates every expression reachable from one statement.
pub fn annotate_stmt(stmt: &mut Stmt, ctx: &TypeContext) -> Result<(), TypeError> {
    match &mut stmt.kind {
        StmtKind::Expr(expr) | StmtKind::Return(expr) => annotate_expr(expr, ctx),
        StmtKind::If { cond, then, els } => {
            annotate_expr(cond, ctx)?;
            annotate_stmt(then, ctx)?;
            if let Some(els) = els {
                annotate_stmt(els, ctx)?;
            }
            Ok(())
        }
        StmtKind::While { cond, body } => {
            annotate_expr(cond, ctx)?;
            annotate_stmt(body, ctx)
        }
        StmtKind::For {
            init,
            cond,
            inc,
            body,
        } => {
            if let Some(init) = init {
                annotate_stmt(init, ctx)?;
            }
            annotate_expr(cond, ctx)?;
            if let Some(inc) = inc {
                annotate_stmt(inc, ctx)?;
            }
            annotate_stmt(body, ctx)
        }
        StmtKind::Block(stmts) => {
            for stmt in stmts {
                annotate_stmt(stmt, ctx)?;
            }
            Ok(())
        }
    }
}

/// Decorates one expression (and its children) with result types.
///
/// Already-typed nodes return immediately; see the module docs for the
/// rules applied to the rest.
pub fn annotate_expr(expr: &mut Expr, ctx: &TypeContext) -> Result<(), TypeError> {
    if expr.ty.is_some() {
        return Ok(());
    }

    let ty = match &mut expr.kind {
        ExprKind::Num(_) | ExprKind::Null | ExprKind::FunCall { .. } => Type::int(),

        ExprKind::Var(var) => ctx.var_ty(*var).clone(),

        ExprKind::Binary { op, lhs, rhs } => {
            annotate_expr(lhs, ctx)?;
            annotate_expr(rhs, ctx)?;
            match op {
                BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Le | BinaryOp::PtrDiff => {
                    Type::int()
                }
                BinaryOp::Add
                | BinaryOp::PtrAdd
                | BinaryOp::Sub
                | BinaryOp::PtrSub
                | BinaryOp::Mul
                | BinaryOp::Div => lhs_type(lhs, expr.span)?,
            }
        }

        ExprKind::Assign { lhs, rhs } => {
            annotate_expr(lhs, ctx)?;
            annotate_expr(rhs, ctx)?;
            lhs_type(lhs, expr.span)?
        }

        ExprKind::Addr(operand) => {
            annotate_expr(operand, ctx)?;
            let operand_ty = lhs_type(operand, expr.span)?;
            // Taking the address of an array yields a pointer to its
            // element type, matching the array's decayed value.
            match operand_ty.kind {
                TypeKind::Array { base, .. } => Type::pointer_to(*base),
                _ => Type::pointer_to(operand_ty),
            }
        }

        ExprKind::Deref(operand) => {
            annotate_expr(operand, ctx)?;
            match operand.ty.as_ref().and_then(|ty| ty.base()) {
                Some(base) => base.clone(),
                None => return Err(TypeError::not_a_pointer(expr.span)),
            }
        }

        ExprKind::Member { base, member } => {
            annotate_expr(base, ctx)?;
            member.ty.clone()
        }

        ExprKind::Cast(operand) => {
            // Casts are created with their target type preset, so this arm
            // is reachable only for a malformed tree.
            annotate_expr(operand, ctx)?;
            return Err(TypeError::internal("cast without a target type", expr.span));
        }

        ExprKind::Comma { lhs, rhs } => {
            annotate_expr(lhs, ctx)?;
            annotate_expr(rhs, ctx)?;
            lhs_type(rhs, expr.span)?
        }

        ExprKind::StmtExpr(body) => {
            for stmt in body.iter_mut() {
                annotate_stmt(stmt, ctx)?;
            }
            match body.last() {
                Some(Stmt {
                    kind: StmtKind::Expr(last),
                    ..
                }) => lhs_type(last, expr.span)?,
                _ => return Err(TypeError::void_stmt_expr(expr.span)),
            }
        }
    };

    expr.ty = Some(ty);
    Ok(())
}

/// Returns a clone of an already-annotated child's type.
fn lhs_type(expr: &Expr, span: Span) -> Result<Type, TypeError> {
    expr.ty
        .clone()
        .ok_or_else(|| TypeError::internal("operand was not annotated", span))
}

#[cfg(test)]
mod tests;
