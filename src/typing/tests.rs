//! Unit tests for the type annotator.

use super::*;
use crate::ast::{Member, Var};
use crate::token::Span;

fn dummy_span() -> Span {
    Span::new(0, 0, 0, 1, 1)
}

fn num(value: i64) -> Expr {
    Expr::new(ExprKind::Num(value), dummy_span())
}

fn var(slot: usize) -> Expr {
    Expr::new(ExprKind::Var(VarRef::Local(slot)), dummy_span())
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::new(
        ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
        dummy_span(),
    )
}

/// Locals: 0 = `int n`, 1 = `int *p`, 2 = `char buf[8]`.
fn locals() -> Vec<Var> {
    vec![
        Var {
            name: "n".to_string(),
            ty: Type::int(),
        },
        Var {
            name: "p".to_string(),
            ty: Type::pointer_to(Type::int()),
        },
        Var {
            name: "buf".to_string(),
            ty: Type::array_of(Type::char_type(), 8),
        },
    ]
}

fn annotated(mut expr: Expr) -> Expr {
    let locals = locals();
    let ctx = TypeContext::new(&locals, &[]);
    annotate_expr(&mut expr, &ctx).expect("annotation failed");
    expr
}

fn annotation_error(mut expr: Expr) -> TypeError {
    let locals = locals();
    let ctx = TypeContext::new(&locals, &[]);
    annotate_expr(&mut expr, &ctx).expect_err("annotation should fail")
}

#[test]
fn test_num_is_int() {
    assert_eq!(annotated(num(5)).ty, Some(Type::int()));
}

#[test]
fn test_var_takes_declared_type() {
    assert_eq!(annotated(var(0)).ty, Some(Type::int()));
    assert_eq!(annotated(var(1)).ty, Some(Type::pointer_to(Type::int())));
}

#[test]
fn test_global_var() {
    let globals = vec![crate::ast::GlobalVar {
        name: "g".to_string(),
        ty: Type::long(),
        init: None,
    }];
    let ctx = TypeContext::new(&[], &globals);
    let mut expr = Expr::new(ExprKind::Var(VarRef::Global(0)), dummy_span());
    annotate_expr(&mut expr, &ctx).unwrap();
    assert_eq!(expr.ty, Some(Type::long()));
}

#[test]
fn test_arithmetic_takes_lhs_type() {
    let expr = annotated(binary(BinaryOp::PtrAdd, var(1), num(2)));
    assert_eq!(expr.ty, Some(Type::pointer_to(Type::int())));
}

#[test]
fn test_comparisons_are_int() {
    for op in [BinaryOp::Eq, BinaryOp::Ne, BinaryOp::Lt, BinaryOp::Le] {
        assert_eq!(annotated(binary(op, var(1), var(1))).ty, Some(Type::int()));
    }
}

#[test]
fn test_ptr_diff_is_int() {
    let expr = annotated(binary(BinaryOp::PtrDiff, var(1), var(1)));
    assert_eq!(expr.ty, Some(Type::int()));
}

#[test]
fn test_deref_of_pointer() {
    let expr = annotated(Expr::new(ExprKind::Deref(Box::new(var(1))), dummy_span()));
    assert_eq!(expr.ty, Some(Type::int()));
}

#[test]
fn test_deref_of_array_yields_element() {
    let expr = annotated(Expr::new(ExprKind::Deref(Box::new(var(2))), dummy_span()));
    assert_eq!(expr.ty, Some(Type::char_type()));
}

#[test]
fn test_deref_of_int_is_an_error() {
    let error = annotation_error(Expr::new(ExprKind::Deref(Box::new(var(0))), dummy_span()));
    assert_eq!(error.message, "not a pointer");
}

#[test]
fn test_addr_of_var() {
    let expr = annotated(Expr::new(ExprKind::Addr(Box::new(var(0))), dummy_span()));
    assert_eq!(expr.ty, Some(Type::pointer_to(Type::int())));
}

#[test]
fn test_addr_of_array_is_pointer_to_element() {
    let expr = annotated(Expr::new(ExprKind::Addr(Box::new(var(2))), dummy_span()));
    assert_eq!(expr.ty, Some(Type::pointer_to(Type::char_type())));
}

#[test]
fn test_member_takes_member_type() {
    let member = Member {
        name: "x".to_string(),
        ty: Type::short(),
        offset: 0,
    };
    let expr = annotated(Expr::new(
        ExprKind::Member {
            base: Box::new(var(0)),
            member,
        },
        dummy_span(),
    ));
    assert_eq!(expr.ty, Some(Type::short()));
}

#[test]
fn test_comma_takes_rhs_type() {
    let expr = annotated(Expr::new(
        ExprKind::Comma {
            lhs: Box::new(num(1)),
            rhs: Box::new(var(1)),
        },
        dummy_span(),
    ));
    assert_eq!(expr.ty, Some(Type::pointer_to(Type::int())));
}

#[test]
fn test_funcall_defaults_to_int() {
    let expr = annotated(Expr::new(
        ExprKind::FunCall {
            name: "f".to_string(),
            args: vec![],
        },
        dummy_span(),
    ));
    assert_eq!(expr.ty, Some(Type::int()));
}

#[test]
fn test_cast_keeps_preset_type() {
    let expr = annotated(Expr::with_ty(
        ExprKind::Cast(Box::new(num(300))),
        Type::char_type(),
        dummy_span(),
    ));
    assert_eq!(expr.ty, Some(Type::char_type()));
}

#[test]
fn test_stmt_expr_takes_last_expression() {
    let body = vec![
        Stmt::new(StmtKind::Expr(num(1)), dummy_span()),
        Stmt::new(StmtKind::Expr(var(1)), dummy_span()),
    ];
    let expr = annotated(Expr::new(ExprKind::StmtExpr(body), dummy_span()));
    assert_eq!(expr.ty, Some(Type::pointer_to(Type::int())));
}

#[test]
fn test_stmt_expr_without_value_is_an_error() {
    let body = vec![Stmt::new(
        StmtKind::Return(num(1)),
        dummy_span(),
    )];
    let error = annotation_error(Expr::new(ExprKind::StmtExpr(body), dummy_span()));
    assert!(error.message.contains("statement expression"));
}

#[test]
fn test_annotation_is_idempotent() {
    let locals = locals();
    let ctx = TypeContext::new(&locals, &[]);

    let mut expr = binary(
        BinaryOp::PtrAdd,
        var(1),
        binary(BinaryOp::Mul, num(2), var(0)),
    );
    annotate_expr(&mut expr, &ctx).unwrap();
    let first = expr.clone();
    annotate_expr(&mut expr, &ctx).unwrap();
    assert_eq!(expr, first);
}
