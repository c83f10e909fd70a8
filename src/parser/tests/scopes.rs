//! Tests for scope handling: shadowing, block exit, and the separate tag
//! namespace.

use super::*;

#[test]
fn test_inner_declaration_shadows_outer() {
    let program = parse_program(
        "int main() { int x; { int x; x = 2; } x = 1; return x; }",
    );
    let main = main_fn(&program);
    // Two distinct locals exist.
    assert_eq!(main.locals.iter().filter(|v| v.name == "x").count(), 2);

    // The inner assignment targets the inner slot, the outer one the
    // outer slot.
    let StmtKind::Block(inner) = &main.body[1].kind else {
        panic!("expected inner block");
    };
    let StmtKind::Expr(Expr {
        kind: ExprKind::Assign { lhs, .. },
        ..
    }) = &inner[1].kind
    else {
        panic!("expected assignment in inner block");
    };
    assert!(matches!(lhs.kind, ExprKind::Var(VarRef::Local(1))));

    let StmtKind::Expr(Expr {
        kind: ExprKind::Assign { lhs, .. },
        ..
    }) = &main.body[2].kind
    else {
        panic!("expected assignment after inner block");
    };
    assert!(matches!(lhs.kind, ExprKind::Var(VarRef::Local(0))));
}

#[test]
fn test_name_is_gone_after_block_exit() {
    let error = parse_error_of("int main() { { int y; } return y; }");
    assert!(error.message.contains("undefined variable"));
}

#[test]
fn test_deeply_nested_lookup_reaches_outer() {
    let program = parse_program("int main() { int x; { { { x = 1; } } } return x; }");
    assert_eq!(main_fn(&program).locals.len(), 1);
}

#[test]
fn test_local_shadows_global() {
    let program = parse_program("int g; int main() { int g; g = 1; return g; }");
    assert!(matches!(
        return_expr(&program).kind,
        ExprKind::Var(VarRef::Local(0))
    ));
}

#[test]
fn test_global_visible_after_function_scope() {
    let program = parse_program(
        "int g; int first() { int g; return g; } int main() { return g; }",
    );
    assert!(matches!(
        return_expr(&program).kind,
        ExprKind::Var(VarRef::Global(0))
    ));
}

#[test]
fn test_parameter_out_of_scope_in_next_function() {
    let error = parse_error_of("int f(int a) { return a; } int main() { return a; }");
    assert!(error.message.contains("undefined variable"));
}

#[test]
fn test_variable_shadows_typedef() {
    // Declaring `int T;` hides the typedef, so `T = 3` is an assignment.
    let program = parse_program("typedef int T; int main() { int T; T = 3; return T; }");
    assert!(matches!(
        return_expr(&program).kind,
        ExprKind::Var(VarRef::Local(0))
    ));
}

#[test]
fn test_typedef_restored_after_block() {
    let program = parse_program(
        "typedef int T; int main() { { char T; T = 1; } T x; return x; }",
    );
    // After the block, T is a typedef again and declares an int.
    let x = main_fn(&program)
        .locals
        .iter()
        .find(|v| v.name == "x")
        .expect("x not declared");
    assert_eq!(x.ty, crate::ast::Type::int());
}

#[test]
fn test_tag_scope_is_block_scoped() {
    let error = parse_error_of(
        "int main() { { struct P { int x; }; } struct P p; return 0; }",
    );
    assert_eq!(error.message, "unknown struct type");
}

#[test]
fn test_inner_tag_shadows_outer() {
    let program = parse_program(
        "struct P { int a; int b; };
         int main() { struct P { char c; }; struct P p; return sizeof(p); }",
    );
    assert!(matches!(return_expr(&program).kind, ExprKind::Num(1)));
}

#[test]
fn test_tags_and_variables_are_separate_namespaces() {
    // A variable named P does not hide the tag P.
    let program = parse_program(
        "struct P { int x; }; int main() { int P; struct P p; P = 1; return P; }",
    );
    assert_eq!(main_fn(&program).locals.len(), 2);
}
