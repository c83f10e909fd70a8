//! End-to-end pipeline tests over representative programs.
//!
//! These run tokenize → preprocess → parse → annotate → codegen and
//! assert on the shape of the emitted assembly.

mod common;

use common::{assert_defines, compile_to_asm};

#[test]
fn test_minimal_program() {
    let asm = compile_to_asm("int main() { return 0; }").expect("compile failed");
    assert_defines(&asm, "main");
    assert!(asm.contains("  push $0"));
    assert!(asm.contains("  jmp .L.return.main"));
    assert!(asm.contains("  ret"));
}

#[test]
fn test_local_arithmetic() {
    let asm = compile_to_asm("int main() { int a=3; int b=4; return a+b; }").expect("compile failed");
    assert!(asm.contains("  add %rdi, %rax"));
}

#[test]
fn test_array_and_pointer_walk() {
    let source = "int main() { int a[3]; a[0]=1; a[1]=2; a[2]=4; int *p=a; return *(p+2); }";
    let asm = compile_to_asm(source).expect("compile failed");
    // Indexing and the explicit pointer walk both scale by sizeof(int).
    assert!(asm.contains("  imul $4, %rdi, %rdi"));
    // The frame holds the 12-byte array plus the pointer.
    assert!(asm.contains("  sub $32, %rsp"));
}

#[test]
fn test_recursion() {
    let source =
        "int fib(int n){ if(n<2) return n; return fib(n-1)+fib(n-2); } int main(){ return fib(10); }";
    let asm = compile_to_asm(source).expect("compile failed");
    assert_defines(&asm, "fib");
    assert_defines(&asm, "main");
    assert!(asm.contains("  call fib"));
    assert!(asm.contains(".L.return.fib:"));
}

#[test]
fn test_struct_members() {
    let source = "struct P{int x; int y;}; int main(){ struct P p; p.x=2; p.y=5; return p.x*p.y; }";
    let asm = compile_to_asm(source).expect("compile failed");
    assert!(asm.contains("  add $4, %rax"));
    assert!(asm.contains("  imul %rdi, %rax"));
}

#[test]
fn test_typedef_program() {
    let asm = compile_to_asm("typedef int T; int main(){ T x=7; return x; }").expect("compile failed");
    assert!(asm.contains("  push $7"));
}

#[test]
fn test_string_literal_program() {
    let asm = compile_to_asm("int main() { char *s; s = \"hi\"; return s[0]; }").expect("compile failed");
    assert!(asm.contains(".L.data.0:"));
    assert!(asm.contains("  .byte 104"));
    assert!(asm.contains("  .byte 105"));
    assert!(asm.contains("  .byte 0"));
    // Reading s[0] is a sized char load.
    assert!(asm.contains("  movsbq (%rax), %rax"));
}

#[test]
fn test_global_variables_program() {
    let asm = compile_to_asm("int counter; int bump() { counter = counter + 1; return counter; } int main() { bump(); return counter; }")
        .expect("compile failed");
    assert!(asm.contains("counter:"));
    assert!(asm.contains("  .zero 4"));
    assert!(asm.contains("  lea counter(%rip), %rax"));
}

#[test]
fn test_loops_and_conditionals() {
    let source = "int main() { int i; int s; s = 0; for (i = 0; i < 10; i = i + 1) { if (i == 5) s = s + 2; else s = s + 1; } while (s > 100) s = s - 1; return s; }";
    let asm = compile_to_asm(source).expect("compile failed");
    assert!(asm.contains(".L.begin.1:"));
    assert!(asm.contains(".L.else."));
    assert!(asm.contains("  sete %al"));
}

#[test]
fn test_statement_expression_program() {
    let asm = compile_to_asm("int main() { return ({ int x; x = 6; x + 1; }); }").expect("compile failed");
    assert_defines(&asm, "main");
}

#[test]
fn test_function_arguments_flow_through_registers() {
    let source = "int add3(int a, int b, int c) { return a + b + c; } int main() { return add3(1, 2, 3); }";
    let asm = compile_to_asm(source).expect("compile failed");
    // Callee side: spills.
    assert!(asm.contains("  mov %edi, -4(%rbp)"));
    assert!(asm.contains("  mov %esi, -8(%rbp)"));
    assert!(asm.contains("  mov %edx, -12(%rbp)"));
    // Caller side: temporaries loaded back into registers.
    assert!(asm.contains("(%rbp), %rdi"));
    assert!(asm.contains("(%rbp), %rsi"));
    assert!(asm.contains("(%rbp), %rdx"));
}

#[test]
fn test_sizeof_folds_to_constant() {
    let asm = compile_to_asm("int main() { int a[4]; return sizeof(a) + sizeof(int); }").expect("compile failed");
    assert!(asm.contains("  push $16"));
    assert!(asm.contains("  push $4"));
}

#[test]
fn test_casts_compile() {
    let asm = compile_to_asm("int main() { long l; l = 300; return (char)l; }").expect("compile failed");
    assert!(asm.contains("  movsbq %al, %rax"));
}

#[test]
fn test_unions_compile() {
    let asm = compile_to_asm("union U { char c; long l; }; int main() { union U u; u.l = 65; return u.c; }")
        .expect("compile failed");
    assert_defines(&asm, "main");
    // Both members sit at offset zero, so no offset add beyond $0.
    assert!(!asm.contains("  add $8, %rax"));
}

#[test]
fn test_comment_forms_are_ignored() {
    let source = "// line comment\nint main() { /* block\ncomment */ return 0; }";
    let asm = compile_to_asm(source).expect("compile failed");
    assert_defines(&asm, "main");
}
