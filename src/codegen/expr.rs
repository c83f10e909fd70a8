//! Expression lowering: values, lvalues, loads, and stores.

use std::io;

use super::Codegen;
use super::error::CodegenError;
use crate::ast::{BinaryOp, Expr, ExprKind, Function, StmtKind, Type, TypeKind, VarRef};

impl<'a, W: io::Write> Codegen<'a, W> {
    /// Returns the decorated type of an expression.
    ///
    /// The type annotator runs before code generation, so a missing type
    /// is a compiler bug, not a user error.
    fn ty_of<'e>(&self, expr: &'e Expr) -> Result<&'e Type, CodegenError> {
        expr.ty.as_ref().ok_or_else(|| {
            CodegenError::internal("expression reached codegen without a type", Some(expr.span))
        })
    }

    /// Emits code that pushes the expression's value.
    ///
    /// Array-typed expressions push their address instead (arrays decay
    /// to pointers when used as values).
    pub(super) fn gen_expr(&mut self, function: &Function, expr: &Expr) -> Result<(), CodegenError> {
        match &expr.kind {
            ExprKind::Num(value) => {
                // `push` takes a sign-extended 32-bit immediate; larger
                // constants go through %rax.
                if let Ok(small) = i32::try_from(*value) {
                    writeln!(self.out, "  push ${}", small)?;
                } else {
                    writeln!(self.out, "  movabs ${}, %rax", value)?;
                    writeln!(self.out, "  push %rax")?;
                }
                self.depth += 1;
            }

            ExprKind::Null => {
                writeln!(self.out, "  push $0")?;
                self.depth += 1;
            }

            ExprKind::Var(_) | ExprKind::Member { .. } => {
                self.gen_addr(function, expr)?;
                let ty = self.ty_of(expr)?;
                if !matches!(ty.kind, TypeKind::Array { .. }) {
                    self.load(ty)?;
                }
            }

            ExprKind::Deref(operand) => {
                self.gen_expr(function, operand)?;
                let ty = self.ty_of(expr)?;
                if !matches!(ty.kind, TypeKind::Array { .. }) {
                    self.load(ty)?;
                }
            }

            ExprKind::Addr(operand) => {
                self.gen_addr(function, operand)?;
            }

            ExprKind::Assign { lhs, rhs } => {
                self.gen_addr(function, lhs)?;
                self.gen_expr(function, rhs)?;
                let ty = self.ty_of(expr)?;
                self.store(ty)?;
            }

            ExprKind::Cast(operand) => {
                self.gen_expr(function, operand)?;
                let ty = self.ty_of(expr)?;
                self.truncate(ty)?;
            }

            ExprKind::Comma { lhs, rhs } => {
                self.gen_expr(function, lhs)?;
                writeln!(self.out, "  add $8, %rsp")?;
                self.depth -= 1;
                self.gen_expr(function, rhs)?;
            }

            ExprKind::StmtExpr(body) => {
                let Some((last, rest)) = body.split_last() else {
                    return Err(CodegenError::internal(
                        "empty statement expression",
                        Some(expr.span),
                    ));
                };
                for stmt in rest {
                    self.gen_stmt(function, stmt)?;
                }
                // The final expression statement keeps its value on the
                // stack instead of discarding it.
                match &last.kind {
                    StmtKind::Expr(value) => self.gen_expr(function, value)?,
                    _ => {
                        return Err(CodegenError::internal(
                            "statement expression without a final expression",
                            Some(last.span),
                        ));
                    }
                }
            }

            ExprKind::FunCall { name, args } => {
                self.gen_funcall(function, expr, name, args)?;
            }

            ExprKind::Binary { op, lhs, rhs } => {
                self.gen_expr(function, lhs)?;
                self.gen_expr(function, rhs)?;
                self.gen_binary(*op, lhs)?;
            }
        }

        Ok(())
    }

    /// Emits code that pushes the address of an lvalue.
    fn gen_addr(&mut self, function: &Function, expr: &Expr) -> Result<(), CodegenError> {
        match &expr.kind {
            ExprKind::Var(VarRef::Local(slot)) => {
                writeln!(self.out, "  lea -{}(%rbp), %rax", self.offsets[*slot])?;
                writeln!(self.out, "  push %rax")?;
                self.depth += 1;
            }

            ExprKind::Var(VarRef::Global(index)) => {
                writeln!(self.out, "  lea {}(%rip), %rax", self.prog.globals[*index].name)?;
                writeln!(self.out, "  push %rax")?;
                self.depth += 1;
            }

            // The address of `*p` is the value of `p`.
            ExprKind::Deref(operand) => self.gen_expr(function, operand)?,

            ExprKind::Member { base, member } => {
                self.gen_addr(function, base)?;
                writeln!(self.out, "  pop %rax")?;
                writeln!(self.out, "  add ${}, %rax", member.offset)?;
                writeln!(self.out, "  push %rax")?;
            }

            _ => return Err(CodegenError::not_an_lvalue(expr.span)),
        }

        Ok(())
    }

    /// Pops an address and pushes the sized value it points to.
    ///
    /// Sub-8-byte integers are sign-extended into the full register.
    fn load(&mut self, ty: &Type) -> Result<(), CodegenError> {
        writeln!(self.out, "  pop %rax")?;
        match ty.size {
            1 => writeln!(self.out, "  movsbq (%rax), %rax")?,
            2 => writeln!(self.out, "  movswq (%rax), %rax")?,
            4 => writeln!(self.out, "  movslq (%rax), %rax")?,
            _ => writeln!(self.out, "  mov (%rax), %rax")?,
        }
        writeln!(self.out, "  push %rax")?;
        Ok(())
    }

    /// Pops a value and an address, stores the value at the store width,
    /// and pushes the value back as the expression result.
    fn store(&mut self, ty: &Type) -> Result<(), CodegenError> {
        writeln!(self.out, "  pop %rdi")?;
        writeln!(self.out, "  pop %rax")?;
        match ty.size {
            1 => writeln!(self.out, "  mov %dil, (%rax)")?,
            2 => writeln!(self.out, "  mov %di, (%rax)")?,
            4 => writeln!(self.out, "  mov %edi, (%rax)")?,
            _ => writeln!(self.out, "  mov %rdi, (%rax)")?,
        }
        writeln!(self.out, "  push %rdi")?;
        self.depth -= 1;
        Ok(())
    }

    /// Narrows the value on the stack top to the cast's target width.
    fn truncate(&mut self, ty: &Type) -> Result<(), CodegenError> {
        let conversion = match ty.size {
            1 => "  movsbq %al, %rax",
            2 => "  movswq %ax, %rax",
            4 => "  movslq %eax, %rax",
            _ => return Ok(()),
        };
        writeln!(self.out, "  pop %rax")?;
        writeln!(self.out, "{}", conversion)?;
        writeln!(self.out, "  push %rax")?;
        Ok(())
    }

    /// Pops both operands and pushes the result of a binary operator.
    ///
    /// Pointer arithmetic scales the integer operand by the size of the
    /// pointed-to type; pointer difference divides by it.
    fn gen_binary(&mut self, op: BinaryOp, lhs: &Expr) -> Result<(), CodegenError> {
        writeln!(self.out, "  pop %rdi")?;
        writeln!(self.out, "  pop %rax")?;
        self.depth -= 2;

        match op {
            BinaryOp::Add => writeln!(self.out, "  add %rdi, %rax")?,
            BinaryOp::Sub => writeln!(self.out, "  sub %rdi, %rax")?,
            BinaryOp::Mul => writeln!(self.out, "  imul %rdi, %rax")?,
            BinaryOp::Div => {
                writeln!(self.out, "  cqo")?;
                writeln!(self.out, "  idiv %rdi")?;
            }

            BinaryOp::PtrAdd => {
                writeln!(self.out, "  imul ${}, %rdi, %rdi", self.pointer_scale(lhs)?)?;
                writeln!(self.out, "  add %rdi, %rax")?;
            }
            BinaryOp::PtrSub => {
                writeln!(self.out, "  imul ${}, %rdi, %rdi", self.pointer_scale(lhs)?)?;
                writeln!(self.out, "  sub %rdi, %rax")?;
            }
            BinaryOp::PtrDiff => {
                writeln!(self.out, "  sub %rdi, %rax")?;
                writeln!(self.out, "  cqo")?;
                writeln!(self.out, "  mov ${}, %rdi", self.pointer_scale(lhs)?)?;
                writeln!(self.out, "  idiv %rdi")?;
            }

            BinaryOp::Eq => {
                writeln!(self.out, "  cmp %rdi, %rax")?;
                writeln!(self.out, "  sete %al")?;
                writeln!(self.out, "  movzb %al, %rax")?;
            }
            BinaryOp::Ne => {
                writeln!(self.out, "  cmp %rdi, %rax")?;
                writeln!(self.out, "  setne %al")?;
                writeln!(self.out, "  movzb %al, %rax")?;
            }
            BinaryOp::Lt => {
                writeln!(self.out, "  cmp %rdi, %rax")?;
                writeln!(self.out, "  setl %al")?;
                writeln!(self.out, "  movzb %al, %rax")?;
            }
            BinaryOp::Le => {
                writeln!(self.out, "  cmp %rdi, %rax")?;
                writeln!(self.out, "  setle %al")?;
                writeln!(self.out, "  movzb %al, %rax")?;
            }
        }

        writeln!(self.out, "  push %rax")?;
        self.depth += 1;
        Ok(())
    }

    /// Returns the element size a pointer operand's arithmetic scales by.
    fn pointer_scale(&self, pointer_operand: &Expr) -> Result<usize, CodegenError> {
        self.ty_of(pointer_operand)?
            .base()
            .map(|base| base.size)
            .ok_or_else(|| {
                CodegenError::internal(
                    "pointer arithmetic on a non-pointer operand",
                    Some(pointer_operand.span),
                )
            })
    }

    /// Emits a call: argument temporaries into registers, alignment pad,
    /// `call`, result push.
    fn gen_funcall(
        &mut self,
        function: &Function,
        expr: &Expr,
        name: &str,
        args: &[usize],
    ) -> Result<(), CodegenError> {
        for (index, &slot) in args.iter().enumerate() {
            if index >= super::ARG_REGS_64.len() {
                return Err(CodegenError::too_many_args(expr.span));
            }
            let reg = super::ARG_REGS_64[index];
            let offset = self.offsets[slot];
            match function.locals[slot].ty.size {
                1 => writeln!(self.out, "  movsbq -{}(%rbp), {}", offset, reg)?,
                2 => writeln!(self.out, "  movswq -{}(%rbp), {}", offset, reg)?,
                4 => writeln!(self.out, "  movslq -{}(%rbp), {}", offset, reg)?,
                _ => writeln!(self.out, "  mov -{}(%rbp), {}", offset, reg)?,
            }
        }

        // Variadic callees read %al as the number of vector arguments;
        // this compiler never passes any.
        writeln!(self.out, "  mov $0, %rax")?;

        // The frame keeps %rsp 16-byte aligned when the value stack is
        // empty; an odd depth needs an 8-byte pad around the call.
        if self.depth % 2 == 1 {
            writeln!(self.out, "  sub $8, %rsp")?;
            writeln!(self.out, "  call {}", name)?;
            writeln!(self.out, "  add $8, %rsp")?;
        } else {
            writeln!(self.out, "  call {}", name)?;
        }

        writeln!(self.out, "  push %rax")?;
        self.depth += 1;
        Ok(())
    }
}
