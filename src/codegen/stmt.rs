//! Statement lowering.

use std::io;

use super::Codegen;
use super::error::CodegenError;
use crate::ast::{Function, Stmt, StmtKind};

impl<'a, W: io::Write> Codegen<'a, W> {
    /// Emits code for one statement.
    ///
    /// Every statement leaves the value stack exactly as it found it;
    /// debug builds assert this on exit.
    pub(super) fn gen_stmt(&mut self, function: &Function, stmt: &Stmt) -> Result<(), CodegenError> {
        let entry_depth = self.depth;

        match &stmt.kind {
            StmtKind::Expr(expr) => {
                self.gen_expr(function, expr)?;
                writeln!(self.out, "  add $8, %rsp")?;
                self.depth -= 1;
            }

            StmtKind::Return(expr) => {
                self.gen_expr(function, expr)?;
                writeln!(self.out, "  pop %rax")?;
                self.depth -= 1;
                writeln!(self.out, "  jmp {}", self.return_label)?;
            }

            StmtKind::Block(stmts) => {
                for stmt in stmts {
                    self.gen_stmt(function, stmt)?;
                }
            }

            StmtKind::If { cond, then, els } => {
                let label = self.next_label();
                self.gen_expr(function, cond)?;
                writeln!(self.out, "  pop %rax")?;
                self.depth -= 1;
                writeln!(self.out, "  cmp $0, %rax")?;

                if let Some(els) = els {
                    writeln!(self.out, "  je .L.else.{}", label)?;
                    self.gen_stmt(function, then)?;
                    writeln!(self.out, "  jmp .L.end.{}", label)?;
                    writeln!(self.out, ".L.else.{}:", label)?;
                    self.gen_stmt(function, els)?;
                    writeln!(self.out, ".L.end.{}:", label)?;
                } else {
                    writeln!(self.out, "  je .L.end.{}", label)?;
                    self.gen_stmt(function, then)?;
                    writeln!(self.out, ".L.end.{}:", label)?;
                }
            }

            StmtKind::While { cond, body } => {
                let label = self.next_label();
                writeln!(self.out, ".L.begin.{}:", label)?;
                self.gen_expr(function, cond)?;
                writeln!(self.out, "  pop %rax")?;
                self.depth -= 1;
                writeln!(self.out, "  cmp $0, %rax")?;
                writeln!(self.out, "  je .L.end.{}", label)?;
                self.gen_stmt(function, body)?;
                writeln!(self.out, "  jmp .L.begin.{}", label)?;
                writeln!(self.out, ".L.end.{}:", label)?;
            }

            StmtKind::For {
                init,
                cond,
                inc,
                body,
            } => {
                let label = self.next_label();
                if let Some(init) = init {
                    self.gen_stmt(function, init)?;
                }
                writeln!(self.out, ".L.begin.{}:", label)?;
                self.gen_expr(function, cond)?;
                writeln!(self.out, "  pop %rax")?;
                self.depth -= 1;
                writeln!(self.out, "  cmp $0, %rax")?;
                writeln!(self.out, "  je .L.end.{}", label)?;
                self.gen_stmt(function, body)?;
                if let Some(inc) = inc {
                    self.gen_stmt(function, inc)?;
                }
                writeln!(self.out, "  jmp .L.begin.{}", label)?;
                writeln!(self.out, ".L.end.{}:", label)?;
            }
        }

        debug_assert_eq!(
            self.depth, entry_depth,
            "value stack unbalanced at statement boundary"
        );
        Ok(())
    }
}
