//! Statement parsing.

use super::Parser;
use super::error::ParseError;
use crate::ast::{Expr, ExprKind, Stmt, StmtKind};

impl Parser {
    /// Parses the statements of a block; the opening brace is already
    /// consumed, the closing brace is consumed here.
    ///
    /// Each finished statement is run through the type annotator before
    /// the next is parsed, so every subtree is fully typed as soon as it
    /// exists.
    pub(super) fn compound_stmt(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.enter_scope();

        let mut stmts = Vec::new();
        while !self.consume("}") {
            let mut stmt = if self.is_typename() {
                self.declaration()?
            } else {
                self.stmt()?
            };
            self.add_stmt_type(&mut stmt)?;
            stmts.push(stmt);
        }

        self.leave_scope();
        Ok(stmts)
    }

    /// Parses one statement.
    pub(super) fn stmt(&mut self) -> Result<Stmt, ParseError> {
        let span = self.current_span();

        if self.consume("return") {
            let value = self.expr()?;
            self.expect(";")?;
            return Ok(Stmt::new(StmtKind::Return(value), span));
        }

        if self.consume("if") {
            self.expect("(")?;
            let cond = self.expr()?;
            self.expect(")")?;
            let then = Box::new(self.stmt()?);
            let els = if self.consume("else") {
                Some(Box::new(self.stmt()?))
            } else {
                None
            };
            return Ok(Stmt::new(StmtKind::If { cond, then, els }, span));
        }

        if self.consume("while") {
            self.expect("(")?;
            let cond = self.expr()?;
            self.expect(")")?;
            let body = Box::new(self.stmt()?);
            return Ok(Stmt::new(StmtKind::While { cond, body }, span));
        }

        if self.consume("for") {
            self.expect("(")?;

            let init = if self.current().is(";") {
                None
            } else {
                Some(Box::new(self.expr_stmt()?))
            };
            self.expect(";")?;

            // An empty condition loops forever; materialize it as `1`.
            let cond = if self.current().is(";") {
                Expr::new(ExprKind::Num(1), self.current_span())
            } else {
                self.expr()?
            };
            self.expect(";")?;

            let inc = if self.current().is(")") {
                None
            } else {
                Some(Box::new(self.expr_stmt()?))
            };
            self.expect(")")?;

            let body = Box::new(self.stmt()?);
            return Ok(Stmt::new(
                StmtKind::For {
                    init,
                    cond,
                    inc,
                    body,
                },
                span,
            ));
        }

        if self.consume("{") {
            let body = self.compound_stmt()?;
            return Ok(Stmt::new(StmtKind::Block(body), span));
        }

        let stmt = self.expr_stmt()?;
        self.expect(";")?;
        Ok(stmt)
    }

    /// Parses a bare expression statement (no trailing `;`).
    ///
    /// `for` clauses use this directly; ordinary expression statements
    /// consume their semicolon in [`stmt`](Parser::stmt).
    pub(super) fn expr_stmt(&mut self) -> Result<Stmt, ParseError> {
        let span = self.current_span();
        let expr = self.expr()?;
        Ok(Stmt::new(StmtKind::Expr(expr), span))
    }
}
