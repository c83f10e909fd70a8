//! Expression parsing.
//!
//! One method per precedence level, from the comma operator down to
//! primaries. Source-level `+` and `-` are classified into integer or
//! pointer variants here, which is why the parser types operands eagerly.

use super::Parser;
use super::error::ParseError;
use super::scope::Binding;
use crate::ast::{BinaryOp, Expr, ExprKind, Stmt, StmtKind, Type, VarRef};
use crate::token::{Span, TokenKind};
use crate::typing::TypeError;

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr, span: Span) -> Expr {
    Expr::new(
        ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
        span,
    )
}

impl Parser {
    /// Parses an expression: `assign ("," expr)?`.
    pub(super) fn expr(&mut self) -> Result<Expr, ParseError> {
        let node = self.assign()?;

        if self.current().is(",") {
            let span = self.current_span();
            self.advance();
            let rhs = self.expr()?;
            return Ok(Expr::new(
                ExprKind::Comma {
                    lhs: Box::new(node),
                    rhs: Box::new(rhs),
                },
                span,
            ));
        }

        Ok(node)
    }

    /// Parses an assignment: `equality ("=" assign)?`.
    pub(super) fn assign(&mut self) -> Result<Expr, ParseError> {
        let node = self.equality()?;

        if self.current().is("=") {
            let span = self.current_span();
            self.advance();
            let rhs = self.assign()?;
            return Ok(Expr::new(
                ExprKind::Assign {
                    lhs: Box::new(node),
                    rhs: Box::new(rhs),
                },
                span,
            ));
        }

        Ok(node)
    }

    /// Parses `relational (("==" | "!=") relational)*`.
    fn equality(&mut self) -> Result<Expr, ParseError> {
        let mut node = self.relational()?;

        loop {
            let span = self.current_span();
            if self.consume("==") {
                let rhs = self.relational()?;
                node = binary(BinaryOp::Eq, node, rhs, span);
            } else if self.consume("!=") {
                let rhs = self.relational()?;
                node = binary(BinaryOp::Ne, node, rhs, span);
            } else {
                return Ok(node);
            }
        }
    }

    /// Parses `add (("<" | "<=" | ">" | ">=") add)*`.
    ///
    /// Only `<` and `<=` exist as node kinds; `a > b` is built as `b < a`.
    fn relational(&mut self) -> Result<Expr, ParseError> {
        let mut node = self.add()?;

        loop {
            let span = self.current_span();
            if self.consume("<") {
                let rhs = self.add()?;
                node = binary(BinaryOp::Lt, node, rhs, span);
            } else if self.consume("<=") {
                let rhs = self.add()?;
                node = binary(BinaryOp::Le, node, rhs, span);
            } else if self.consume(">") {
                let rhs = self.add()?;
                node = binary(BinaryOp::Lt, rhs, node, span);
            } else if self.consume(">=") {
                let rhs = self.add()?;
                node = binary(BinaryOp::Le, rhs, node, span);
            } else {
                return Ok(node);
            }
        }
    }

    /// Parses `mul (("+" | "-") mul)*` with pointer classification.
    fn add(&mut self) -> Result<Expr, ParseError> {
        let mut node = self.mul()?;

        loop {
            let span = self.current_span();
            if self.consume("+") {
                let rhs = self.mul()?;
                node = self.new_add(node, rhs, span)?;
            } else if self.consume("-") {
                let rhs = self.mul()?;
                node = self.new_sub(node, rhs, span)?;
            } else {
                return Ok(node);
            }
        }
    }

    /// Classifies `lhs + rhs` by the operand types.
    ///
    /// Integer plus integer is plain addition; pointer (or array) plus
    /// integer becomes [`BinaryOp::PtrAdd`] with the pointer operand moved
    /// to the left. Two pointers cannot be added.
    pub(super) fn new_add(&self, mut lhs: Expr, mut rhs: Expr, span: Span) -> Result<Expr, ParseError> {
        self.add_type(&mut lhs)?;
        self.add_type(&mut rhs)?;

        let lhs_int = lhs.ty.as_ref().is_some_and(|t| t.is_integer());
        let rhs_int = rhs.ty.as_ref().is_some_and(|t| t.is_integer());
        let lhs_ptr = lhs.ty.as_ref().is_some_and(|t| t.base().is_some());
        let rhs_ptr = rhs.ty.as_ref().is_some_and(|t| t.base().is_some());

        if lhs_int && rhs_int {
            return Ok(binary(BinaryOp::Add, lhs, rhs, span));
        }
        if lhs_ptr && rhs_int {
            return Ok(binary(BinaryOp::PtrAdd, lhs, rhs, span));
        }
        if lhs_int && rhs_ptr {
            return Ok(binary(BinaryOp::PtrAdd, rhs, lhs, span));
        }
        Err(TypeError::invalid_operands(span).into())
    }

    /// Classifies `lhs - rhs` by the operand types.
    ///
    /// Integer minus integer is plain subtraction, pointer minus integer
    /// is [`BinaryOp::PtrSub`], pointer minus pointer is
    /// [`BinaryOp::PtrDiff`] (an element count).
    pub(super) fn new_sub(&self, mut lhs: Expr, mut rhs: Expr, span: Span) -> Result<Expr, ParseError> {
        self.add_type(&mut lhs)?;
        self.add_type(&mut rhs)?;

        let lhs_int = lhs.ty.as_ref().is_some_and(|t| t.is_integer());
        let rhs_int = rhs.ty.as_ref().is_some_and(|t| t.is_integer());
        let lhs_ptr = lhs.ty.as_ref().is_some_and(|t| t.base().is_some());
        let rhs_ptr = rhs.ty.as_ref().is_some_and(|t| t.base().is_some());

        if lhs_int && rhs_int {
            return Ok(binary(BinaryOp::Sub, lhs, rhs, span));
        }
        if lhs_ptr && rhs_int {
            return Ok(binary(BinaryOp::PtrSub, lhs, rhs, span));
        }
        if lhs_ptr && rhs_ptr {
            return Ok(binary(BinaryOp::PtrDiff, lhs, rhs, span));
        }
        Err(TypeError::invalid_operands(span).into())
    }

    /// Parses `cast (("*" | "/") cast)*`.
    fn mul(&mut self) -> Result<Expr, ParseError> {
        let mut node = self.cast()?;

        loop {
            let span = self.current_span();
            if self.consume("*") {
                let rhs = self.cast()?;
                node = binary(BinaryOp::Mul, node, rhs, span);
            } else if self.consume("/") {
                let rhs = self.cast()?;
                node = binary(BinaryOp::Div, node, rhs, span);
            } else {
                return Ok(node);
            }
        }
    }

    /// Parses `"(" type-name ")" cast | unary`.
    fn cast(&mut self) -> Result<Expr, ParseError> {
        if self.current().is("(") && self.peek_is_typename(1) {
            let span = self.current_span();
            self.advance();
            let ty = self.type_name()?;
            self.expect(")")?;
            let mut operand = self.cast()?;
            // The operand is typed now; the cast node keeps its preset
            // target type through annotation.
            self.add_type(&mut operand)?;
            return Ok(Expr::with_ty(ExprKind::Cast(Box::new(operand)), ty, span));
        }

        self.unary()
    }

    /// Parses unary operators and `sizeof`.
    fn unary(&mut self) -> Result<Expr, ParseError> {
        let span = self.current_span();

        if self.current().is("sizeof") && self.peek(1).is("(") && self.peek_is_typename(2) {
            self.advance(); // sizeof
            self.advance(); // (
            let ty = self.type_name()?;
            self.expect(")")?;
            return Ok(Expr::new(ExprKind::Num(ty.size as i64), span));
        }

        if self.consume("sizeof") {
            let mut operand = self.cast()?;
            self.add_type(&mut operand)?;
            let size = operand.ty.as_ref().map_or(0, |ty| ty.size);
            return Ok(Expr::new(ExprKind::Num(size as i64), span));
        }

        if self.consume("+") {
            return self.cast();
        }

        if self.consume("-") {
            let zero = Expr::new(ExprKind::Num(0), span);
            let operand = self.cast()?;
            return self.new_sub(zero, operand, span);
        }

        if self.consume("*") {
            let operand = self.cast()?;
            return Ok(Expr::new(ExprKind::Deref(Box::new(operand)), span));
        }

        if self.consume("&") {
            let operand = self.cast()?;
            return Ok(Expr::new(ExprKind::Addr(Box::new(operand)), span));
        }

        self.postfix()
    }

    /// Parses `primary ("[" expr "]" | "." ident | "->" ident)*`.
    fn postfix(&mut self) -> Result<Expr, ParseError> {
        let mut node = self.primary()?;

        loop {
            if self.current().is("[") {
                // a[b] is *(a + b)
                let span = self.current_span();
                self.advance();
                let index = self.expr()?;
                self.expect("]")?;
                let sum = self.new_add(node, index, span)?;
                node = Expr::new(ExprKind::Deref(Box::new(sum)), span);
                continue;
            }

            if self.consume(".") {
                node = self.struct_ref(node)?;
                continue;
            }

            if self.current().is("->") {
                // a->b is (*a).b
                let span = self.current_span();
                self.advance();
                node = Expr::new(ExprKind::Deref(Box::new(node)), span);
                node = self.struct_ref(node)?;
                continue;
            }

            return Ok(node);
        }
    }

    /// Resolves a member access; the current token is the member name.
    fn struct_ref(&mut self, mut base: Expr) -> Result<Expr, ParseError> {
        self.add_type(&mut base)?;
        let (name, span) = self.expect_identifier()?;

        let members = base
            .ty
            .as_ref()
            .and_then(|ty| ty.members())
            .ok_or_else(|| ParseError::not_a_struct(base.span))?;
        let member = members
            .iter()
            .find(|member| member.name == name)
            .cloned()
            .ok_or_else(|| ParseError::no_such_member(&name, span))?;

        Ok(Expr::new(
            ExprKind::Member {
                base: Box::new(base),
                member,
            },
            span,
        ))
    }

    /// Parses a primary expression.
    fn primary(&mut self) -> Result<Expr, ParseError> {
        let span = self.current_span();

        if self.current().is("(") && self.peek(1).is("{") {
            // Statement expression: the value is the final expression
            // statement's value.
            self.advance();
            self.advance();
            let body = self.compound_stmt()?;
            self.expect(")")?;

            match body.last() {
                Some(Stmt {
                    kind: StmtKind::Expr(_),
                    ..
                }) => {}
                _ => return Err(ParseError::void_stmt_expr(span)),
            }
            return Ok(Expr::new(ExprKind::StmtExpr(body), span));
        }

        if self.consume("(") {
            let node = self.expr()?;
            self.expect(")")?;
            return Ok(node);
        }

        if self.current().ident().is_some() {
            if self.peek(1).is("(") {
                return self.funcall();
            }

            let (name, span) = self.expect_identifier()?;
            return match self.find_var(&name) {
                Some(Binding::Var(var)) => {
                    let var = *var;
                    Ok(Expr::new(ExprKind::Var(var), span))
                }
                _ => Err(ParseError::undefined_variable(&name, span)),
            };
        }

        if let TokenKind::Str(bytes) = &self.current().kind {
            let bytes = bytes.clone();
            self.advance();
            let index = self.new_string_literal(bytes);
            return Ok(Expr::new(ExprKind::Var(VarRef::Global(index)), span));
        }

        if let TokenKind::Num(value) = self.current().kind {
            self.advance();
            return Ok(Expr::new(ExprKind::Num(value), span));
        }

        Err(ParseError::expected_expression(span))
    }

    /// Parses a call, materializing arguments into fresh temporaries.
    ///
    /// `f(a, b)` becomes `(t1 = a, (t2 = b, f(t1, t2)))` built over a
    /// null seed, which fixes the evaluation order at left to right and
    /// leaves the call node holding only variable slots.
    fn funcall(&mut self) -> Result<Expr, ParseError> {
        let (name, span) = self.expect_identifier()?;
        self.expect("(")?;

        let mut chain = Expr::new(ExprKind::Null, span);
        let mut args = Vec::new();

        while !self.consume(")") {
            if !args.is_empty() {
                self.expect(",")?;
            }

            let mut arg = self.assign()?;
            self.add_type(&mut arg)?;
            let arg_span = arg.span;

            // Array arguments decay: the temporary holds a pointer to the
            // element type instead of the array itself.
            let temp_ty = match arg.ty.as_ref().and_then(|ty| ty.base()) {
                Some(base) => Type::pointer_to(base.clone()),
                None => arg.ty.clone().unwrap_or_else(Type::int),
            };
            let slot = self.new_lvar(String::new(), temp_ty);
            args.push(slot);

            let assign = Expr::new(
                ExprKind::Assign {
                    lhs: Box::new(Expr::new(ExprKind::Var(VarRef::Local(slot)), arg_span)),
                    rhs: Box::new(arg),
                },
                arg_span,
            );
            chain = Expr::new(
                ExprKind::Comma {
                    lhs: Box::new(chain),
                    rhs: Box::new(assign),
                },
                arg_span,
            );
        }

        let call = Expr::new(ExprKind::FunCall { name, args }, span);
        Ok(Expr::new(
            ExprKind::Comma {
                lhs: Box::new(chain),
                rhs: Box::new(call),
            },
            span,
        ))
    }
}
