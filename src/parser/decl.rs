//! Type specifiers, declarators, and declarations.
//!
//! Declarations read left to right: the base type from `typespec`, pointer
//! stars, the declared name (possibly parenthesized), then array and
//! function suffixes that wrap outward from the name.

use super::error::ParseError;
use super::scope::Binding;
use super::{Declarator, Parser, VarAttr};
use crate::ast::{Expr, ExprKind, Function, Member, Param, Stmt, StmtKind, Type, TypeKind, VarRef};
use crate::token::Token;

/// Weights for the base-type specifier counter.
///
/// Each keyword contributes a fixed weight; two bits per keyword leave room
/// for the duplicates that are legal (`long long`). The running sum is
/// valid only at the accepted combinations matched in `typespec`.
const VOID: u32 = 1 << 0;
const CHAR: u32 = 1 << 2;
const SHORT: u32 = 1 << 4;
const INT: u32 = 1 << 6;
const LONG: u32 = 1 << 8;
const OTHER: u32 = 1 << 10;

/// Which aggregate a `struct-union-decl` production is building.
enum Aggregate {
    Struct,
    Union,
}

impl Parser {
    /// Returns `true` if the current token can begin a type specifier.
    pub(super) fn is_typename(&self) -> bool {
        self.token_is_typename(self.current())
    }

    /// Returns `true` if the token `n` positions ahead can begin a type
    /// specifier (used by the cast/sizeof lookahead).
    pub(super) fn peek_is_typename(&self, n: usize) -> bool {
        self.token_is_typename(self.peek(n))
    }

    fn token_is_typename(&self, token: &Token) -> bool {
        const TYPE_KEYWORDS: &[&str] = &[
            "void", "char", "short", "int", "long", "struct", "union", "typedef",
        ];
        TYPE_KEYWORDS.iter().any(|kw| token.is(kw)) || self.find_typedef(token.ident()).is_some()
    }

    /// Parses a type specifier.
    ///
    /// The arithmetic keywords may appear in any order and multiplicity;
    /// their weighted sum must land on one of the accepted combinations
    /// (`short int`, `long long int`, ...). Struct, union, and typedef
    /// names stand alone and cannot combine with the arithmetic keywords.
    /// `typedef` is collected into `attr`; passing `None` rejects it
    /// (parameters, casts, `sizeof`).
    pub(super) fn typespec(&mut self, mut attr: Option<&mut VarAttr>) -> Result<Type, ParseError> {
        let mut ty = Type::int();
        let mut counter = 0u32;

        while self.is_typename() {
            if self.current().is("typedef") {
                match attr.as_deref_mut() {
                    Some(attr) => attr.is_typedef = true,
                    None => {
                        return Err(ParseError::storage_class_not_allowed(self.current_span()));
                    }
                }
                self.advance();
                continue;
            }

            let typedef_ty = self.find_typedef(self.current().ident());
            if self.current().is("struct") || self.current().is("union") || typedef_ty.is_some() {
                if counter > 0 {
                    break;
                }
                if self.current().is("struct") {
                    self.advance();
                    ty = self.struct_union_decl(Aggregate::Struct)?;
                } else if self.current().is("union") {
                    self.advance();
                    ty = self.struct_union_decl(Aggregate::Union)?;
                } else if let Some(alias) = typedef_ty {
                    ty = alias;
                    self.advance();
                }
                counter += OTHER;
                continue;
            }

            let span = self.current_span();
            if self.consume("void") {
                counter += VOID;
            } else if self.consume("char") {
                counter += CHAR;
            } else if self.consume("short") {
                counter += SHORT;
            } else if self.consume("int") {
                counter += INT;
            } else if self.consume("long") {
                counter += LONG;
            } else {
                return Err(ParseError::internal(
                    "type keyword fell through the specifier checks",
                    span,
                ));
            }

            ty = match counter {
                c if c == VOID => Type::void(),
                c if c == CHAR => Type::char_type(),
                c if c == SHORT || c == SHORT + INT => Type::short(),
                c if c == INT => Type::int(),
                c if c == LONG || c == LONG + INT || c == LONG + LONG || c == LONG + LONG + INT => {
                    Type::long()
                }
                _ => return Err(ParseError::invalid_type(span)),
            };
        }

        Ok(ty)
    }

    /// Parses a declarator and composes the declared type around `ty`.
    pub(super) fn declarator(&mut self, mut ty: Type) -> Result<Declarator, ParseError> {
        while self.consume("*") {
            ty = Type::pointer_to(ty);
        }

        if self.consume("(") {
            // Parenthesized declarators compose outside-in: the suffix
            // after the closing paren applies to the type built so far,
            // and the inner declarator wraps that result. Parse the inner
            // part once with a placeholder base to find the suffix, then
            // re-parse it with the real type.
            let inner_start = self.pos;
            self.declarator(Type::int())?;
            self.expect(")")?;
            let ty = self.type_suffix(ty)?;
            let suffix_end = self.pos;
            self.pos = inner_start;
            let decl = self.declarator(ty)?;
            self.pos = suffix_end;
            return Ok(decl);
        }

        let (name, span) = match self.current().ident() {
            Some(name) => (name.to_string(), self.current_span()),
            None => return Err(ParseError::expected_variable_name(self.current_span())),
        };
        self.advance();
        let ty = self.type_suffix(ty)?;
        Ok(Declarator { name, span, ty })
    }

    /// Parses an abstract declarator (a declarator without a name), used
    /// in casts and `sizeof(type)`.
    pub(super) fn abstract_declarator(&mut self, mut ty: Type) -> Result<Type, ParseError> {
        while self.consume("*") {
            ty = Type::pointer_to(ty);
        }

        if self.consume("(") {
            let inner_start = self.pos;
            self.abstract_declarator(Type::int())?;
            self.expect(")")?;
            let ty = self.type_suffix(ty)?;
            let suffix_end = self.pos;
            self.pos = inner_start;
            let inner = self.abstract_declarator(ty)?;
            self.pos = suffix_end;
            return Ok(inner);
        }

        self.type_suffix(ty)
    }

    /// Parses a full type name: `typespec abstract-declarator`.
    pub(super) fn type_name(&mut self) -> Result<Type, ParseError> {
        let ty = self.typespec(None)?;
        self.abstract_declarator(ty)
    }

    /// Parses the array and function suffixes of a declarator.
    pub(super) fn type_suffix(&mut self, ty: Type) -> Result<Type, ParseError> {
        if self.consume("(") {
            return self.func_params(ty);
        }

        if self.consume("[") {
            let len = self.expect_number()?;
            self.expect("]")?;
            let inner = self.type_suffix(ty)?;
            return Ok(Type::array_of(inner, len as usize));
        }

        Ok(ty)
    }

    /// Parses a parameter list; the opening paren is already consumed.
    fn func_params(&mut self, return_ty: Type) -> Result<Type, ParseError> {
        let mut params = Vec::new();

        while !self.consume(")") {
            if !params.is_empty() {
                self.expect(",")?;
            }
            let basety = self.typespec(None)?;
            let decl = self.declarator(basety)?;
            params.push(Param {
                name: decl.name,
                span: decl.span,
                ty: decl.ty,
            });
        }

        Ok(Type::func(return_ty, params))
    }

    /// Parses a struct or union declaration after its keyword.
    ///
    /// `struct Tag` without a body references the innermost visible tag;
    /// a body (with or without a tag) builds a new type, and a tagged body
    /// registers it at the current depth.
    fn struct_union_decl(&mut self, aggregate: Aggregate) -> Result<Type, ParseError> {
        let tag = self
            .current()
            .ident()
            .map(|name| (name.to_string(), self.current_span()));
        if tag.is_some() {
            self.advance();
        }

        if let Some((name, span)) = &tag {
            if !self.current().is("{") {
                return self
                    .find_tag(name)
                    .cloned()
                    .ok_or_else(|| ParseError::unknown_struct_type(*span));
            }
        }

        self.expect("{")?;
        let members = self.struct_members()?;
        let ty = match aggregate {
            Aggregate::Struct => Type::struct_of(members),
            Aggregate::Union => Type::union_of(members),
        };

        if let Some((name, _)) = tag {
            self.push_tag_scope(name, ty.clone());
        }
        Ok(ty)
    }

    /// Parses struct/union members up to and including the closing brace.
    ///
    /// Offsets are left at zero here; `Type::struct_of`/`Type::union_of`
    /// assign the layout.
    fn struct_members(&mut self) -> Result<Vec<Member>, ParseError> {
        let mut members = Vec::new();

        while !self.consume("}") {
            let basety = self.typespec(None)?;
            let mut first = true;

            while !self.consume(";") {
                if !first {
                    self.expect(",")?;
                }
                first = false;

                let decl = self.declarator(basety.clone())?;
                members.push(Member {
                    name: decl.name,
                    ty: decl.ty,
                    offset: 0,
                });
            }
        }

        Ok(members)
    }

    /// Parses a block-scope declaration into the statement list that runs
    /// its initializers.
    pub(super) fn declaration(&mut self) -> Result<Stmt, ParseError> {
        let decl_span = self.current_span();
        let mut attr = VarAttr::default();
        let basety = self.typespec(Some(&mut attr))?;

        let mut inits = Vec::new();
        let mut count = 0;

        while !self.consume(";") {
            if count > 0 {
                self.expect(",")?;
            }
            count += 1;

            let decl = self.declarator(basety.clone())?;
            if matches!(decl.ty.kind, TypeKind::Void) {
                return Err(ParseError::void_variable(decl.span));
            }

            if attr.is_typedef {
                self.push_scope(decl.name, Binding::Typedef(decl.ty));
                continue;
            }

            let slot = self.new_lvar(decl.name, decl.ty);

            if !self.current().is("=") {
                continue;
            }
            let assign_span = self.current_span();
            self.advance();

            let lhs = Expr::new(ExprKind::Var(VarRef::Local(slot)), decl.span);
            let rhs = self.assign()?;
            let init = Expr::new(
                ExprKind::Assign {
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
                assign_span,
            );
            inits.push(Stmt::new(StmtKind::Expr(init), assign_span));
        }

        Ok(Stmt::new(StmtKind::Block(inits), decl_span))
    }

    /// Binds the remaining declarators of a top-level `typedef`.
    pub(super) fn typedef_names(
        &mut self,
        first: Declarator,
        basety: Type,
    ) -> Result<(), ParseError> {
        let mut decl = first;
        loop {
            self.push_scope(decl.name, Binding::Typedef(decl.ty));
            if self.consume(";") {
                return Ok(());
            }
            self.expect(",")?;
            decl = self.declarator(basety.clone())?;
        }
    }

    /// Creates the remaining global variables of a top-level declaration.
    pub(super) fn global_vars(&mut self, first: Declarator, basety: Type) -> Result<(), ParseError> {
        let mut decl = first;
        loop {
            self.new_gvar(decl.name, decl.ty, None);
            if self.consume(";") {
                return Ok(());
            }
            self.expect(",")?;
            decl = self.declarator(basety.clone())?;
        }
    }

    /// Parses a function body after its declarator.
    pub(super) fn funcdef(&mut self, decl: Declarator) -> Result<Function, ParseError> {
        let TypeKind::Func { params, .. } = decl.ty.kind else {
            return Err(ParseError::internal(
                "funcdef called on a non-function declarator",
                decl.span,
            ));
        };

        self.locals = Vec::new();
        self.enter_scope();

        let mut param_slots = Vec::new();
        for param in params {
            param_slots.push(self.new_lvar(param.name, param.ty));
        }

        self.expect("{")?;
        let body = self.compound_stmt()?;
        self.leave_scope();

        Ok(Function {
            name: decl.name,
            params: param_slots,
            locals: std::mem::take(&mut self.locals),
            body,
            span: decl.span,
        })
    }
}
