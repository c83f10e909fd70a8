//! Scope management for the parser.
//!
//! The language has two block-scoped namespaces: one shared by variables
//! and typedefs, and one for struct/union tags. Each is a stack of
//! depth-tagged entries; entering a block increments the depth, leaving a
//! block pops everything deeper than the restored depth. Lookup scans from
//! innermost to outermost, so shadowing falls out of the ordering.

use super::Parser;
use crate::ast::{GlobalVar, Type, Var, VarRef};

/// What a name in the variable namespace is bound to.
#[derive(Debug, Clone)]
pub(super) enum Binding {
    /// A local or global variable.
    Var(VarRef),
    /// A typedef name aliasing a type.
    Typedef(Type),
}

/// One entry in the variable/typedef namespace.
#[derive(Debug)]
pub(super) struct VarScopeEntry {
    pub(super) name: String,
    pub(super) depth: usize,
    pub(super) binding: Binding,
}

/// One entry in the struct/union tag namespace.
#[derive(Debug)]
pub(super) struct TagScopeEntry {
    pub(super) name: String,
    pub(super) depth: usize,
    pub(super) ty: Type,
}

impl Parser {
    /// Enters a block scope.
    pub(super) fn enter_scope(&mut self) {
        self.scope_depth += 1;
    }

    /// Leaves a block scope, dropping every binding introduced inside it.
    pub(super) fn leave_scope(&mut self) {
        self.scope_depth -= 1;
        let depth = self.scope_depth;
        while self.var_scope.last().is_some_and(|e| e.depth > depth) {
            self.var_scope.pop();
        }
        while self.tag_scope.last().is_some_and(|e| e.depth > depth) {
            self.tag_scope.pop();
        }
    }

    /// Binds a name in the variable/typedef namespace at the current depth.
    pub(super) fn push_scope(&mut self, name: String, binding: Binding) {
        self.var_scope.push(VarScopeEntry {
            name,
            depth: self.scope_depth,
            binding,
        });
    }

    /// Binds a struct/union tag at the current depth.
    pub(super) fn push_tag_scope(&mut self, name: String, ty: Type) {
        self.tag_scope.push(TagScopeEntry {
            name,
            depth: self.scope_depth,
            ty,
        });
    }

    /// Looks up a name in the variable/typedef namespace, innermost first.
    pub(super) fn find_var(&self, name: &str) -> Option<&Binding> {
        self.var_scope
            .iter()
            .rev()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.binding)
    }

    /// Looks up a struct/union tag, innermost first.
    pub(super) fn find_tag(&self, name: &str) -> Option<&Type> {
        self.tag_scope
            .iter()
            .rev()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.ty)
    }

    /// Returns the aliased type if the given token is a typedef name.
    pub(super) fn find_typedef(&self, name: Option<&str>) -> Option<Type> {
        let name = name?;
        match self.find_var(name) {
            Some(Binding::Typedef(ty)) => Some(ty.clone()),
            _ => None,
        }
    }

    /// Creates a local variable in the current function and binds it.
    ///
    /// Call-argument temporaries use an empty name, which never collides
    /// with a source identifier.
    pub(super) fn new_lvar(&mut self, name: String, ty: Type) -> usize {
        let slot = self.locals.len();
        self.locals.push(Var {
            name: name.clone(),
            ty,
        });
        self.push_scope(name, Binding::Var(VarRef::Local(slot)));
        slot
    }

    /// Creates a global variable and binds it.
    pub(super) fn new_gvar(&mut self, name: String, ty: Type, init: Option<Vec<u8>>) -> usize {
        let index = self.globals.len();
        self.globals.push(GlobalVar {
            name: name.clone(),
            ty,
            init,
        });
        self.push_scope(name, Binding::Var(VarRef::Global(index)));
        index
    }

    /// Creates an anonymous global holding a string literal's bytes.
    ///
    /// The literal's bytes (with their trailing NUL) become the
    /// initializer of a fresh `.L.data.N` array-of-char global.
    pub(super) fn new_string_literal(&mut self, bytes: Vec<u8>) -> usize {
        let name = format!(".L.data.{}", self.string_count);
        self.string_count += 1;
        let ty = Type::array_of(Type::char_type(), bytes.len());
        self.new_gvar(name, ty, Some(bytes))
    }
}
