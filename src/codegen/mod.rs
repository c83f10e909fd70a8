//! x86-64 code generation for the mincc compiler.
//!
//! This module provides the [`Codegen`] struct which lowers a typed
//! [`Program`] to x86-64 System V assembly in AT&T syntax, written to any
//! [`io::Write`] sink.
//!
//! # Discipline
//!
//! Expression evaluation uses a value-on-stack discipline: every
//! expression pushes its 64-bit result, a binary operator pops two values
//! and pushes one, and a statement ends with the stack where it started.
//! The generator tracks the logical push count (`depth`) and asserts the
//! balance at every statement boundary in debug builds. The same counter
//! decides whether a call site needs an 8-byte pad to keep `%rsp` aligned
//! to 16.
//!
//! # Layout
//!
//! - Globals (including anonymous string literals) go to `.data`:
//!   `.byte` lines for initialized data, `.zero` otherwise
//! - Each function gets `.globl`, a prologue that spills its register
//!   arguments into the frame, and a unique `.L.return.<name>` epilogue
//!   label that `return` statements jump to
//! - Locals live at negative offsets from `%rbp`, laid out in declaration
//!   order, each aligned to its own alignment; the frame is rounded up to
//!   16 bytes
//!
//! # Module Structure
//!
//! - [`error`] - Error types for code generation
//! - `stmt` - Statement lowering
//! - `expr` - Expression lowering, lvalues, loads and stores
//! - `tests` - Unit tests (test-only)
//!
//! # See Also
//!
//! * [`crate::ast`] - The typed AST consumed here
//! * [`crate::typing`] - Guarantees every expression carries a type

mod error;
mod expr;
mod stmt;


pub use error::CodegenError;

use std::io;

use crate::ast::{Function, Program, align_to};

/// Argument registers of the System V AMD64 calling convention, by
/// operand width.
const ARG_REGS_8: [&str; 6] = ["%dil", "%sil", "%dl", "%cl", "%r8b", "%r9b"];
const ARG_REGS_16: [&str; 6] = ["%di", "%si", "%dx", "%cx", "%r8w", "%r9w"];
const ARG_REGS_32: [&str; 6] = ["%edi", "%esi", "%edx", "%ecx", "%r8d", "%r9d"];
const ARG_REGS_64: [&str; 6] = ["%rdi", "%rsi", "%rdx", "%rcx", "%r8", "%r9"];

/// Returns the name of argument register `index` at the given width.
fn arg_register(index: usize, size: usize) -> Option<&'static str> {
    let regs = match size {
        1 => &ARG_REGS_8,
        2 => &ARG_REGS_16,
        4 => &ARG_REGS_32,
        _ => &ARG_REGS_64,
    };
    regs.get(index).copied()
}

/// Assembly generator over a typed program.
///
/// Create one with [`Codegen::new`] and call [`Codegen::compile`]; the
/// generator is single-use.
pub struct Codegen<'a, W: io::Write> {
    /// The program being lowered.
    prog: &'a Program,
    /// The assembly sink.
    out: W,
    /// Monotonically increasing counter for control-flow labels.
    label_count: usize,
    /// Logical number of values currently pushed by expression code.
    depth: usize,
    /// Stack offset below `%rbp` of each local of the current function,
    /// indexed by slot.
    offsets: Vec<usize>,
    /// The epilogue label of the current function.
    return_label: String,
}

/// Lowers `prog` to assembly on `out`.
///
/// # Errors
///
/// Returns a [`CodegenError`] for a non-lvalue assignment target, a call
/// with more than six arguments, or a write failure on the sink.
pub fn codegen<W: io::Write>(prog: &Program, out: W) -> Result<(), CodegenError> {
    Codegen::new(prog, out).compile()
}

impl<'a, W: io::Write> Codegen<'a, W> {
    /// Creates a generator for the given program and sink.
    pub fn new(prog: &'a Program, out: W) -> Self {
        Codegen {
            prog,
            out,
            label_count: 0,
            depth: 0,
            offsets: Vec::new(),
            return_label: String::new(),
        }
    }

    /// Emits the whole program: the data section, then every function.
    pub fn compile(mut self) -> Result<(), CodegenError> {
        let prog = self.prog;

        writeln!(self.out, ".data")?;
        for global in &prog.globals {
            writeln!(self.out, "{}:", global.name)?;
            match &global.init {
                Some(bytes) => {
                    for byte in bytes {
                        writeln!(self.out, "  .byte {}", byte)?;
                    }
                }
                None => writeln!(self.out, "  .zero {}", global.ty.size)?,
            }
        }

        writeln!(self.out, ".text")?;
        for function in &prog.functions {
            self.gen_function(function)?;
        }
        Ok(())
    }

    /// Emits one function: frame layout, prologue, body, epilogue.
    fn gen_function(&mut self, function: &Function) -> Result<(), CodegenError> {
        // Lay out locals in declaration order. Each slot sits below the
        // previous one, aligned to its own alignment; offsets are the
        // positive distance below %rbp.
        let mut offset = 0;
        self.offsets.clear();
        for var in &function.locals {
            offset += var.ty.size;
            offset = align_to(offset, var.ty.align);
            self.offsets.push(offset);
        }
        let stack_size = align_to(offset, 16);
        self.return_label = format!(".L.return.{}", function.name);
        self.depth = 0;

        writeln!(self.out, ".globl {}", function.name)?;
        writeln!(self.out, "{}:", function.name)?;

        // Prologue.
        writeln!(self.out, "  push %rbp")?;
        writeln!(self.out, "  mov %rsp, %rbp")?;
        writeln!(self.out, "  sub ${}, %rsp", stack_size)?;

        // Spill register arguments into their frame slots, sized by the
        // parameter type.
        for (index, &slot) in function.params.iter().enumerate() {
            let var = &function.locals[slot];
            let reg = arg_register(index, var.ty.size)
                .ok_or_else(|| CodegenError::too_many_args(function.span))?;
            writeln!(self.out, "  mov {}, -{}(%rbp)", reg, self.offsets[slot])?;
        }

        for stmt in &function.body {
            self.gen_stmt(function, stmt)?;
        }
        debug_assert_eq!(self.depth, 0, "value stack unbalanced at function end");

        // Epilogue; `return` statements jump here.
        writeln!(self.out, "{}:", self.return_label)?;
        writeln!(self.out, "  mov %rbp, %rsp")?;
        writeln!(self.out, "  pop %rbp")?;
        writeln!(self.out, "  ret")?;
        Ok(())
    }

    /// Returns a fresh label number.
    fn next_label(&mut self) -> usize {
        self.label_count += 1;
        self.label_count
    }
}
