//! Instruction emitter.
//!
//! [`VmEmitter`] records instructions in the order they are emitted and has
//! no knowledge of the source language. [`VmEmitter::finish`] hands the
//! result over as [`VmCode`], which renders one instruction per line.
//!
//! # Example
//!
//! ```
//! use jackc_compiler::vm::{ArithmeticOp, Segment, VmEmitter};
//!
//! let mut emitter = VmEmitter::new();
//! emitter.push(Segment::Constant, 2);
//! emitter.push(Segment::Constant, 3);
//! emitter.arithmetic(ArithmeticOp::Add);
//!
//! let code = emitter.finish();
//! assert_eq!(code.to_string(), "push constant 2\npush constant 3\nadd\n");
//! ```

use std::fmt;
use std::io;

use super::{ArithmeticOp, Instruction, Segment};

/// Collects VM instructions for one class.
#[derive(Debug, Default)]
pub struct VmEmitter {
    instructions: Vec<Instruction>,
}

impl VmEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================================================
    // Basic Emission
    // ==========================================================================

    /// Emit any instruction.
    pub fn emit(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    pub fn push(&mut self, segment: Segment, index: u16) {
        self.emit(Instruction::Push { segment, index });
    }

    pub fn pop(&mut self, segment: Segment, index: u16) {
        self.emit(Instruction::Pop { segment, index });
    }

    pub fn arithmetic(&mut self, op: ArithmeticOp) {
        self.emit(Instruction::Arithmetic(op));
    }

    // ==========================================================================
    // Control Flow
    // ==========================================================================

    pub fn label(&mut self, label: &str) {
        self.emit(Instruction::Label(label.to_string()));
    }

    pub fn goto(&mut self, label: &str) {
        self.emit(Instruction::Goto(label.to_string()));
    }

    pub fn if_goto(&mut self, label: &str) {
        self.emit(Instruction::IfGoto(label.to_string()));
    }

    // ==========================================================================
    // Subroutine Linkage
    // ==========================================================================

    pub fn function(&mut self, name: &str, n_locals: u16) {
        self.emit(Instruction::Function {
            name: name.to_string(),
            n_locals,
        });
    }

    pub fn call(&mut self, name: &str, n_args: u16) {
        self.emit(Instruction::Call {
            name: name.to_string(),
            n_args,
        });
    }

    pub fn ret(&mut self) {
        self.emit(Instruction::Return);
    }

    // ==========================================================================
    // Accessors
    // ==========================================================================

    /// Number of instructions emitted so far.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Finish emitting and return the collected code.
    pub fn finish(self) -> VmCode {
        VmCode {
            instructions: self.instructions,
        }
    }
}

/// A finished instruction stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VmCode {
    instructions: Vec<Instruction>,
}

impl VmCode {
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn into_instructions(self) -> Vec<Instruction> {
        self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Each instruction as a line of text, without line terminators.
    pub fn lines(&self) -> Vec<String> {
        self.instructions.iter().map(ToString::to_string).collect()
    }

    /// Write the newline-terminated text form to `out`.
    pub fn write_to(&self, mut out: impl io::Write) -> io::Result<()> {
        for instruction in &self.instructions {
            writeln!(out, "{instruction}")?;
        }
        Ok(())
    }
}

impl fmt::Display for VmCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instruction in &self.instructions {
            writeln!(f, "{instruction}")?;
        }
        Ok(())
    }
}
