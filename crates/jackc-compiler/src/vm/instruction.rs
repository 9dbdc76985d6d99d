//! The stack VM instruction set.
//!
//! Each [`Instruction`] displays as exactly one line of VM text, e.g.
//! `push constant 7`, `if-goto WHILE_END0` or `call Math.multiply 2`.

use std::fmt;

use jackc_core::StorageKind;

/// Named memory regions addressed by a small index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    Constant,
    Argument,
    Local,
    Static,
    /// Fields of the current object.
    This,
    /// Whatever `pointer 1` currently aims at (array elements).
    That,
    /// `pointer 0` is the base of `this`, `pointer 1` the base of `that`.
    Pointer,
    Temp,
}

impl Segment {
    /// The segment a variable of `kind` lives in.
    ///
    /// Fields are reached through the current object, so they map to `this`.
    pub fn of(kind: StorageKind) -> Self {
        match kind {
            StorageKind::Static => Segment::Static,
            StorageKind::Field => Segment::This,
            StorageKind::Argument => Segment::Argument,
            StorageKind::Local => Segment::Local,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Segment::Constant => "constant",
            Segment::Argument => "argument",
            Segment::Local => "local",
            Segment::Static => "static",
            Segment::This => "this",
            Segment::That => "that",
            Segment::Pointer => "pointer",
            Segment::Temp => "temp",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Operand-free arithmetic and logic commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Neg,
    Eq,
    Gt,
    Lt,
    And,
    Or,
    Not,
}

impl ArithmeticOp {
    pub fn name(self) -> &'static str {
        match self {
            ArithmeticOp::Add => "add",
            ArithmeticOp::Sub => "sub",
            ArithmeticOp::Neg => "neg",
            ArithmeticOp::Eq => "eq",
            ArithmeticOp::Gt => "gt",
            ArithmeticOp::Lt => "lt",
            ArithmeticOp::And => "and",
            ArithmeticOp::Or => "or",
            ArithmeticOp::Not => "not",
        }
    }
}

impl fmt::Display for ArithmeticOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One VM instruction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Instruction {
    Push { segment: Segment, index: u16 },
    Pop { segment: Segment, index: u16 },
    Arithmetic(ArithmeticOp),
    Label(String),
    Goto(String),
    IfGoto(String),
    /// Function entry with the number of local slots to reserve.
    Function { name: String, n_locals: u16 },
    /// Call with the number of arguments already pushed.
    Call { name: String, n_args: u16 },
    Return,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Push { segment, index } => write!(f, "push {segment} {index}"),
            Instruction::Pop { segment, index } => write!(f, "pop {segment} {index}"),
            Instruction::Arithmetic(op) => write!(f, "{op}"),
            Instruction::Label(label) => write!(f, "label {label}"),
            Instruction::Goto(label) => write!(f, "goto {label}"),
            Instruction::IfGoto(label) => write!(f, "if-goto {label}"),
            Instruction::Function { name, n_locals } => write!(f, "function {name} {n_locals}"),
            Instruction::Call { name, n_args } => write!(f, "call {name} {n_args}"),
            Instruction::Return => f.write_str("return"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_map_to_this() {
        assert_eq!(Segment::of(StorageKind::Field), Segment::This);
        assert_eq!(Segment::of(StorageKind::Static), Segment::Static);
        assert_eq!(Segment::of(StorageKind::Argument), Segment::Argument);
        assert_eq!(Segment::of(StorageKind::Local), Segment::Local);
    }

    #[test]
    fn instruction_text() {
        let cases = [
            (
                Instruction::Push {
                    segment: Segment::Constant,
                    index: 7,
                },
                "push constant 7",
            ),
            (
                Instruction::Pop {
                    segment: Segment::Pointer,
                    index: 1,
                },
                "pop pointer 1",
            ),
            (Instruction::Arithmetic(ArithmeticOp::Not), "not"),
            (Instruction::Label("WHILE_EXP0".into()), "label WHILE_EXP0"),
            (Instruction::Goto("IF_END2".into()), "goto IF_END2"),
            (Instruction::IfGoto("IF_TRUE2".into()), "if-goto IF_TRUE2"),
            (
                Instruction::Function {
                    name: "Main.main".into(),
                    n_locals: 3,
                },
                "function Main.main 3",
            ),
            (
                Instruction::Call {
                    name: "Math.multiply".into(),
                    n_args: 2,
                },
                "call Math.multiply 2",
            ),
            (Instruction::Return, "return"),
        ];

        for (instruction, text) in cases {
            assert_eq!(instruction.to_string(), text);
        }
    }
}
