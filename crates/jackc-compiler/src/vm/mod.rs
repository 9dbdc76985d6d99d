//! Virtual machine instructions and the emitter that collects them.
//!
//! - [`instruction`]: segments, arithmetic commands and the instruction set
//! - [`emitter`]: order-preserving instruction sink and its textual output

mod emitter;
mod instruction;

pub use emitter::{VmCode, VmEmitter};
pub use instruction::{ArithmeticOp, Instruction, Segment};
