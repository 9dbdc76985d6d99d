//! Jack code generation.
//!
//! This crate turns a Jack parse tree into stack VM code:
//!
//! - [`symbol_table`]: class and subroutine scopes with per-kind slot numbering
//! - [`labels`]: injectable label id sources for `if` and `while`
//! - [`vm`]: the VM instruction model and an order-preserving emitter
//! - [`codegen`]: the syntax-directed [`CodeGenerator`]

pub mod codegen;
pub mod labels;
pub mod symbol_table;
pub mod vm;

pub use codegen::{
    CodeGenerator, CompileOptions, CompiledClass, MAX_CONSTANT, SubroutineContext, compile_class,
};
pub use labels::{LabelId, LabelSource, SequentialLabels};
pub use symbol_table::{Symbol, SymbolTable};
pub use vm::{ArithmeticOp, Instruction, Segment, VmCode, VmEmitter};
