//! # jackc
//!
//! Back end of a Jack compiler: takes the parse tree produced by an external
//! analyzer and emits stack VM code, one class at a time.
//!
//! ## Crates
//!
//! - `jackc-core`: node kinds, operators, declaration roles and errors
//! - `jackc-tree`: arena parse trees, the tree builder, the JSON loader and
//!   the pre-order cursor
//! - `jackc-compiler`: symbol tables, label ids, the VM model and the code
//!   generator
//!
//! ## Example
//!
//! ```
//! let json = r#"{"class": [
//!     {"keyword": " class "}, {"identifier": " Main "}, {"symbol": " { "},
//!     {"subroutineDec": [
//!         {"keyword": " function "}, {"keyword": " void "}, {"identifier": " main "},
//!         {"symbol": " ( "}, {"parameterList": []}, {"symbol": " ) "},
//!         {"subroutineBody": [
//!             {"symbol": " { "},
//!             {"statements": [
//!                 {"returnStatement": [{"keyword": " return "}, {"symbol": " ; "}]}
//!             ]},
//!             {"symbol": " } "}
//!         ]}
//!     ]},
//!     {"symbol": " } "}
//! ]}"#;
//!
//! let mut labels = jackc::SequentialLabels::new();
//! let code = jackc::compile_json(json, &mut labels).unwrap();
//! assert_eq!(code.to_string(), "function Main.main 0\npush constant 0\nreturn\n");
//! ```

pub mod program;

use bumpalo::Bump;

pub use jackc_compiler::{
    ArithmeticOp, CodeGenerator, CompileOptions, CompiledClass, Instruction, LabelId, LabelSource,
    MAX_CONSTANT, Segment, SequentialLabels, Symbol, SymbolTable, VmCode, VmEmitter,
};
pub use jackc_core::{
    BinaryOp, CompilationError, JackError, KeywordConstant, NodeKind, NodePos, Production,
    StorageKind, SubroutineKind, TokenKind, TreeError, UnaryOp,
};
pub use jackc_tree::{Node, TreeBuilder, TreeCursor, load_json, strip_padding};
pub use program::{Program, ProgramReport, VmUnit};

/// Compile one class tree, drawing label ids from `labels`.
///
/// Pass the same source for every class of a program so label names stay
/// unique across the concatenated output.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn compile_class(
    root: &Node<'_>,
    labels: &mut dyn LabelSource,
) -> Result<VmCode, CompilationError> {
    let compiled = jackc_compiler::compile_class(root, labels)?;
    Ok(compiled.code)
}

/// Load a class tree from the analyzer's JSON dump and compile it.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn compile_json(text: &str, labels: &mut dyn LabelSource) -> Result<VmCode, JackError> {
    let arena = Bump::new();
    let root = load_json(text, &arena)?;
    Ok(compile_class(root, labels)?)
}
