//! Unified error types for the Jack compiler.
//!
//! ## Error Hierarchy
//!
//! ```text
//! JackError (top-level wrapper)
//! ├── TreeError        - Building or loading a parse tree
//! └── CompilationError - Walking the tree and generating VM code
//! ```
//!
//! Compilation is fail-fast: the first error aborts the current class and
//! no partial instruction stream is returned.

use thiserror::Error;

use crate::NodePos;

// ============================================================================
// Tree Errors
// ============================================================================

/// Errors that occur while building or loading a parse tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TreeError {
    /// The serialized tree is not valid JSON.
    #[error("malformed tree json: {message}")]
    Json { message: String },

    /// A serialized node is not an object with exactly one key.
    #[error("invalid node at {path}: {detail}")]
    InvalidNode { path: String, detail: String },

    /// A node kind name is neither a production nor a token kind.
    #[error("unknown node kind '{name}' at {path}")]
    UnknownKind { name: String, path: String },

    /// A production was opened but never closed.
    #[error("production '{kind}' was never closed")]
    UnclosedProduction { kind: String },

    /// `close` was called with no open production.
    #[error("close without an open production")]
    UnbalancedClose,

    /// A node was added at the top level after the root was complete.
    #[error("tree has more than one root")]
    MultipleRoots,

    /// `finish` was called before anything was built.
    #[error("tree is empty")]
    Empty,
}

// ============================================================================
// Compilation Errors
// ============================================================================

/// Errors that occur during code generation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompilationError {
    /// The current node's kind or value is not what the grammar procedure expects.
    #[error("at {pos}: expected {expected}, found {found}")]
    StructuralMismatch {
        /// What the grammar procedure expected.
        expected: String,
        /// What the tree actually holds.
        found: String,
        /// The offending node.
        pos: NodePos,
    },

    /// The tree ended while a construct was still being compiled.
    #[error("unexpected end of tree, expected {expected}")]
    UnexpectedEndOfInput { expected: String },

    /// A variable is in neither the subroutine nor the class table.
    #[error("at {pos}: unresolved symbol '{name}'")]
    UnresolvedSymbol { name: String, pos: NodePos },

    /// A constant the VM cannot push (outside `0..=32767`).
    #[error("at {pos}: constant '{value}' is out of range")]
    InvalidConstant { value: String, pos: NodePos },

    /// More symbols of one kind, or more call arguments, than a `u16` slot holds.
    #[error("at {pos}: too many {what}")]
    LimitExceeded { what: String, pos: NodePos },
}

impl CompilationError {
    /// Get the node where this error occurred, if there is one.
    pub fn pos(&self) -> Option<NodePos> {
        match self {
            CompilationError::StructuralMismatch { pos, .. } => Some(*pos),
            CompilationError::UnexpectedEndOfInput { .. } => None,
            CompilationError::UnresolvedSymbol { pos, .. } => Some(*pos),
            CompilationError::InvalidConstant { pos, .. } => Some(*pos),
            CompilationError::LimitExceeded { pos, .. } => Some(*pos),
        }
    }
}

// ============================================================================
// Unified Error
// ============================================================================

/// Top-level error for callers that load and compile in one step.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum JackError {
    /// A tree building or loading error.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// A code generation error.
    #[error(transparent)]
    Compilation(#[from] CompilationError),
}

impl JackError {
    pub fn is_tree(&self) -> bool {
        matches!(self, JackError::Tree(_))
    }

    pub fn is_compilation(&self) -> bool {
        matches!(self, JackError::Compilation(_))
    }
}
