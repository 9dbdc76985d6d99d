//! Node positions for error reporting.
//!
//! The code generator never sees source text, so diagnostics point at the
//! offending node by its index in the pre-order walk of the parse tree.

use std::fmt;

/// Pre-order index of a node in a parse tree.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct NodePos(pub u32);

impl NodePos {
    /// Create a position from a pre-order index.
    #[inline]
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// The pre-order index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for NodePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node {}", self.0)
    }
}
