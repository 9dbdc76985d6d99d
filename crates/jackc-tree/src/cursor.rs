//! Flat pre-order cursor over a parse tree.
//!
//! The tree is linearized once into a vector of `(kind, value)` entries.
//! Grammar procedures then consume it like a token stream, except that the
//! stream also carries the non-terminal markers.

use jackc_core::{NodeKind, NodePos};

use crate::Node;

#[derive(Debug, Clone, Copy)]
struct Entry<'ast> {
    kind: NodeKind,
    value: &'ast str,
}

/// A cursor over the pre-order node sequence of a tree.
#[derive(Debug, Clone)]
pub struct TreeCursor<'ast> {
    entries: Vec<Entry<'ast>>,
    pos: usize,
}

impl<'ast> TreeCursor<'ast> {
    /// Linearize `root` and position the cursor on it.
    pub fn new(root: &Node<'ast>) -> Self {
        let mut entries = Vec::with_capacity(root.count());
        root.walk(&mut |node| {
            entries.push(Entry {
                kind: node.kind(),
                value: node.value(),
            })
        });
        Self { entries, pos: 0 }
    }

    /// Kind of the current node, or `None` past the last node.
    #[inline]
    pub fn current_kind(&self) -> Option<NodeKind> {
        self.entries.get(self.pos).map(|e| e.kind)
    }

    /// Value of the current node, or `None` past the last node.
    ///
    /// Non-terminals have the empty string as their value.
    #[inline]
    pub fn current_value(&self) -> Option<&'ast str> {
        self.entries.get(self.pos).map(|e| e.value)
    }

    /// Move to the next node. Does nothing past the end.
    #[inline]
    pub fn advance(&mut self) {
        if self.pos < self.entries.len() {
            self.pos += 1;
        }
    }

    /// Pre-order index of the current node.
    #[inline]
    pub fn position(&self) -> NodePos {
        NodePos::new(self.pos)
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.entries.len()
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace the value of every terminal with `rewrite(value)`.
    ///
    /// Values borrow from the tree's arena, so the rewrite must return a
    /// subslice of its input or another string that lives as long.
    pub fn rewrite_values(&mut self, mut rewrite: impl FnMut(&'ast str) -> &'ast str) {
        for entry in self.entries.iter_mut().filter(|e| e.kind.is_terminal()) {
            entry.value = rewrite(entry.value);
        }
    }
}

/// Remove the single space of lexical padding the analyzer puts on each side
/// of a token's text.
///
/// Only a matched pair is removed, so `" a b "` becomes `"a b"` while
/// `"  x  "` keeps its inner spaces as `" x "`.
pub fn strip_padding(value: &str) -> &str {
    value
        .strip_prefix(' ')
        .and_then(|v| v.strip_suffix(' '))
        .unwrap_or(value)
}
