//! Parse tree nodes.

use jackc_core::{NodeKind, Production, TokenKind};

/// A node of a parse tree.
///
/// Nodes borrow from an arena allocator and remain valid for the lifetime of
/// the arena. Children are stored as slices, so there are no parent links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node<'ast> {
    /// A grammar production with its ordered children.
    NonTerminal {
        kind: Production,
        children: &'ast [Node<'ast>],
    },
    /// A token with its literal text.
    Terminal { kind: TokenKind, value: &'ast str },
}

impl<'ast> Node<'ast> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::NonTerminal { kind, .. } => NodeKind::Production(*kind),
            Node::Terminal { kind, .. } => NodeKind::Token(*kind),
        }
    }

    /// Literal text of a terminal; empty for non-terminals.
    pub fn value(&self) -> &'ast str {
        match self {
            Node::NonTerminal { .. } => "",
            Node::Terminal { value, .. } => value,
        }
    }

    /// Children of a non-terminal; empty for terminals.
    pub fn children(&self) -> &'ast [Node<'ast>] {
        match self {
            Node::NonTerminal { children, .. } => children,
            Node::Terminal { .. } => &[],
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Node::Terminal { .. })
    }

    /// Visit this node and all of its descendants in pre-order.
    pub fn walk(&self, visit: &mut impl FnMut(&Node<'ast>)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Number of nodes in this subtree, including this one.
    pub fn count(&self) -> usize {
        1 + self.children().iter().map(Node::count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_is_pre_order() {
        let leaves = [
            Node::Terminal {
                kind: TokenKind::Keyword,
                value: "return",
            },
            Node::Terminal {
                kind: TokenKind::Symbol,
                value: ";",
            },
        ];
        let root = Node::NonTerminal {
            kind: Production::ReturnStatement,
            children: &leaves,
        };

        let mut seen = Vec::new();
        root.walk(&mut |n| seen.push((n.kind(), n.value())));

        assert_eq!(
            seen,
            vec![
                (NodeKind::Production(Production::ReturnStatement), ""),
                (NodeKind::Token(TokenKind::Keyword), "return"),
                (NodeKind::Token(TokenKind::Symbol), ";"),
            ]
        );
        assert_eq!(root.count(), 3);
    }

    #[test]
    fn terminal_has_no_children() {
        let leaf = Node::Terminal {
            kind: TokenKind::Identifier,
            value: "x",
        };
        assert!(leaf.children().is_empty());
        assert!(leaf.is_terminal());
    }
}
