//! Incremental construction of arena-allocated parse trees.

use bumpalo::Bump;
use bumpalo::collections::Vec as BumpVec;

use jackc_core::{Production, TokenKind, TreeError};

use crate::Node;

/// Builds a parse tree one node at a time.
///
/// Productions are opened and closed like a stack; terminals are appended to
/// the innermost open production. Methods chain, and the first misuse is
/// remembered and reported by [`finish`](Self::finish).
pub struct TreeBuilder<'ast> {
    arena: &'ast Bump,
    open: Vec<(Production, BumpVec<'ast, Node<'ast>>)>,
    root: Option<Node<'ast>>,
    error: Option<TreeError>,
}

impl<'ast> TreeBuilder<'ast> {
    pub fn new(arena: &'ast Bump) -> Self {
        Self {
            arena,
            open: Vec::new(),
            root: None,
            error: None,
        }
    }

    /// Open a production; following nodes become its children.
    pub fn open(&mut self, kind: Production) -> &mut Self {
        if self.open.is_empty() && self.root.is_some() {
            self.fail(TreeError::MultipleRoots);
        }
        self.open.push((kind, BumpVec::new_in(self.arena)));
        self
    }

    /// Close the innermost open production.
    pub fn close(&mut self) -> &mut Self {
        match self.open.pop() {
            Some((kind, children)) => {
                let node = Node::NonTerminal {
                    kind,
                    children: children.into_bump_slice(),
                };
                self.push(node);
            }
            None => self.fail(TreeError::UnbalancedClose),
        }
        self
    }

    /// Open a production, let `build` fill it, then close it.
    pub fn node(&mut self, kind: Production, build: impl FnOnce(&mut Self)) -> &mut Self {
        self.open(kind);
        build(self);
        self.close()
    }

    /// Append a terminal of any kind.
    pub fn terminal(&mut self, kind: TokenKind, value: &str) -> &mut Self {
        let value = self.arena.alloc_str(value);
        self.push(Node::Terminal { kind, value });
        self
    }

    pub fn keyword(&mut self, value: &str) -> &mut Self {
        self.terminal(TokenKind::Keyword, value)
    }

    pub fn symbol(&mut self, value: &str) -> &mut Self {
        self.terminal(TokenKind::Symbol, value)
    }

    pub fn identifier(&mut self, value: &str) -> &mut Self {
        self.terminal(TokenKind::Identifier, value)
    }

    /// Append an integer constant. The value is not range checked here.
    pub fn integer(&mut self, value: i64) -> &mut Self {
        self.terminal(TokenKind::IntegerConstant, &value.to_string())
    }

    /// Append a string constant (without surrounding quotes).
    pub fn string(&mut self, value: &str) -> &mut Self {
        self.terminal(TokenKind::StringConstant, value)
    }

    /// Finish building and return the root node.
    pub fn finish(self) -> Result<&'ast Node<'ast>, TreeError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if let Some((kind, _)) = self.open.first() {
            return Err(TreeError::UnclosedProduction {
                kind: kind.name().to_string(),
            });
        }
        let root = self.root.ok_or(TreeError::Empty)?;
        Ok(self.arena.alloc(root))
    }

    /// Whether the innermost open production already has children.
    pub(crate) fn open_has_children(&self) -> bool {
        self.open
            .last()
            .is_some_and(|(_, children)| !children.is_empty())
    }

    fn push(&mut self, node: Node<'ast>) {
        if let Some((_, children)) = self.open.last_mut() {
            children.push(node);
        } else if self.root.is_none() {
            self.root = Some(node);
        } else {
            self.fail(TreeError::MultipleRoots);
        }
    }

    fn fail(&mut self, err: TreeError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }
}
