//! Parse tree model for the Jack code generator.
//!
//! The code generator does not parse source text. It receives a finished
//! parse tree from an external analyzer and walks it in pre-order.
//! This crate provides:
//! - [`Node`]: arena-allocated, immutable tree nodes
//! - [`TreeBuilder`]: builds a tree node by node
//! - [`load_json`]: reads the analyzer's JSON dump of a tree
//! - [`TreeCursor`]: the flat pre-order view the code generator consumes
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use jackc_core::{NodeKind, Production};
//! use jackc_tree::{TreeBuilder, TreeCursor};
//!
//! let arena = Bump::new();
//! let mut builder = TreeBuilder::new(&arena);
//! builder.node(Production::Class, |b| {
//!     b.keyword("class").identifier("Main").symbol("{").symbol("}");
//! });
//! let root = builder.finish().unwrap();
//!
//! let cursor = TreeCursor::new(root);
//! assert_eq!(cursor.current_kind(), Some(NodeKind::Production(Production::Class)));
//! assert_eq!(cursor.len(), 5);
//! ```

mod builder;
mod cursor;
mod grammar;
mod json;
mod node;

pub use builder::TreeBuilder;
pub use cursor::{TreeCursor, strip_padding};
pub use json::load_json;
pub use node::Node;

pub use jackc_core::{NodeKind, NodePos, Production, TokenKind, TreeError};
