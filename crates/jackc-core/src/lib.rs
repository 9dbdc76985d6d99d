//! Core types shared by the Jack compiler crates.
//!
//! This crate holds the vocabulary every stage agrees on:
//! - [`NodeKind`], [`Production`] and [`TokenKind`]: the kinds of parse tree nodes
//! - [`BinaryOp`], [`UnaryOp`] and [`KeywordConstant`]: expression operators
//! - [`StorageKind`] and [`SubroutineKind`]: declaration roles
//! - [`CompilationError`], [`TreeError`] and [`JackError`]: the error hierarchy

mod error;
mod kinds;
mod node_pos;
mod ops;
mod roles;

pub use error::{CompilationError, JackError, TreeError};
pub use kinds::{NodeKind, Production, TokenKind};
pub use node_pos::NodePos;
pub use ops::{BinaryOp, KeywordConstant, UnaryOp};
pub use roles::{StorageKind, SubroutineKind};
