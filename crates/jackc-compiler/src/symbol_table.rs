//! Symbol tables for class and subroutine scopes.
//!
//! A class is compiled with two independent tables:
//! - the class table holds `static` and `field` declarations and lives for
//!   the whole class
//! - the subroutine table holds `argument` and `local` declarations and is
//!   cleared with [`SymbolTable::start_scope`] at every subroutine
//!
//! Slot indices are dense and zero-based per storage kind. A name can only
//! be defined once per table: later definitions are ignored.

use jackc_core::StorageKind;
use rustc_hash::FxHashMap;

// ============================================================================
// Types
// ============================================================================

/// A defined name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Variable name
    pub name: String,
    /// Declared type (`int`, `boolean`, a class name, ...)
    pub declared_type: String,
    /// Storage kind
    pub kind: StorageKind,
    /// Slot index within its kind
    pub index: u16,
}

// ============================================================================
// SymbolTable
// ============================================================================

/// Name to symbol mapping for one scope.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: FxHashMap<String, Symbol>,
    /// Number of symbols per storage kind, indexed by [`kind_slot`].
    counts: [u16; 4],
}

fn kind_slot(kind: StorageKind) -> usize {
    match kind {
        StorageKind::Static => 0,
        StorageKind::Field => 1,
        StorageKind::Argument => 2,
        StorageKind::Local => 3,
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every symbol.
    pub fn start_scope(&mut self) {
        self.symbols.clear();
        self.counts = [0; 4];
    }

    /// Define `name` with the next free slot of `kind`.
    ///
    /// Returns `false` and leaves the table untouched if `name` is already
    /// defined (the first definition wins) or if every slot of `kind` is taken.
    pub fn define(&mut self, name: &str, declared_type: &str, kind: StorageKind) -> bool {
        if self.symbols.contains_key(name) {
            return false;
        }

        let slot = &mut self.counts[kind_slot(kind)];
        let Some(next) = slot.checked_add(1) else {
            return false;
        };
        let symbol = Symbol {
            name: name.to_string(),
            declared_type: declared_type.to_string(),
            kind,
            index: *slot,
        };
        *slot = next;

        self.symbols.insert(name.to_string(), symbol);
        true
    }

    /// Number of symbols defined with `kind`.
    pub fn count_of(&self, kind: StorageKind) -> u16 {
        self.counts[kind_slot(kind)]
    }

    pub fn has(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn kind_of(&self, name: &str) -> Option<StorageKind> {
        self.get(name).map(|s| s.kind)
    }

    pub fn type_of(&self, name: &str) -> Option<&str> {
        self.get(name).map(|s| s.declared_type.as_str())
    }

    pub fn index_of(&self, name: &str) -> Option<u16> {
        self.get(name).map(|s| s.index)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterate over all symbols (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }
}

// ============================================================================
// Tests
// ============================================================================
