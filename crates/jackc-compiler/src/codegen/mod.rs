//! Syntax-directed translation from a Jack parse tree to VM code.
//!
//! The [`CodeGenerator`] walks a [`TreeCursor`] with one procedure per
//! grammar production, consults the class and subroutine symbol tables and
//! emits instructions through a [`VmEmitter`]. There is no backtracking:
//! once a production is entered the cursor only moves forward.
//!
//! - `decl`: class, variable and subroutine declarations
//! - `stmt`: the five statement forms
//! - `expr`: expressions, terms, calls and expression lists
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use jackc_compiler::{CodeGenerator, SequentialLabels};
//! use jackc_tree::load_json;
//!
//! let arena = Bump::new();
//! let root = load_json(
//!     r#"{"class": [{"keyword": " class "}, {"identifier": " Empty "},
//!                   {"symbol": " { "}, {"symbol": " } "}]}"#,
//!     &arena,
//! )
//! .unwrap();
//!
//! let mut labels = SequentialLabels::new();
//! let compiled = CodeGenerator::new(root, &mut labels).compile().unwrap();
//! assert_eq!(compiled.class_name, "Empty");
//! assert!(compiled.code.is_empty());
//! ```

mod decl;
mod expr;
mod stmt;

#[cfg(test)]
pub(crate) mod test_support;

use jackc_core::{
    CompilationError, NodeKind, NodePos, Production, StorageKind, SubroutineKind, TokenKind,
};
use jackc_tree::{Node, TreeCursor, strip_padding};

use crate::labels::LabelSource;
use crate::symbol_table::{Symbol, SymbolTable};
use crate::vm::{Segment, VmCode, VmEmitter};

type Result<T> = std::result::Result<T, CompilationError>;

/// Operating system routines the generated code calls.
pub mod os {
    /// `Memory.alloc(size)`
    pub const MEMORY_ALLOC: &str = "Memory.alloc";
    /// `String.new(maxLength)`
    pub const STRING_NEW: &str = "String.new";
    /// `String.appendChar(this, c)`
    pub const STRING_APPEND_CHAR: &str = "String.appendChar";
    /// `Math.multiply(x, y)`
    pub const MATH_MULTIPLY: &str = "Math.multiply";
    /// `Math.divide(x, y)`
    pub const MATH_DIVIDE: &str = "Math.divide";
}

/// Largest value `push constant` can encode.
pub const MAX_CONSTANT: u16 = 32767;

// ============================================================================
// Types
// ============================================================================

/// Options for one class compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Strip the analyzer's one-space padding from every token before compiling.
    pub strip_padding: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            strip_padding: true,
        }
    }
}

/// The subroutine currently being compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubroutineContext {
    pub name: String,
    pub return_type: String,
    pub kind: SubroutineKind,
}

impl SubroutineContext {
    pub fn is_void(&self) -> bool {
        self.return_type == "void"
    }
}

/// Output of a successful class compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledClass {
    pub class_name: String,
    pub code: VmCode,
}

/// A resolved variable: where it is pushed from and popped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Variable {
    segment: Segment,
    index: u16,
}

impl From<&Symbol> for Variable {
    fn from(symbol: &Symbol) -> Self {
        Self {
            segment: Segment::of(symbol.kind),
            index: symbol.index,
        }
    }
}

// ============================================================================
// CodeGenerator
// ============================================================================

/// Compiles one class tree to VM code.
///
/// Each instance owns fresh symbol tables and a fresh cursor; only the label
/// source is borrowed, so ids keep increasing across classes.
pub struct CodeGenerator<'ast, 'l> {
    cursor: TreeCursor<'ast>,
    emitter: VmEmitter,
    class_table: SymbolTable,
    subroutine_table: SymbolTable,
    class_name: String,
    subroutine: Option<SubroutineContext>,
    labels: &'l mut dyn LabelSource,
}

impl<'ast, 'l> CodeGenerator<'ast, 'l> {
    /// Create a generator for the class rooted at `root` with default options.
    pub fn new(root: &Node<'ast>, labels: &'l mut dyn LabelSource) -> Self {
        Self::with_options(root, labels, CompileOptions::default())
    }

    pub fn with_options(
        root: &Node<'ast>,
        labels: &'l mut dyn LabelSource,
        options: CompileOptions,
    ) -> Self {
        let mut cursor = TreeCursor::new(root);
        if options.strip_padding {
            cursor.rewrite_values(strip_padding);
        }

        Self {
            cursor,
            emitter: VmEmitter::new(),
            class_table: SymbolTable::new(),
            subroutine_table: SymbolTable::new(),
            class_name: String::new(),
            subroutine: None,
            labels,
        }
    }

    /// Compile the whole class.
    ///
    /// Fails on the first structural or semantic error; no partial code is
    /// returned.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn compile(mut self) -> Result<CompiledClass> {
        self.compile_class()?;
        Ok(CompiledClass {
            class_name: self.class_name,
            code: self.emitter.finish(),
        })
    }

    // ==========================================================================
    // Assertion Primitives
    // ==========================================================================

    /// Consume the current node if it has kind `kind`.
    fn expect_kind(&mut self, kind: impl Into<NodeKind>) -> Result<()> {
        let kind = kind.into();
        if self.cursor.current_kind() == Some(kind) {
            self.cursor.advance();
            Ok(())
        } else {
            Err(self.mismatch(describe_kind(kind)))
        }
    }

    /// Consume the current node if its value is `value`.
    fn expect_value(&mut self, value: &str) -> Result<()> {
        if self.cursor.current_value() == Some(value) {
            self.cursor.advance();
            Ok(())
        } else {
            Err(self.mismatch(format!("'{value}'")))
        }
    }

    /// Succeed only if the whole tree has been consumed.
    fn expect_end(&self) -> Result<()> {
        if self.cursor.is_at_end() {
            Ok(())
        } else {
            Err(self.mismatch("end of tree"))
        }
    }

    /// Return the current value and advance.
    fn read_value(&mut self) -> Result<&'ast str> {
        let value = self
            .cursor
            .current_value()
            .ok_or_else(|| self.mismatch("a node"))?;
        self.cursor.advance();
        Ok(value)
    }

    /// Return the value of a terminal of kind `kind` and advance.
    fn read_terminal(&mut self, kind: TokenKind) -> Result<&'ast str> {
        if self.cursor.current_kind() != Some(NodeKind::Token(kind)) {
            return Err(self.mismatch(kind.name()));
        }
        self.read_value()
    }

    fn read_identifier(&mut self) -> Result<&'ast str> {
        self.read_terminal(TokenKind::Identifier)
    }

    /// Read a type name: a primitive keyword (`int`, `void`, ...) or a class name.
    fn read_type(&mut self) -> Result<&'ast str> {
        match (self.cursor.current_kind(), self.cursor.current_value()) {
            (Some(NodeKind::Token(TokenKind::Keyword | TokenKind::Identifier)), Some(value)) => {
                self.cursor.advance();
                Ok(value)
            }
            _ => Err(self.mismatch("type")),
        }
    }

    /// Read a keyword and map it with `parse`.
    fn read_keyword<T>(&mut self, expected: &str, parse: fn(&str) -> Option<T>) -> Result<T> {
        let parsed = match (self.cursor.current_kind(), self.cursor.current_value()) {
            (Some(NodeKind::Token(TokenKind::Keyword)), Some(value)) => parse(value),
            _ => None,
        };
        let parsed = parsed.ok_or_else(|| self.mismatch(expected))?;
        self.cursor.advance();
        Ok(parsed)
    }

    // ==========================================================================
    // Lookahead
    // ==========================================================================

    /// Whether the current node is the production `production`.
    fn at(&self, production: Production) -> bool {
        self.cursor.current_kind() == Some(NodeKind::Production(production))
    }

    fn at_terminal(&self, kind: TokenKind, value: &str) -> bool {
        self.cursor.current_kind() == Some(NodeKind::Token(kind))
            && self.cursor.current_value() == Some(value)
    }

    fn at_symbol(&self, symbol: &str) -> bool {
        self.at_terminal(TokenKind::Symbol, symbol)
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        self.at_terminal(TokenKind::Keyword, keyword)
    }

    // ==========================================================================
    // Errors
    // ==========================================================================

    /// Error for "expected `expected`" at the current node.
    fn mismatch(&self, expected: impl Into<String>) -> CompilationError {
        let expected = expected.into();
        match (self.cursor.current_kind(), self.cursor.current_value()) {
            (Some(kind), Some(value)) => CompilationError::StructuralMismatch {
                expected,
                found: describe_node(kind, value),
                pos: self.cursor.position(),
            },
            _ => CompilationError::UnexpectedEndOfInput { expected },
        }
    }

    // ==========================================================================
    // Symbols
    // ==========================================================================

    /// Define a symbol in the table its storage kind belongs to.
    fn define(
        &mut self,
        name: &str,
        declared_type: &str,
        kind: StorageKind,
        pos: NodePos,
    ) -> Result<()> {
        let table = if kind.is_class_level() {
            &mut self.class_table
        } else {
            &mut self.subroutine_table
        };
        if table.define(name, declared_type, kind) {
            return Ok(());
        }
        if !table.has(name) {
            return Err(CompilationError::LimitExceeded {
                what: format!("{kind} variables"),
                pos,
            });
        }
        log::warn!(
            "{}: ignoring duplicate {} '{}', first definition wins",
            self.class_name,
            kind,
            name
        );
        Ok(())
    }

    /// Look a name up, subroutine scope first.
    fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.subroutine_table
            .get(name)
            .or_else(|| self.class_table.get(name))
    }

    /// Resolve a name that must be a variable.
    fn resolve(&self, name: &str, pos: NodePos) -> Result<Variable> {
        self.lookup(name)
            .map(Variable::from)
            .ok_or_else(|| CompilationError::UnresolvedSymbol {
                name: name.to_string(),
                pos,
            })
    }

    /// Validate a value for `push constant`.
    fn constant(&self, value: u32, text: &str, pos: NodePos) -> Result<u16> {
        u16::try_from(value)
            .ok()
            .filter(|v| *v <= MAX_CONSTANT)
            .ok_or_else(|| CompilationError::InvalidConstant {
                value: text.to_string(),
                pos,
            })
    }
}

fn describe_kind(kind: NodeKind) -> String {
    match kind {
        NodeKind::Production(p) => format!("<{p}>"),
        NodeKind::Token(t) => t.name().to_string(),
    }
}

fn describe_node(kind: NodeKind, value: &str) -> String {
    match kind {
        NodeKind::Production(_) => describe_kind(kind),
        NodeKind::Token(_) => format!("'{value}'"),
    }
}

/// Compile the class rooted at `root` with default options.
pub fn compile_class(root: &Node<'_>, labels: &mut dyn LabelSource) -> Result<CompiledClass> {
    CodeGenerator::new(root, labels).compile()
}
