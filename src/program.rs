//! Multi-class programs.
//!
//! A Jack program is a set of classes whose VM code is later merged into one
//! instruction stream. [`Program`] compiles each class with the same label
//! source, so label names never collide across classes.

use bumpalo::Bump;

use jackc_compiler::{CodeGenerator, CompileOptions, LabelSource, SequentialLabels, VmCode};
use jackc_core::{CompilationError, JackError};
use jackc_tree::{Node, load_json};

/// The compiled code of one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VmUnit {
    pub class_name: String,
    pub code: VmCode,
}

/// Outcome of [`Program::compile_all`].
#[derive(Debug, Default)]
pub struct ProgramReport {
    /// Units compiled successfully, in input order.
    pub units: Vec<VmUnit>,
    /// Input index and error of every class that failed.
    pub failures: Vec<(usize, CompilationError)>,
}

impl ProgramReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Compiles the classes of one program with a shared label source.
#[derive(Debug)]
pub struct Program<L: LabelSource = SequentialLabels> {
    labels: L,
    options: CompileOptions,
    units: Vec<VmUnit>,
}

impl Program {
    pub fn new() -> Self {
        Self::with_labels(SequentialLabels::new())
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: LabelSource> Program<L> {
    /// A program drawing label ids from `labels`.
    pub fn with_labels(labels: L) -> Self {
        Self {
            labels,
            options: CompileOptions::default(),
            units: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    /// Compile one class tree and record its unit.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn compile_class(&mut self, root: &Node<'_>) -> Result<&VmUnit, CompilationError> {
        let compiled = CodeGenerator::with_options(root, &mut self.labels, self.options).compile()?;
        log::debug!(
            "compiled class {} ({} instructions)",
            compiled.class_name,
            compiled.code.len()
        );

        self.units.push(VmUnit {
            class_name: compiled.class_name,
            code: compiled.code,
        });
        Ok(&self.units[self.units.len() - 1])
    }

    /// Load a class from the analyzer's JSON dump and compile it.
    pub fn compile_json(&mut self, text: &str) -> Result<&VmUnit, JackError> {
        let arena = Bump::new();
        let root = load_json(text, &arena)?;
        Ok(self.compile_class(root)?)
    }

    /// Compile every tree, continuing past failures.
    pub fn compile_all<'a, 'ast: 'a>(
        &mut self,
        roots: impl IntoIterator<Item = &'a Node<'ast>>,
    ) -> ProgramReport {
        let mut report = ProgramReport::default();
        for (index, root) in roots.into_iter().enumerate() {
            match self.compile_class(root) {
                Ok(unit) => report.units.push(unit.clone()),
                Err(err) => {
                    log::warn!("class #{index} failed to compile: {err}");
                    report.failures.push((index, err));
                }
            }
        }
        report
    }

    /// Units compiled so far, in compile order.
    pub fn units(&self) -> &[VmUnit] {
        &self.units
    }

    pub fn into_units(self) -> Vec<VmUnit> {
        self.units
    }

    pub fn labels(&self) -> &L {
        &self.labels
    }

    /// The code of every unit concatenated in compile order.
    pub fn merged_text(&self) -> String {
        self.units.iter().map(|unit| unit.code.to_string()).collect()
    }
}
