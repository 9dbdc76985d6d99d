//! Tree-building shortcuts for the code generator's unit tests.

use bumpalo::Bump;
use jackc_core::CompilationError;
use jackc_tree::TreeBuilder;

use super::{CodeGenerator, CompiledClass};
use crate::labels::SequentialLabels;

/// Build a tree with `build` and compile it with labels starting at zero.
pub(crate) fn try_compile(
    build: impl FnOnce(&mut TreeBuilder<'_>),
) -> Result<CompiledClass, CompilationError> {
    let arena = Bump::new();
    let mut builder = TreeBuilder::new(&arena);
    build(&mut builder);
    let root = builder.finish().expect("test tree should be well formed");

    let mut labels = SequentialLabels::new();
    CodeGenerator::new(root, &mut labels).compile()
}

/// Compile and return the VM lines.
pub(crate) fn compile(build: impl FnOnce(&mut TreeBuilder<'_>)) -> Vec<String> {
    match try_compile(build) {
        Ok(compiled) => compiled.code.lines(),
        Err(err) => panic!("compilation failed: {err}"),
    }
}

/// Compile a tree that must be rejected.
pub(crate) fn compile_err(build: impl FnOnce(&mut TreeBuilder<'_>)) -> CompilationError {
    match try_compile(build) {
        Ok(compiled) => panic!("expected an error, got:\n{}", compiled.code),
        Err(err) => err,
    }
}

/// Compile `function void Main.main` whose body is filled by `body`, and
/// return the lines after the function header.
pub(crate) fn compile_main(body: impl FnOnce(&mut TreeBuilder<'_>)) -> Vec<String> {
    let mut lines = compile(|b| {
        b.class("Main", |b| {
            b.subroutine_dec("function", "void", "main", &[], body);
        });
    });
    lines.remove(0);
    lines
}
