//! Class, variable and subroutine declarations.

use jackc_core::{Production, StorageKind, SubroutineKind};

use super::{CodeGenerator, Result, SubroutineContext, os};
use crate::vm::Segment;

impl<'ast, 'l> CodeGenerator<'ast, 'l> {
    /// `class Name { classVarDec* subroutineDec* }`, which must span the whole tree.
    pub(super) fn compile_class(&mut self) -> Result<()> {
        self.expect_kind(Production::Class)?;
        self.expect_value("class")?;
        self.class_name = self.read_identifier()?.to_string();
        log::debug!("compiling class {}", self.class_name);

        self.expect_value("{")?;
        while self.at(Production::ClassVarDec) {
            self.compile_class_var_dec()?;
        }
        while self.at(Production::SubroutineDec) {
            self.compile_subroutine_dec()?;
        }
        self.expect_value("}")?;
        self.expect_end()
    }

    /// `(static | field) type name (, name)* ;`
    fn compile_class_var_dec(&mut self) -> Result<()> {
        self.expect_kind(Production::ClassVarDec)?;
        let kind = self.read_keyword("'static' or 'field'", StorageKind::from_class_keyword)?;
        self.compile_names(kind)
    }

    /// `var type name (, name)* ;`
    fn compile_var_dec(&mut self) -> Result<()> {
        self.expect_kind(Production::VarDec)?;
        self.expect_value("var")?;
        self.compile_names(StorageKind::Local)
    }

    /// The `type name (, name)* ;` tail shared by both variable declarations.
    fn compile_names(&mut self, kind: StorageKind) -> Result<()> {
        let declared_type = self.read_type()?;
        loop {
            let pos = self.cursor.position();
            let name = self.read_identifier()?;
            self.define(name, declared_type, kind, pos)?;
            if self.at_symbol(",") {
                self.cursor.advance();
            } else {
                break;
            }
        }
        self.expect_value(";")
    }

    fn compile_subroutine_dec(&mut self) -> Result<()> {
        self.expect_kind(Production::SubroutineDec)?;
        self.subroutine_table.start_scope();

        let kind = self.read_keyword(
            "'constructor', 'function' or 'method'",
            SubroutineKind::from_keyword,
        )?;
        let return_type = self.read_type()?;
        let name = self.read_identifier()?;
        self.subroutine = Some(SubroutineContext {
            name: name.to_string(),
            return_type: return_type.to_string(),
            kind,
        });

        self.expect_value("(")?;
        self.compile_parameter_list(kind)?;
        self.expect_value(")")?;
        self.compile_subroutine_body(kind, name)?;

        self.subroutine = None;
        Ok(())
    }

    /// Parameters become arguments; a method's receiver takes slot 0 first.
    fn compile_parameter_list(&mut self, kind: SubroutineKind) -> Result<()> {
        self.expect_kind(Production::ParameterList)?;
        if kind == SubroutineKind::Method {
            let class_name = self.class_name.clone();
            let pos = self.cursor.position();
            self.define("this", &class_name, StorageKind::Argument, pos)?;
        }

        if self.at_symbol(")") {
            return Ok(());
        }
        loop {
            let declared_type = self.read_type()?;
            let pos = self.cursor.position();
            let name = self.read_identifier()?;
            self.define(name, declared_type, StorageKind::Argument, pos)?;
            if !self.at_symbol(",") {
                return Ok(());
            }
            self.cursor.advance();
        }
    }

    fn compile_subroutine_body(&mut self, kind: SubroutineKind, name: &str) -> Result<()> {
        self.expect_kind(Production::SubroutineBody)?;
        self.expect_value("{")?;
        while self.at(Production::VarDec) {
            self.compile_var_dec()?;
        }

        let n_locals = self.subroutine_table.count_of(StorageKind::Local);
        log::debug!(
            "compiling {} {}.{} ({} locals)",
            kind,
            self.class_name,
            name,
            n_locals
        );
        let qualified = format!("{}.{}", self.class_name, name);
        self.emitter.function(&qualified, n_locals);

        match kind {
            SubroutineKind::Constructor => {
                let n_fields = self.class_table.count_of(StorageKind::Field);
                self.emitter.push(Segment::Constant, n_fields);
                self.emitter.call(os::MEMORY_ALLOC, 1);
                self.emitter.pop(Segment::Pointer, 0);
            }
            SubroutineKind::Method => {
                self.emitter.push(Segment::Argument, 0);
                self.emitter.pop(Segment::Pointer, 0);
            }
            SubroutineKind::Function => {}
        }

        self.compile_statements()?;
        self.expect_value("}")
    }
}
