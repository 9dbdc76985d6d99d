//! Statements.
//!
//! `compile_statements` is a small state machine over the kind of the next
//! node: it dispatches while that kind is one of the five statement
//! productions and stops at anything else.

use jackc_core::{NodeKind, Production};

use super::{CodeGenerator, Result, SubroutineContext, Variable};
use crate::labels::{IfLabels, WhileLabels};
use crate::vm::{ArithmeticOp, Segment};

impl<'ast, 'l> CodeGenerator<'ast, 'l> {
    pub(super) fn compile_statements(&mut self) -> Result<()> {
        self.expect_kind(Production::Statements)?;
        while let Some(NodeKind::Production(statement)) = self.cursor.current_kind() {
            match statement {
                Production::LetStatement => self.compile_let()?,
                Production::IfStatement => self.compile_if()?,
                Production::WhileStatement => self.compile_while()?,
                Production::DoStatement => self.compile_do()?,
                Production::ReturnStatement => self.compile_return()?,
                _ => break,
            }
        }
        Ok(())
    }

    /// `let name = e;` or `let name[i] = e;`
    fn compile_let(&mut self) -> Result<()> {
        self.expect_kind(Production::LetStatement)?;
        self.expect_value("let")?;
        let pos = self.cursor.position();
        let name = self.read_identifier()?;
        let target = self.resolve(name, pos)?;

        if self.at_symbol("[") {
            self.cursor.advance();
            self.compile_element_address(target)?;
            self.expect_value("=")?;
            self.compile_expression()?;
            self.expect_value(";")?;

            // The right-hand side may itself have moved pointer 1.
            self.emitter.pop(Segment::Temp, 0);
            self.emitter.pop(Segment::Pointer, 1);
            self.emitter.push(Segment::Temp, 0);
            self.emitter.pop(Segment::That, 0);
        } else {
            self.expect_value("=")?;
            self.compile_expression()?;
            self.expect_value(";")?;
            self.emitter.pop(target.segment, target.index);
        }
        Ok(())
    }

    /// Push `base + index` for `base[index]`; the cursor sits after `[`.
    pub(super) fn compile_element_address(&mut self, base: Variable) -> Result<()> {
        self.compile_expression()?;
        self.expect_value("]")?;
        self.emitter.push(base.segment, base.index);
        self.emitter.arithmetic(ArithmeticOp::Add);
        Ok(())
    }

    fn compile_if(&mut self) -> Result<()> {
        self.expect_kind(Production::IfStatement)?;
        let labels = IfLabels::new(self.labels.next_id());

        self.expect_value("if")?;
        self.compile_condition()?;
        self.emitter.if_goto(&labels.on_true);
        self.emitter.goto(&labels.on_false);
        self.emitter.label(&labels.on_true);
        self.compile_block()?;

        if self.at_keyword("else") {
            self.cursor.advance();
            self.emitter.goto(&labels.end);
            self.emitter.label(&labels.on_false);
            self.compile_block()?;
            self.emitter.label(&labels.end);
        } else {
            self.emitter.label(&labels.on_false);
        }
        Ok(())
    }

    fn compile_while(&mut self) -> Result<()> {
        self.expect_kind(Production::WhileStatement)?;
        let labels = WhileLabels::new(self.labels.next_id());

        self.expect_value("while")?;
        self.emitter.label(&labels.condition);
        self.compile_condition()?;
        self.emitter.arithmetic(ArithmeticOp::Not);
        self.emitter.if_goto(&labels.end);
        self.compile_block()?;
        self.emitter.goto(&labels.condition);
        self.emitter.label(&labels.end);
        Ok(())
    }

    /// `do call;` with the call inline or wrapped in an expression.
    fn compile_do(&mut self) -> Result<()> {
        self.expect_kind(Production::DoStatement)?;
        self.expect_value("do")?;
        if self.at(Production::Expression) {
            self.compile_expression()?;
        } else {
            self.compile_subroutine_call()?;
        }
        self.expect_value(";")?;
        self.emitter.pop(Segment::Temp, 0);
        Ok(())
    }

    /// The return type decides what is returned. A void subroutine always
    /// returns `constant 0`; a stray value is still evaluated and discarded.
    fn compile_return(&mut self) -> Result<()> {
        self.expect_kind(Production::ReturnStatement)?;
        self.expect_value("return")?;

        let is_void = self.subroutine.as_ref().is_some_and(SubroutineContext::is_void);
        let has_value = self.at(Production::Expression);

        if has_value {
            self.compile_expression()?;
        }
        if is_void {
            if has_value {
                self.warn_return("void subroutine returns a value");
                self.emitter.pop(Segment::Temp, 0);
            }
            self.emitter.push(Segment::Constant, 0);
        } else if !has_value {
            self.warn_return("non-void subroutine returns no value");
        }

        self.expect_value(";")?;
        self.emitter.ret();
        Ok(())
    }

    fn warn_return(&self, message: &str) {
        let name = self.subroutine.as_ref().map_or("?", |s| s.name.as_str());
        log::warn!("{}.{}: {}", self.class_name, name, message);
    }

    /// `( expression )`
    fn compile_condition(&mut self) -> Result<()> {
        self.expect_value("(")?;
        self.compile_expression()?;
        self.expect_value(")")
    }

    /// `{ statements }`
    fn compile_block(&mut self) -> Result<()> {
        self.expect_value("{")?;
        self.compile_statements()?;
        self.expect_value("}")
    }
}
