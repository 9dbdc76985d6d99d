//! Expressions, terms, subroutine calls and expression lists.
//!
//! Expressions have no precedence: `a + b * c` is `(a + b) * c`. Terms are
//! told apart by their first node alone, and identifiers by the node after
//! them.

use jackc_core::{
    BinaryOp, CompilationError, KeywordConstant, NodeKind, NodePos, Production, TokenKind, UnaryOp,
};

use super::{CodeGenerator, Result, Variable, os};
use crate::vm::{ArithmeticOp, Segment};

impl<'ast, 'l> CodeGenerator<'ast, 'l> {
    /// `term (op term)*`
    pub(super) fn compile_expression(&mut self) -> Result<()> {
        self.expect_kind(Production::Expression)?;
        self.compile_term()?;
        while let Some(op) = self.peek_binary_op() {
            self.cursor.advance();
            self.compile_term()?;
            self.compile_binary_op(op);
        }
        Ok(())
    }

    fn peek_binary_op(&self) -> Option<BinaryOp> {
        match self.cursor.current_kind() {
            Some(NodeKind::Token(TokenKind::Symbol)) => {
                self.cursor.current_value().and_then(BinaryOp::from_symbol)
            }
            _ => None,
        }
    }

    fn compile_binary_op(&mut self, op: BinaryOp) {
        let arithmetic = match op {
            BinaryOp::Add => ArithmeticOp::Add,
            BinaryOp::Sub => ArithmeticOp::Sub,
            BinaryOp::And => ArithmeticOp::And,
            BinaryOp::Or => ArithmeticOp::Or,
            BinaryOp::Less => ArithmeticOp::Lt,
            BinaryOp::Greater => ArithmeticOp::Gt,
            BinaryOp::Equal => ArithmeticOp::Eq,
            BinaryOp::Mul => return self.emitter.call(os::MATH_MULTIPLY, 2),
            BinaryOp::Div => return self.emitter.call(os::MATH_DIVIDE, 2),
        };
        self.emitter.arithmetic(arithmetic);
    }

    fn compile_term(&mut self) -> Result<()> {
        self.expect_kind(Production::Term)?;
        let pos = self.cursor.position();
        let kind = self.cursor.current_kind();
        let value = self.cursor.current_value().unwrap_or_default();

        match kind {
            Some(NodeKind::Token(TokenKind::Symbol)) if value == "(" => {
                self.cursor.advance();
                self.compile_expression()?;
                self.expect_value(")")
            }
            Some(NodeKind::Token(TokenKind::Symbol)) => {
                let op = UnaryOp::from_symbol(value).ok_or_else(|| self.mismatch("term"))?;
                self.cursor.advance();
                self.compile_term()?;
                self.emitter.arithmetic(match op {
                    UnaryOp::Neg => ArithmeticOp::Neg,
                    UnaryOp::Not => ArithmeticOp::Not,
                });
                Ok(())
            }
            Some(NodeKind::Token(TokenKind::Keyword)) => {
                let constant = self.read_keyword("keyword constant", KeywordConstant::from_keyword)?;
                self.compile_keyword_constant(constant);
                Ok(())
            }
            Some(NodeKind::Token(TokenKind::IntegerConstant)) => {
                self.cursor.advance();
                let invalid = || CompilationError::InvalidConstant {
                    value: value.to_string(),
                    pos,
                };
                let parsed: u32 = value.parse().map_err(|_| invalid())?;
                let constant = self.constant(parsed, value, pos)?;
                self.emitter.push(Segment::Constant, constant);
                Ok(())
            }
            Some(NodeKind::Token(TokenKind::StringConstant)) => {
                self.cursor.advance();
                self.compile_string(value, pos)
            }
            Some(NodeKind::Token(TokenKind::Identifier)) => {
                self.cursor.advance();
                if self.at_symbol("(") || self.at_symbol(".") {
                    self.compile_call(value)
                } else if self.at_symbol("[") {
                    self.cursor.advance();
                    let base = self.resolve(value, pos)?;
                    self.compile_element_address(base)?;
                    self.emitter.pop(Segment::Pointer, 1);
                    self.emitter.push(Segment::That, 0);
                    Ok(())
                } else {
                    let variable = self.resolve(value, pos)?;
                    self.emitter.push(variable.segment, variable.index);
                    Ok(())
                }
            }
            _ => Err(self.mismatch("term")),
        }
    }

    fn compile_keyword_constant(&mut self, constant: KeywordConstant) {
        match constant {
            KeywordConstant::True => {
                self.emitter.push(Segment::Constant, 0);
                self.emitter.arithmetic(ArithmeticOp::Not);
            }
            KeywordConstant::False | KeywordConstant::Null => {
                self.emitter.push(Segment::Constant, 0);
            }
            KeywordConstant::This => self.emitter.push(Segment::Pointer, 0),
        }
    }

    /// Build the string with `String.new` and one `appendChar` per character.
    fn compile_string(&mut self, value: &str, pos: NodePos) -> Result<()> {
        let length = u32::try_from(value.chars().count()).unwrap_or(u32::MAX);
        let length = self.constant(length, value, pos)?;
        self.emitter.push(Segment::Constant, length);
        self.emitter.call(os::STRING_NEW, 1);

        for c in value.chars() {
            let code = self.constant(u32::from(c), &c.to_string(), pos)?;
            self.emitter.push(Segment::Constant, code);
            self.emitter.call(os::STRING_APPEND_CHAR, 2);
        }
        Ok(())
    }

    /// A call whose leading identifier has not been read yet.
    pub(super) fn compile_subroutine_call(&mut self) -> Result<()> {
        let name = self.read_identifier()?;
        if self.at_symbol("(") || self.at_symbol(".") {
            self.compile_call(name)
        } else {
            Err(self.mismatch("'(' or '.'"))
        }
    }

    /// The rest of a call after its leading identifier `name`.
    ///
    /// - `name(args)` calls a method of the current class on `this`
    /// - `var.m(args)` calls `m` on the object in `var`, typed by its declaration
    /// - `Class.f(args)` calls `f` with no receiver when `Class` is not a variable
    fn compile_call(&mut self, name: &str) -> Result<()> {
        if self.at_symbol("(") {
            self.emitter.push(Segment::Pointer, 0);
            let n_args = self.compile_arguments()?;
            let n_args = self.with_receiver(n_args)?;
            let target = format!("{}.{}", self.class_name, name);
            self.emitter.call(&target, n_args);
            return Ok(());
        }

        self.expect_value(".")?;
        let method = self.read_identifier()?;
        let receiver = self
            .lookup(name)
            .map(|symbol| (Variable::from(symbol), symbol.declared_type.clone()));

        match receiver {
            Some((variable, declared_type)) => {
                self.emitter.push(variable.segment, variable.index);
                let n_args = self.compile_arguments()?;
                let n_args = self.with_receiver(n_args)?;
                self.emitter.call(&format!("{declared_type}.{method}"), n_args);
            }
            None => {
                let n_args = self.compile_arguments()?;
                self.emitter.call(&format!("{name}.{method}"), n_args);
            }
        }
        Ok(())
    }

    /// `( expressionList )`, returning the argument count.
    fn compile_arguments(&mut self) -> Result<u16> {
        self.expect_value("(")?;
        let n_args = self.compile_expression_list()?;
        self.expect_value(")")?;
        Ok(n_args)
    }

    /// Compile each expression of the list and return how many there were.
    fn compile_expression_list(&mut self) -> Result<u16> {
        self.expect_kind(Production::ExpressionList)?;
        let mut count: u16 = 0;
        while self.at(Production::Expression) {
            self.compile_expression()?;
            count = count
                .checked_add(1)
                .ok_or_else(|| self.too_many_arguments())?;
            if self.at_symbol(",") {
                self.cursor.advance();
            } else {
                break;
            }
        }
        Ok(count)
    }

    /// Argument count once the receiver is pushed in front.
    fn with_receiver(&self, n_args: u16) -> Result<u16> {
        n_args
            .checked_add(1)
            .ok_or_else(|| self.too_many_arguments())
    }

    fn too_many_arguments(&self) -> CompilationError {
        CompilationError::LimitExceeded {
            what: "arguments in one call".to_string(),
            pos: self.cursor.position(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{compile, compile_err, compile_main};
    use jackc_core::CompilationError;

    #[test]
    fn operators_apply_left_to_right() {
        let code = compile_main(|b| {
            b.var_dec("int", &["x"]);
            b.statements(|b| {
                b.let_statement("x", |e| {
                    e.int_term(1).op("+").int_term(2).op("*").int_term(3);
                });
            });
        });
        assert_eq!(
            code,
            [
                "push constant 1",
                "push constant 2",
                "add",
                "push constant 3",
                "call Math.multiply 2",
                "pop local 0",
            ]
        );
    }

    #[test]
    fn comparison_and_logic_ops() {
        let code = compile_main(|b| {
            b.var_dec("boolean", &["x"]);
            b.statements(|b| {
                b.let_statement("x", |e| {
                    e.int_term(1)
                        .op(">")
                        .int_term(2)
                        .op("=")
                        .int_term(0)
                        .op("|")
                        .int_term(4)
                        .op("&")
                        .int_term(5)
                        .op("/")
                        .int_term(6)
                        .op("-")
                        .int_term(7);
                });
            });
        });
        let ops: Vec<&str> = code
            .iter()
            .map(String::as_str)
            .filter(|line| !line.starts_with("push"))
            .collect();
        assert_eq!(
            ops,
            ["gt", "eq", "or", "and", "call Math.divide 2", "sub", "pop local 0"]
        );
    }

    #[test]
    fn parentheses_group_first() {
        let code = compile_main(|b| {
            b.var_dec("int", &["x"]);
            b.statements(|b| {
                b.let_statement("x", |e| {
                    e.int_term(2).op("*").paren_term(|e| {
                        e.int_term(3).op("+").int_term(4);
                    });
                });
            });
        });
        assert_eq!(
            code,
            [
                "push constant 2",
                "push constant 3",
                "push constant 4",
                "add",
                "call Math.multiply 2",
                "pop local 0",
            ]
        );
    }

    #[test]
    fn unary_ops_follow_operand() {
        let code = compile_main(|b| {
            b.var_dec("int", &["x"]);
            b.statements(|b| {
                b.let_statement("x", |e| {
                    e.unary_term("-", |t| {
                        t.var_term("x");
                    })
                    .op("+")
                    .unary_term("~", |t| {
                        t.int_term(0);
                    });
                });
            });
        });
        assert_eq!(
            code,
            [
                "push local 0",
                "neg",
                "push constant 0",
                "not",
                "add",
                "pop local 0",
            ]
        );
    }

    #[test]
    fn keyword_constants() {
        let code = compile_main(|b| {
            b.var_dec("boolean", &["x"]);
            b.statements(|b| {
                for keyword in ["true", "false", "null"] {
                    b.let_statement("x", |e| {
                        e.keyword_term(keyword);
                    });
                }
            });
        });
        assert_eq!(
            code,
            [
                "push constant 0",
                "not",
                "pop local 0",
                "push constant 0",
                "pop local 0",
                "push constant 0",
                "pop local 0",
            ]
        );
    }

    #[test]
    fn string_literal_builds_string_object() {
        let code = compile_main(|b| {
            b.statements(|b| {
                b.do_statement("Output.printString", |b| {
                    b.arg(|e| {
                        e.string_term("AB");
                    });
                });
            });
        });
        assert_eq!(
            code,
            [
                "push constant 2",
                "call String.new 1",
                "push constant 65",
                "call String.appendChar 2",
                "push constant 66",
                "call String.appendChar 2",
                "call Output.printString 1",
                "pop temp 0",
            ]
        );
    }

    #[test]
    fn array_read() {
        let code = compile_main(|b| {
            b.var_dec("Array", &["a"]).var_dec("int", &["x"]);
            b.statements(|b| {
                b.let_statement("x", |e| {
                    e.index_term("a", |e| {
                        e.int_term(3);
                    });
                });
            });
        });
        assert_eq!(
            code,
            [
                "push constant 3",
                "push local 0",
                "add",
                "pop pointer 1",
                "push that 0",
                "pop local 1",
            ]
        );
    }

    #[test]
    fn call_forms() {
        let code = compile(|b| {
            b.class("Point", |b| {
                b.subroutine_dec("method", "void", "demo", &[("Point", "q")], |b| {
                    b.var_dec("Point", &["p"]);
                    b.statements(|b| {
                        b.do_statement("p.dist", |b| {
                            b.arg(|e| {
                                e.var_term("q");
                            });
                        });
                        b.do_statement("Point.origin", |_| {});
                        b.do_statement("draw", |b| {
                            b.arg(|e| {
                                e.int_term(1);
                            })
                            .arg(|e| {
                                e.int_term(2);
                            });
                        });
                        b.return_statement();
                    });
                });
            });
        });
        assert_eq!(
            code,
            [
                "function Point.demo 1",
                "push argument 0",
                "pop pointer 0",
                "push local 0",
                "push argument 1",
                "call Point.dist 2",
                "pop temp 0",
                "call Point.origin 0",
                "pop temp 0",
                "push pointer 0",
                "push constant 1",
                "push constant 2",
                "call Point.draw 3",
                "pop temp 0",
                "push constant 0",
                "return",
            ]
        );
    }

    #[test]
    fn largest_constant_is_accepted() {
        let code = compile_main(|b| {
            b.var_dec("int", &["x"]);
            b.statements(|b| {
                b.let_statement("x", |e| {
                    e.int_term(32767);
                });
            });
        });
        assert_eq!(code[0], "push constant 32767");
    }

    #[test]
    fn out_of_range_constant_fails() {
        let err = compile_err(|b| {
            b.class("Main", |b| {
                b.subroutine_dec("function", "int", "big", &[], |b| {
                    b.statements(|b| {
                        b.return_value(|e| {
                            e.int_term(32768);
                        });
                    });
                });
            });
        });
        assert!(matches!(err, CompilationError::InvalidConstant { ref value, .. } if value == "32768"));
    }

    #[test]
    fn unknown_variable_read_fails() {
        let err = compile_err(|b| {
            b.class("Main", |b| {
                b.subroutine_dec("function", "int", "f", &[], |b| {
                    b.statements(|b| {
                        b.return_value(|e| {
                            e.var_term("nope");
                        });
                    });
                });
            });
        });
        assert!(matches!(err, CompilationError::UnresolvedSymbol { ref name, .. } if name == "nope"));
    }
}
