//! Grammar-shaped helpers for [`TreeBuilder`].
//!
//! Each helper appends one production laid out exactly as the analyzer
//! produces it, terminals included. Closures fill the variable parts:
//! expression closures append terms and operators, statement closures
//! append statements.
//!
//! ```
//! use bumpalo::Bump;
//! use jackc_tree::TreeBuilder;
//!
//! let arena = Bump::new();
//! let mut b = TreeBuilder::new(&arena);
//! b.class("Main", |b| {
//!     b.subroutine_dec("function", "void", "main", &[], |b| {
//!         b.statements(|b| {
//!             b.do_statement("Output.printInt", |b| {
//!                 b.arg(|e| {
//!                     e.int_term(1).op("+").int_term(2);
//!                 });
//!             });
//!             b.return_statement();
//!         });
//!     });
//! });
//! assert!(b.finish().is_ok());
//! ```

use jackc_core::Production;

use crate::TreeBuilder;

const PRIMITIVE_TYPES: [&str; 4] = ["int", "char", "boolean", "void"];

impl<'ast> TreeBuilder<'ast> {
    // ==========================================================================
    // Declarations
    // ==========================================================================

    /// `class Name { body }`
    pub fn class(&mut self, name: &str, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.node(Production::Class, |b| {
            b.keyword("class").identifier(name).symbol("{");
            body(b);
            b.symbol("}");
        })
    }

    /// `static|field type a, b, ...;`
    pub fn class_var_dec(&mut self, kind: &str, ty: &str, names: &[&str]) -> &mut Self {
        self.node(Production::ClassVarDec, |b| {
            b.keyword(kind).type_name(ty).name_list(names).symbol(";");
        })
    }

    /// `kind returnType name(params) { body }`
    ///
    /// `body` fills the subroutine body between the braces: `var_dec`s
    /// followed by one `statements`.
    pub fn subroutine_dec(
        &mut self,
        kind: &str,
        return_type: &str,
        name: &str,
        params: &[(&str, &str)],
        body: impl FnOnce(&mut Self),
    ) -> &mut Self {
        self.node(Production::SubroutineDec, |b| {
            b.keyword(kind).type_name(return_type).identifier(name);
            b.symbol("(");
            b.node(Production::ParameterList, |b| {
                for (i, (ty, param)) in params.iter().enumerate() {
                    if i > 0 {
                        b.symbol(",");
                    }
                    b.type_name(ty).identifier(param);
                }
            });
            b.symbol(")");
            b.node(Production::SubroutineBody, |b| {
                b.symbol("{");
                body(b);
                b.symbol("}");
            });
        })
    }

    /// `var type a, b, ...;`
    pub fn var_dec(&mut self, ty: &str, names: &[&str]) -> &mut Self {
        self.node(Production::VarDec, |b| {
            b.keyword("var").type_name(ty).name_list(names).symbol(";");
        })
    }

    /// A type: a keyword for primitive types, an identifier for class names.
    pub fn type_name(&mut self, ty: &str) -> &mut Self {
        if PRIMITIVE_TYPES.contains(&ty) {
            self.keyword(ty)
        } else {
            self.identifier(ty)
        }
    }

    fn name_list(&mut self, names: &[&str]) -> &mut Self {
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                self.symbol(",");
            }
            self.identifier(name);
        }
        self
    }

    // ==========================================================================
    // Statements
    // ==========================================================================

    pub fn statements(&mut self, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.node(Production::Statements, body)
    }

    /// `let name = value;`
    pub fn let_statement(&mut self, name: &str, value: impl FnOnce(&mut Self)) -> &mut Self {
        self.node(Production::LetStatement, |b| {
            b.keyword("let").identifier(name).symbol("=");
            b.expression(value).symbol(";");
        })
    }

    /// `let name[index] = value;`
    pub fn let_index_statement(
        &mut self,
        name: &str,
        index: impl FnOnce(&mut Self),
        value: impl FnOnce(&mut Self),
    ) -> &mut Self {
        self.node(Production::LetStatement, |b| {
            b.keyword("let").identifier(name).symbol("[");
            b.expression(index).symbol("]").symbol("=");
            b.expression(value).symbol(";");
        })
    }

    /// `if (cond) { then }`
    pub fn if_statement(
        &mut self,
        cond: impl FnOnce(&mut Self),
        then: impl FnOnce(&mut Self),
    ) -> &mut Self {
        self.node(Production::IfStatement, |b| {
            b.keyword("if").symbol("(").expression(cond).symbol(")");
            b.symbol("{").statements(then).symbol("}");
        })
    }

    /// `if (cond) { then } else { otherwise }`
    pub fn if_else_statement(
        &mut self,
        cond: impl FnOnce(&mut Self),
        then: impl FnOnce(&mut Self),
        otherwise: impl FnOnce(&mut Self),
    ) -> &mut Self {
        self.node(Production::IfStatement, |b| {
            b.keyword("if").symbol("(").expression(cond).symbol(")");
            b.symbol("{").statements(then).symbol("}");
            b.keyword("else");
            b.symbol("{").statements(otherwise).symbol("}");
        })
    }

    /// `while (cond) { body }`
    pub fn while_statement(
        &mut self,
        cond: impl FnOnce(&mut Self),
        body: impl FnOnce(&mut Self),
    ) -> &mut Self {
        self.node(Production::WhileStatement, |b| {
            b.keyword("while").symbol("(").expression(cond).symbol(")");
            b.symbol("{").statements(body).symbol("}");
        })
    }

    /// `do target(args);` with the call laid out inline.
    pub fn do_statement(&mut self, target: &str, args: impl FnOnce(&mut Self)) -> &mut Self {
        self.node(Production::DoStatement, |b| {
            b.keyword("do").subroutine_call(target, args).symbol(";");
        })
    }

    /// `return;`
    pub fn return_statement(&mut self) -> &mut Self {
        self.node(Production::ReturnStatement, |b| {
            b.keyword("return").symbol(";");
        })
    }

    /// `return value;`
    pub fn return_value(&mut self, value: impl FnOnce(&mut Self)) -> &mut Self {
        self.node(Production::ReturnStatement, |b| {
            b.keyword("return").expression(value).symbol(";");
        })
    }

    // ==========================================================================
    // Expressions
    // ==========================================================================

    /// An `expression` node; `body` appends terms and operators.
    pub fn expression(&mut self, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.node(Production::Expression, body)
    }

    /// A binary operator between two terms.
    pub fn op(&mut self, symbol: &str) -> &mut Self {
        self.symbol(symbol)
    }

    pub fn int_term(&mut self, value: i64) -> &mut Self {
        self.node(Production::Term, |b| {
            b.integer(value);
        })
    }

    pub fn string_term(&mut self, value: &str) -> &mut Self {
        self.node(Production::Term, |b| {
            b.string(value);
        })
    }

    /// `true`, `false`, `null` or `this`.
    pub fn keyword_term(&mut self, keyword: &str) -> &mut Self {
        self.node(Production::Term, |b| {
            b.keyword(keyword);
        })
    }

    /// A plain variable read.
    pub fn var_term(&mut self, name: &str) -> &mut Self {
        self.node(Production::Term, |b| {
            b.identifier(name);
        })
    }

    /// `name[index]`
    pub fn index_term(&mut self, name: &str, index: impl FnOnce(&mut Self)) -> &mut Self {
        self.node(Production::Term, |b| {
            b.identifier(name).symbol("[").expression(index).symbol("]");
        })
    }

    /// `(inner)`
    pub fn paren_term(&mut self, inner: impl FnOnce(&mut Self)) -> &mut Self {
        self.node(Production::Term, |b| {
            b.symbol("(").expression(inner).symbol(")");
        })
    }

    /// `-operand` or `~operand`; `operand` appends exactly one term.
    pub fn unary_term(&mut self, op: &str, operand: impl FnOnce(&mut Self)) -> &mut Self {
        self.node(Production::Term, |b| {
            b.symbol(op);
            operand(b);
        })
    }

    /// A call used as a term.
    pub fn call_term(&mut self, target: &str, args: impl FnOnce(&mut Self)) -> &mut Self {
        self.node(Production::Term, |b| {
            b.subroutine_call(target, args);
        })
    }

    /// `name(args)` or `receiver.name(args)`, split on the first `.`.
    ///
    /// `args` fills the expression list, normally with [`arg`](Self::arg).
    pub fn subroutine_call(&mut self, target: &str, args: impl FnOnce(&mut Self)) -> &mut Self {
        match target.split_once('.') {
            Some((receiver, name)) => {
                self.identifier(receiver).symbol(".").identifier(name);
            }
            None => {
                self.identifier(target);
            }
        }
        self.symbol("(");
        self.node(Production::ExpressionList, args);
        self.symbol(")")
    }

    /// One argument expression, preceded by `,` unless it is the first.
    pub fn arg(&mut self, body: impl FnOnce(&mut Self)) -> &mut Self {
        if self.open_has_children() {
            self.symbol(",");
        }
        self.expression(body)
    }
}
