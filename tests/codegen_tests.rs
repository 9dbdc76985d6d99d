//! Integration tests for class compilation
//!
//! Each test builds a class tree in memory and checks the emitted VM code
//! against a property every correct translation must have.


use jackc::{CompilationError, StorageKind, TreeBuilder};
use std::collections::HashSet;
use test_harness::{class_lines, defined_labels, lines_with, main_lines, try_class};

// ============================================================================
// Declarations
// ============================================================================

#[test]
fn constructor_allocates_field_count() {
    for n_fields in [0usize, 1, 4, 9] {
        let names: Vec<String> = (0..n_fields).map(|i| format!("f{i}")).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();

        let lines = class_lines(|b| {
            b.class("Box", |b| {
                b.class_var_dec("static", "int", &["shared"]);
                if !names.is_empty() {
                    b.class_var_dec("field", "int", &names);
                }
                b.subroutine_dec("constructor", "Box", "new", &[], |b| {
                    b.statements(|b| {
                        b.return_value(|e| {
                            e.keyword_term("this");
                        });
                    });
                });
            });
        });

        assert_eq!(lines[1], format!("push constant {n_fields}"));
        assert_eq!(lines[2], "call Memory.alloc 1");
        assert_eq!(lines[3], "pop pointer 0");
    }
}

#[test]
fn function_header_counts_only_locals() {
    let lines = class_lines(|b| {
        b.class("Main", |b| {
            b.class_var_dec("field", "int", &["ignored"]);
            b.subroutine_dec("method", "void", "run", &[("int", "a"), ("int", "b")], |b| {
                b.var_dec("int", &["i", "j"]);
                b.var_dec("String", &["s"]);
                b.statements(|b| {
                    b.return_statement();
                });
            });
        });
    });
    assert_eq!(lines[0], "function Main.run 3");
}

#[test]
fn local_shadows_field() {
    let lines = class_lines(|b| {
        b.class("Counter", |b| {
            b.class_var_dec("field", "int", &["value", "x"]);
            b.subroutine_dec("method", "int", "bump", &[], |b| {
                b.var_dec("int", &["x"]);
                b.statements(|b| {
                    b.let_statement("x", |e| {
                        e.var_term("x").op("+").int_term(1);
                    });
                    b.return_value(|e| {
                        e.var_term("x");
                    });
                });
            });
        });
    });
    assert!(lines_with(&lines, "push this 1").is_empty());
    assert!(lines_with(&lines, "pop this 1").is_empty());
    assert_eq!(lines_with(&lines, "push local 0").len(), 2);
    assert_eq!(lines_with(&lines, "pop local 0").len(), 1);
}

#[test]
fn duplicate_field_keeps_first_definition() {
    let lines = class_lines(|b| {
        b.class("Dup", |b| {
            b.class_var_dec("field", "int", &["a"]);
            b.class_var_dec("field", "boolean", &["a", "b"]);
            b.subroutine_dec("constructor", "Dup", "new", &[], |b| {
                b.statements(|b| {
                    b.let_statement("b", |e| {
                        e.int_term(1);
                    });
                    b.return_value(|e| {
                        e.keyword_term("this");
                    });
                });
            });
        });
    });
    assert_eq!(lines[1], "push constant 2");
    assert!(lines.contains(&"pop this 1".to_string()));
}

// ============================================================================
// Control Flow
// ============================================================================

fn many_ifs(n: usize, with_else: bool) -> Vec<String> {
    main_lines(|b| {
        b.var_dec("boolean", &["c"]);
        b.statements(|b| {
            for _ in 0..n {
                let cond = |e: &mut TreeBuilder<'_>| {
                    e.var_term("c");
                };
                if with_else {
                    b.if_else_statement(cond, |_| {}, |_| {});
                } else {
                    b.if_statement(cond, |_| {});
                }
            }
        });
    })
}

#[test]
fn if_labels_are_unique_with_else() {
    let lines = many_ifs(5, true);
    let labels = defined_labels(&lines);
    let unique: HashSet<&str> = labels.iter().copied().collect();
    assert_eq!(labels.len(), 15);
    assert_eq!(unique.len(), 15);
}

#[test]
fn if_labels_are_unique_without_else() {
    let lines = many_ifs(5, false);
    let labels = defined_labels(&lines);
    let unique: HashSet<&str> = labels.iter().copied().collect();
    assert_eq!(labels.len(), 10);
    assert_eq!(unique.len(), 10);
}

#[test]
fn if_without_else_emits_no_end_label() {
    let lines = many_ifs(1, false);
    assert_eq!(
        lines,
        [
            "push local 0",
            "if-goto IF_TRUE0",
            "goto IF_FALSE0",
            "label IF_TRUE0",
            "label IF_FALSE0",
        ]
    );
    assert_eq!(lines_with(&lines, "goto").len(), 1);
}

#[test]
fn while_inside_if_else() {
    let lines = main_lines(|b| {
        b.var_dec("int", &["n"]);
        b.statements(|b| {
            b.if_else_statement(
                |e| {
                    e.var_term("n").op(">").int_term(0);
                },
                |b| {
                    b.while_statement(
                        |e| {
                            e.var_term("n").op(">").int_term(0);
                        },
                        |b| {
                            b.let_statement("n", |e| {
                                e.var_term("n").op("-").int_term(1);
                            });
                        },
                    );
                },
                |b| {
                    b.let_statement("n", |e| {
                        e.int_term(0);
                    });
                },
            );
        });
    });
    assert_eq!(
        defined_labels(&lines),
        ["IF_TRUE0", "WHILE_EXP1", "WHILE_END1", "IF_FALSE0", "IF_END0"]
    );
}

// ============================================================================
// Expressions and Calls
// ============================================================================

#[test]
fn string_literal_ab() {
    let lines = main_lines(|b| {
        b.var_dec("String", &["s"]);
        b.statements(|b| {
            b.let_statement("s", |e| {
                e.string_term("AB");
            });
        });
    });
    assert_eq!(
        lines,
        [
            "push constant 2",
            "call String.new 1",
            "push constant 65",
            "call String.appendChar 2",
            "push constant 66",
            "call String.appendChar 2",
            "pop local 0",
        ]
    );
}

#[test]
fn empty_string_literal() {
    let lines = main_lines(|b| {
        b.statements(|b| {
            b.do_statement("Output.printString", |b| {
                b.arg(|e| {
                    e.string_term("");
                });
            });
        });
    });
    assert_eq!(
        lines,
        [
            "push constant 0",
            "call String.new 1",
            "call Output.printString 1",
            "pop temp 0",
        ]
    );
}

#[test]
fn bound_and_static_calls() {
    let lines = class_lines(|b| {
        b.class("Geometry", |b| {
            b.subroutine_dec("function", "int", "run", &[("Point", "q")], |b| {
                b.var_dec("int", &["unused"]).var_dec("Point", &["p"]);
                b.statements(|b| {
                    b.let_statement("p", |e| {
                        e.call_term("Point.origin", |_| {});
                    });
                    b.return_value(|e| {
                        e.call_term("p.dist", |b| {
                            b.arg(|e| {
                                e.var_term("q");
                            });
                        });
                    });
                });
            });
        });
    });
    assert_eq!(
        lines,
        [
            "function Geometry.run 2",
            "call Point.origin 0",
            "pop local 1",
            "push local 1",
            "push argument 0",
            "call Point.dist 2",
            "return",
        ]
    );
}

#[test]
fn field_receiver_call_uses_this_segment() {
    let lines = class_lines(|b| {
        b.class("Game", |b| {
            b.class_var_dec("field", "Ball", &["ball"]);
            b.subroutine_dec("method", "void", "tick", &[], |b| {
                b.statements(|b| {
                    b.do_statement("ball.move", |b| {
                        b.arg(|e| {
                            e.int_term(1);
                        });
                    });
                    b.return_statement();
                });
            });
        });
    });
    assert_eq!(
        &lines[3..6],
        ["push this 0", "push constant 1", "call Ball.move 2"]
    );
}

#[test]
fn push_and_pop_use_the_same_slot() {
    let lines = class_lines(|b| {
        b.class("Slots", |b| {
            b.class_var_dec("static", "int", &["s"]);
            b.class_var_dec("field", "int", &["f"]);
            b.subroutine_dec("method", "void", "touch", &[("int", "a")], |b| {
                b.var_dec("int", &["l"]);
                b.statements(|b| {
                    for name in ["s", "f", "a", "l"] {
                        b.let_statement(name, |e| {
                            e.var_term(name);
                        });
                    }
                    b.return_statement();
                });
            });
        });
    });

    let pushes: Vec<&str> = lines_with(&lines, "push ")
        .into_iter()
        .filter_map(|l| l.strip_prefix("push "))
        .filter(|l| !l.starts_with("constant") && *l != "argument 0")
        .collect();
    let pops: Vec<&str> = lines_with(&lines, "pop ")
        .into_iter()
        .filter_map(|l| l.strip_prefix("pop "))
        .filter(|l| !l.starts_with("pointer"))
        .collect();
    assert_eq!(pushes, ["static 0", "this 0", "argument 1", "local 0"]);
    assert_eq!(pushes, pops);
}

#[test]
fn field_segment_is_this() {
    use jackc::Segment;
    assert_eq!(Segment::of(StorageKind::Field), Segment::This);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn unknown_array_base_is_unresolved() {
    let err = try_class(|b| {
        b.class("Main", |b| {
            b.subroutine_dec("function", "int", "f", &[], |b| {
                b.statements(|b| {
                    b.return_value(|e| {
                        e.index_term("nowhere", |e| {
                            e.int_term(0);
                        });
                    });
                });
            });
        });
    })
    .unwrap_err();
    assert!(matches!(err, CompilationError::UnresolvedSymbol { ref name, .. } if name == "nowhere"));
    assert!(err.pos().is_some());
}

#[test]
fn oversized_literal_is_invalid_constant() {
    use jackc::{Production, TokenKind};

    let err = try_class(|b| {
        b.class("Main", |b| {
            b.subroutine_dec("function", "int", "f", &[], |b| {
                b.statements(|b| {
                    b.return_value(|e| {
                        e.node(Production::Term, |t| {
                            t.terminal(TokenKind::IntegerConstant, "40000");
                        });
                    });
                });
            });
        });
    })
    .unwrap_err();
    assert!(matches!(err, CompilationError::InvalidConstant { .. }));
    assert!(err.to_string().contains("40000"));
}

#[test]
fn missing_statements_block_is_structural() {
    use jackc::Production;

    let err = try_class(|b| {
        b.class("Main", |b| {
            b.node(Production::SubroutineDec, |b| {
                b.keyword("function").keyword("void").identifier("main");
                b.symbol("(").node(Production::ParameterList, |_| {}).symbol(")");
                b.node(Production::SubroutineBody, |b| {
                    b.symbol("{").symbol("}");
                });
            });
        });
    })
    .unwrap_err();
    match err {
        CompilationError::StructuralMismatch { expected, found, .. } => {
            assert_eq!(expected, "<statements>");
            assert_eq!(found, "'}'");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
