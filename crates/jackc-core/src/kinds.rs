//! Parse tree node kinds.
//!
//! Every non-terminal in the tree is tagged with a [`Production`] and every
//! terminal with a [`TokenKind`]. The names match the ones the analyzer uses
//! when it serializes a tree (`letStatement`, `integerConstant`, ...).

use std::fmt;

/// Grammar productions, one per non-terminal node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Production {
    Class,
    ClassVarDec,
    SubroutineDec,
    ParameterList,
    SubroutineBody,
    VarDec,
    Statements,
    LetStatement,
    IfStatement,
    WhileStatement,
    DoStatement,
    ReturnStatement,
    Expression,
    Term,
    ExpressionList,
}

impl Production {
    /// All productions, in grammar order.
    pub const ALL: [Production; 15] = [
        Production::Class,
        Production::ClassVarDec,
        Production::SubroutineDec,
        Production::ParameterList,
        Production::SubroutineBody,
        Production::VarDec,
        Production::Statements,
        Production::LetStatement,
        Production::IfStatement,
        Production::WhileStatement,
        Production::DoStatement,
        Production::ReturnStatement,
        Production::Expression,
        Production::Term,
        Production::ExpressionList,
    ];

    /// The serialized name of this production.
    pub fn name(self) -> &'static str {
        match self {
            Production::Class => "class",
            Production::ClassVarDec => "classVarDec",
            Production::SubroutineDec => "subroutineDec",
            Production::ParameterList => "parameterList",
            Production::SubroutineBody => "subroutineBody",
            Production::VarDec => "varDec",
            Production::Statements => "statements",
            Production::LetStatement => "letStatement",
            Production::IfStatement => "ifStatement",
            Production::WhileStatement => "whileStatement",
            Production::DoStatement => "doStatement",
            Production::ReturnStatement => "returnStatement",
            Production::Expression => "expression",
            Production::Term => "term",
            Production::ExpressionList => "expressionList",
        }
    }

    /// Look up a production by its serialized name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Whether this production is one of the five statement forms.
    pub fn is_statement(self) -> bool {
        matches!(
            self,
            Production::LetStatement
                | Production::IfStatement
                | Production::WhileStatement
                | Production::DoStatement
                | Production::ReturnStatement
        )
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lexical token kinds, one per terminal node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Symbol,
    IntegerConstant,
    StringConstant,
    Identifier,
}

impl TokenKind {
    /// All token kinds.
    pub const ALL: [TokenKind; 5] = [
        TokenKind::Keyword,
        TokenKind::Symbol,
        TokenKind::IntegerConstant,
        TokenKind::StringConstant,
        TokenKind::Identifier,
    ];

    /// The serialized name of this token kind.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Symbol => "symbol",
            TokenKind::IntegerConstant => "integerConstant",
            TokenKind::StringConstant => "stringConstant",
            TokenKind::Identifier => "identifier",
        }
    }

    /// Look up a token kind by its serialized name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The kind of any parse tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A non-terminal.
    Production(Production),
    /// A terminal.
    Token(TokenKind),
}

impl NodeKind {
    /// Look up a node kind by its serialized name.
    ///
    /// Production names and token kind names never overlap.
    pub fn from_name(name: &str) -> Option<Self> {
        Production::from_name(name)
            .map(NodeKind::Production)
            .or_else(|| TokenKind::from_name(name).map(NodeKind::Token))
    }

    /// The serialized name of this kind.
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Production(p) => p.name(),
            NodeKind::Token(t) => t.name(),
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, NodeKind::Token(_))
    }
}

impl From<Production> for NodeKind {
    fn from(p: Production) -> Self {
        NodeKind::Production(p)
    }
}

impl From<TokenKind> for NodeKind {
    fn from(t: TokenKind) -> Self {
        NodeKind::Token(t)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
