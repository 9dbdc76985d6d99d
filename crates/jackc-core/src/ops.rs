//! Operator and keyword-constant definitions for Jack expressions.
//!
//! The grammar has no precedence: an expression is a flat, left-to-right
//! sequence of terms joined by [`BinaryOp`]s.

use std::fmt;

/// Binary operators, applied strictly left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `&`
    And,
    /// `|`
    Or,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `=`
    Equal,
}

impl BinaryOp {
    /// Parse an operator from its symbol text.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        use BinaryOp::*;
        let op = match symbol {
            "+" => Add,
            "-" => Sub,
            "*" => Mul,
            "/" => Div,
            "&" => And,
            "|" => Or,
            "<" => Less,
            ">" => Greater,
            "=" => Equal,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(self) -> &'static str {
        use BinaryOp::*;
        match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            And => "&",
            Or => "|",
            Less => "<",
            Greater => ">",
            Equal => "=",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unary prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `-` arithmetic negation
    Neg,
    /// `~` logical/bitwise not
    Not,
}

impl UnaryOp {
    /// Parse a unary operator from its symbol text.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "-" => Some(UnaryOp::Neg),
            "~" => Some(UnaryOp::Not),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "~",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Keywords usable as a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordConstant {
    True,
    False,
    Null,
    This,
}

impl KeywordConstant {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "true" => Some(KeywordConstant::True),
            "false" => Some(KeywordConstant::False),
            "null" => Some(KeywordConstant::Null),
            "this" => Some(KeywordConstant::This),
            _ => None,
        }
    }
}
