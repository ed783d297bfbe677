//! Two-argument operators: the four arithmetic operations and `atan2`.

use std::fmt;

/// A binary operator tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// Addition, `+`
    Add,
    /// Subtraction, `-`
    Sub,
    /// Multiplication, `*`
    Mul,
    /// Division, `/`
    Div,
    /// Two-argument arctangent `atan2(left, right)`
    Atan2,
}

impl BinaryOp {
    /// All binary operators.
    pub const ALL: [BinaryOp; 5] = [
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Atan2,
    ];

    /// Applies the two-argument transform of this operator.
    ///
    /// `Atan2` follows `f64::atan2` with the left operand as `y` and the right as `x`.
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            BinaryOp::Add => left + right,
            BinaryOp::Sub => left - right,
            BinaryOp::Mul => left * right,
            BinaryOp::Div => left / right,
            BinaryOp::Atan2 => left.atan2(right),
        }
    }

    /// The token this operator is printed with and parsed from.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Atan2 => "atan2",
        }
    }

    /// Looks up a single-character operator symbol.
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(BinaryOp::Add),
            '-' => Some(BinaryOp::Sub),
            '*' => Some(BinaryOp::Mul),
            '/' => Some(BinaryOp::Div),
            _ => None,
        }
    }

    /// Looks up a keyword operator.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "atan2" => Some(BinaryOp::Atan2),
            _ => None,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
