//! Single-argument operators: negation, hyperbolic sine and cosine, arctangent.

use std::fmt;

/// A unary operator tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Arithmetic negation, printed as `negate`
    Negate,
    /// Hyperbolic sine, printed as `sinh`
    Sinh,
    /// Hyperbolic cosine, printed as `cosh`
    Cosh,
    /// Arctangent, printed as `atan`
    Atan,
}

impl UnaryOp {
    /// All unary operators, in keyword-matching order.
    pub const ALL: [UnaryOp; 4] = [UnaryOp::Negate, UnaryOp::Sinh, UnaryOp::Cosh, UnaryOp::Atan];

    /// Applies the scalar transform of this operator.
    pub fn apply(self, a: f64) -> f64 {
        match self {
            UnaryOp::Negate => -a,
            UnaryOp::Sinh => a.sinh(),
            UnaryOp::Cosh => a.cosh(),
            UnaryOp::Atan => a.atan(),
        }
    }

    /// The token this operator is printed with and parsed from.
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Negate => "negate",
            UnaryOp::Sinh => "sinh",
            UnaryOp::Cosh => "cosh",
            UnaryOp::Atan => "atan",
        }
    }

    /// Looks up a unary operator by its keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "negate" => Some(UnaryOp::Negate),
            "sinh" => Some(UnaryOp::Sinh),
            "cosh" => Some(UnaryOp::Cosh),
            "atan" => Some(UnaryOp::Atan),
            _ => None,
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
