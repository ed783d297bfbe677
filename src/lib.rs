//! Arithmetic expressions over `x`, `y` and `z` with symbolic differentiation.
//!
//! This crate parses textual expressions into an immutable expression tree and works with
//! that tree: numeric evaluation, printing in postfix and prefix notation, and symbolic
//! differentiation that produces a new, unsimplified tree.
//!
//! # Features
//!
//! - Permissive postfix (RPN) parser: `x y * 2 +`
//! - Strict prefix parser with descriptive errors: `(+ (* x y) 2)`
//! - Operators `+ - * / atan2 negate sinh cosh atan`
//! - Symbolic first and higher order derivatives
//!
//! # Example
//!
//! ```rust
//! use xyz_expr::prelude::*;
//!
//! let expr = parse_prefix("(* x (sinh y))").unwrap();
//! let value = expr.evaluate(2.0, 0.0, 0.0); // 0.0
//!
//! let dx = expr.differentiate(Variable::X);
//! assert_eq!(dx.to_prefix_string(), "(+ (* 1 (sinh y)) (* x (* (cosh y) 0)))");
//!
//! let rpn = parse_postfix("3 4 +").unwrap();
//! assert_eq!(rpn.evaluate(0.0, 0.0, 0.0), 7.0);
//! ```

pub use errors::{FormulaError, ParseError};
pub use expr::{Expr, Variable};
pub use formula::{Formula, Notation};
pub use operators::{BinaryOp, UnaryOp};

pub mod prelude {
    pub use crate::expr::{Expr, Variable};
    pub use crate::formula::{Formula, Notation};
    pub use crate::postfix::parse_postfix;
    pub use crate::prefix::parse_prefix;
}

/// Error types for the various failure modes
pub mod errors;
/// Expression tree representation and symbolic differentiation
pub mod expr;
/// Formulas with precomputed derivatives
pub mod formula;
/// Operator tags with their transforms and print symbols
pub mod operators;
/// Permissive postfix (RPN) parser
pub mod postfix;
/// Strict prefix parser
pub mod prefix;
/// Token scanner shared by both parsers
pub mod token;

#[cfg(test)]
mod proptests;
