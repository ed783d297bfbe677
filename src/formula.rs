//! Parsed formulas with precomputed derivatives.
//!
//! This module provides the `Formula` type, which couples the source text of an expression
//! with its tree and the symbolic first and second order partial derivatives with respect
//! to `x`, `y` and `z`. Derivatives are built once when the formula is parsed.
//!
//! # Example
//!
//! ```
//! use xyz_expr::{Formula, Notation};
//!
//! let formula = Formula::parse("(+ (* x x) y)", Notation::Prefix).unwrap();
//! assert_eq!(formula.eval([3.0, 1.0, 0.0]), 10.0);
//! assert_eq!(formula.gradient([3.0, 1.0, 0.0]), [6.0, 1.0, 0.0]);
//! ```
//!
//! Inputs are always ordered `[x, y, z]`, whether or not the formula references every
//! variable.

use std::fmt;
use std::str::FromStr;

use colored::Colorize;
use itertools::Itertools;
use rayon::prelude::*;
use tracing::debug;

use crate::errors::{FormulaError, ParseError};
use crate::expr::{Expr, Variable};
use crate::postfix::parse_postfix;
use crate::prefix::parse_prefix;

/// Number of variables every formula is evaluated over.
pub const N_VARS: usize = 3;

/// The text notation a formula is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Notation {
    /// Fully parenthesized prefix notation, parsed with full error checking
    #[default]
    Prefix,
    /// Reverse Polish notation, parsed permissively
    Postfix,
}

impl Notation {
    /// Parses `text` with the parser for this notation.
    pub fn parse(self, text: &str) -> Result<Expr, ParseError> {
        match self {
            Notation::Prefix => parse_prefix(text),
            Notation::Postfix => parse_postfix(text),
        }
    }
}

impl FromStr for Notation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "prefix" | "lisp" => Ok(Notation::Prefix),
            "postfix" | "rpn" => Ok(Notation::Postfix),
            other => Err(format!(
                "unknown notation {other:?}, expected prefix or postfix"
            )),
        }
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notation::Prefix => f.write_str("prefix"),
            Notation::Postfix => f.write_str("postfix"),
        }
    }
}

/// A parsed expression together with its partial derivatives.
#[derive(Debug, Clone)]
pub struct Formula {
    source: String,
    notation: Notation,
    ast: Box<Expr>,
    derivatives_first_order: [Box<Expr>; N_VARS],
    derivatives_second_order: [[Box<Expr>; N_VARS]; N_VARS],
}

impl Formula {
    /// Parses `source` in the given notation and derives all partial derivatives.
    ///
    /// # Errors
    /// Returns `FormulaError::Parse` if the text does not parse.
    pub fn parse(source: impl Into<String>, notation: Notation) -> Result<Self, FormulaError> {
        let source = source.into();
        let ast = Box::new(notation.parse(&source)?);
        Ok(Self::from_expr(source, notation, ast))
    }

    /// Builds a formula from an existing tree, e.g. one produced by differentiation.
    pub fn from_expr(source: String, notation: Notation, ast: Box<Expr>) -> Self {
        let derivatives_first_order = Variable::ALL.map(|variable| ast.differentiate(variable));
        let derivatives_second_order = Variable::ALL.map(|variable| {
            let first = &derivatives_first_order[variable.index()];
            Variable::ALL.map(|variable2| first.differentiate(variable2))
        });

        debug!(
            %notation,
            nodes = ast.node_count(),
            first_order_nodes = derivatives_first_order.iter().map(|d| d.node_count()).sum::<usize>(),
            "built formula derivatives"
        );

        Self {
            source,
            notation,
            ast,
            derivatives_first_order,
            derivatives_second_order,
        }
    }

    /// The text the formula was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn notation(&self) -> Notation {
        self.notation
    }

    /// The expression tree.
    pub fn expr(&self) -> &Expr {
        &self.ast
    }

    /// Evaluates the formula at `[x, y, z]`.
    pub fn eval(&self, point: [f64; N_VARS]) -> f64 {
        self.ast.evaluate_at(point)
    }

    /// Evaluates the formula for a slice that must hold exactly `[x, y, z]`.
    ///
    /// # Errors
    /// Returns `FormulaError::InvalidInputLength` if the slice length is not 3.
    pub fn eval_slice(&self, values: &[f64]) -> Result<f64, FormulaError> {
        let point: [f64; N_VARS] =
            values.try_into().map_err(|_| FormulaError::InvalidInputLength {
                expected: N_VARS,
                got: values.len(),
            })?;
        Ok(self.eval(point))
    }

    /// Evaluates the formula at many points in parallel.
    pub fn eval_batch(&self, points: &[[f64; N_VARS]]) -> Vec<f64> {
        points.par_iter().map(|point| self.eval(*point)).collect()
    }

    /// The symbolic first order partial derivative with respect to `variable`.
    pub fn derivative(&self, variable: Variable) -> &Expr {
        &self.derivatives_first_order[variable.index()]
    }

    /// The symbolic second order derivative ∂²/∂`second`∂`first`.
    pub fn second_derivative(&self, first: Variable, second: Variable) -> &Expr {
        &self.derivatives_second_order[first.index()][second.index()]
    }

    /// Computes the gradient `[∂/∂x, ∂/∂y, ∂/∂z]` at the given point.
    pub fn gradient(&self, point: [f64; N_VARS]) -> [f64; N_VARS] {
        Variable::ALL.map(|variable| self.derivative(variable).evaluate_at(point))
    }

    /// Computes the Hessian matrix at the given point.
    ///
    /// Row `i` holds the derivatives of `∂/∂v_i` with respect to `x`, `y` and `z`.
    pub fn hessian(&self, point: [f64; N_VARS]) -> [[f64; N_VARS]; N_VARS] {
        Variable::ALL.map(|first| {
            Variable::ALL.map(|second| self.second_derivative(first, second).evaluate_at(point))
        })
    }

    /// Differentiates the formula successively with respect to each variable in `variables`.
    ///
    /// An empty slice returns a copy of the formula's tree.
    ///
    /// # Example
    /// ```
    /// # use xyz_expr::{Formula, Notation, Variable};
    /// let formula = Formula::parse("x x * y y * *", Notation::Postfix).unwrap();
    /// let dxdy = formula.derive_wrt(&[Variable::X, Variable::Y]);
    /// assert_eq!(dxdy.evaluate(2.0, 3.0, 0.0), 24.0); // 4xy
    /// ```
    pub fn derive_wrt(&self, variables: &[Variable]) -> Box<Expr> {
        variables
            .iter()
            .fold(self.ast.clone(), |expr, variable| expr.differentiate(*variable))
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{{")?;
        writeln!(f, "    {}: {}", "Formula".cyan(), self.source)?;
        writeln!(f, "    {}: {}", "Notation".cyan(), self.notation)?;
        writeln!(f, "    {}: {}", "Prefix".cyan(), self.ast.prefix())?;
        writeln!(
            f,
            "    {}: [{}]",
            "Variables".cyan(),
            self.ast.variables().iter().join(", ")
        )?;
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_eval() {
        let formula = Formula::parse("(- (* 2 x) z)", Notation::Prefix).unwrap();
        assert_eq!(formula.eval([3.0, 100.0, 1.0]), 5.0);
        assert_eq!(formula.source(), "(- (* 2 x) z)");
        assert_eq!(formula.notation(), Notation::Prefix);

        let formula = Formula::parse("2 x * z -", Notation::Postfix).unwrap();
        assert_eq!(formula.eval([3.0, 100.0, 1.0]), 5.0);
    }

    #[test]
    fn test_parse_error() {
        let err = Formula::parse("(+ x", Notation::Prefix).unwrap_err();
        assert!(matches!(
            err,
            FormulaError::Parse(ParseError::MissingClosingParen { open: 1 })
        ));
    }

    #[test]
    fn test_eval_slice() {
        let formula = Formula::parse("(+ x (+ y z))", Notation::Prefix).unwrap();
        assert_eq!(formula.eval_slice(&[1.0, 2.0, 3.0]).unwrap(), 6.0);
        assert!(matches!(
            formula.eval_slice(&[1.0, 2.0]),
            Err(FormulaError::InvalidInputLength {
                expected: 3,
                got: 2
            })
        ));
    }

    #[test]
    fn test_gradient_and_hessian() {
        // f = x*x*y + z
        let formula = Formula::parse("(+ (* (* x x) y) z)", Notation::Prefix).unwrap();
        let point = [2.0, 3.0, 5.0];
        assert_eq!(formula.gradient(point), [12.0, 4.0, 1.0]);
        assert_eq!(
            formula.hessian(point),
            [[6.0, 4.0, 0.0], [4.0, 0.0, 0.0], [0.0, 0.0, 0.0]]
        );
    }

    #[test]
    fn test_derivative_accessors() {
        let formula = Formula::parse("(sinh x)", Notation::Prefix).unwrap();
        assert_eq!(
            *formula.derivative(Variable::X),
            *formula.expr().differentiate(Variable::X)
        );
        assert_eq!(
            *formula.second_derivative(Variable::X, Variable::Y),
            *formula
                .expr()
                .differentiate(Variable::X)
                .differentiate(Variable::Y)
        );
        assert_eq!(*formula.derive_wrt(&[]), *formula.expr());
    }

    #[test]
    fn test_eval_batch() {
        let formula = Formula::parse("x y *", Notation::Postfix).unwrap();
        let points: Vec<[f64; 3]> = (0..100).map(|i| [i as f64, 2.0, 0.0]).collect();
        let expected: Vec<f64> = (0..100).map(|i| 2.0 * i as f64).collect();
        assert_eq!(formula.eval_batch(&points), expected);
        assert!(formula.eval_batch(&[]).is_empty());
    }

    #[test]
    fn test_notation_from_str() {
        assert_eq!("prefix".parse::<Notation>(), Ok(Notation::Prefix));
        assert_eq!("RPN".parse::<Notation>(), Ok(Notation::Postfix));
        assert!("infix".parse::<Notation>().is_err());
        assert_eq!(Notation::default(), Notation::Prefix);
    }

    #[test]
    fn test_display() {
        colored::control::set_override(false);
        let formula = Formula::parse("y x +", Notation::Postfix).unwrap();
        let shown = formula.to_string();
        assert!(shown.contains("Formula: y x +"));
        assert!(shown.contains("Prefix: (+ y x)"));
        assert!(shown.contains("Variables: [x, y]"));
    }
}
