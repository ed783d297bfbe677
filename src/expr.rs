//! Expression module for representing arithmetic expressions over `x`, `y` and `z`.
//!
//! This module defines the core expression types:
//!
//! - `Expr`: An enum representing the four kinds of expression nodes
//! - `Variable`: One of the three scalar variables an expression may reference
//!
//! The expression tree is built recursively using `Box<Expr>` for nested expressions and can be:
//! - Evaluated numerically for given variable bindings
//! - Symbolically differentiated to compute derivatives
//! - Printed in postfix-flavoured text (`Display`) or fully parenthesized prefix form
//!
//! # Expression Tree Structure
//! The expression tree is built recursively with each node being one of:
//! - Leaf nodes: Constants and Variables
//! - Unary operations: negate, sinh, cosh, atan
//! - Binary operations: +, -, *, /, atan2
//!
//! Trees are never mutated after construction. Every operation that produces a tree,
//! differentiation included, builds new nodes and clones the subtrees it reuses.
//!
//! # Symbolic Differentiation
//! The derivative method applies the closed-form rule of each node kind and recurses
//! into the children. The result is not simplified: `(* x x)` differentiates to
//! `(+ (* 1 x) (* x 1))`.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::errors::ParseError;
use crate::operators::{BinaryOp, UnaryOp};

/// One of the three variables an expression can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Variable {
    X,
    Y,
    Z,
}

impl Variable {
    /// All variables, in input order.
    pub const ALL: [Variable; 3] = [Variable::X, Variable::Y, Variable::Z];

    /// The single-character name of the variable.
    pub fn name(self) -> char {
        match self {
            Variable::X => 'x',
            Variable::Y => 'y',
            Variable::Z => 'z',
        }
    }

    /// Position of the variable in an `[x, y, z]` input array.
    pub fn index(self) -> usize {
        match self {
            Variable::X => 0,
            Variable::Y => 1,
            Variable::Z => 2,
        }
    }

    /// Picks this variable's binding out of `(x, y, z)`.
    pub fn select(self, x: f64, y: f64, z: f64) -> f64 {
        match self {
            Variable::X => x,
            Variable::Y => y,
            Variable::Z => z,
        }
    }
}

impl TryFrom<char> for Variable {
    type Error = ParseError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'x' => Ok(Variable::X),
            'y' => Ok(Variable::Y),
            'z' => Ok(Variable::Z),
            other => Err(ParseError::UnknownVariable(other.to_string())),
        }
    }
}

impl FromStr for Variable {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Variable::try_from(c),
            _ => Err(ParseError::UnknownVariable(s.to_string())),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An expression tree node representing an arithmetic expression.
///
/// Constants hold integer values parsed from text, stored as `f64` because all
/// evaluation happens in the floating-point domain.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A constant value
    Const(f64),
    /// A reference to one of the variables
    Var(Variable),
    /// A unary operator applied to one sub-expression
    Unary(UnaryOp, Box<Expr>),
    /// A binary operator applied to a left and a right sub-expression
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Creates a boxed constant node.
    pub fn constant(value: f64) -> Box<Expr> {
        Box::new(Expr::Const(value))
    }

    /// Creates a boxed variable node.
    pub fn var(variable: Variable) -> Box<Expr> {
        Box::new(Expr::Var(variable))
    }

    /// Creates a boxed unary node.
    pub fn unary(op: UnaryOp, arg: Box<Expr>) -> Box<Expr> {
        Box::new(Expr::Unary(op, arg))
    }

    /// Creates a boxed binary node.
    pub fn binary(op: BinaryOp, left: Box<Expr>, right: Box<Expr>) -> Box<Expr> {
        Box::new(Expr::Binary(op, left, right))
    }

    pub fn add(left: Box<Expr>, right: Box<Expr>) -> Box<Expr> {
        Self::binary(BinaryOp::Add, left, right)
    }

    pub fn sub(left: Box<Expr>, right: Box<Expr>) -> Box<Expr> {
        Self::binary(BinaryOp::Sub, left, right)
    }

    pub fn mul(left: Box<Expr>, right: Box<Expr>) -> Box<Expr> {
        Self::binary(BinaryOp::Mul, left, right)
    }

    pub fn div(left: Box<Expr>, right: Box<Expr>) -> Box<Expr> {
        Self::binary(BinaryOp::Div, left, right)
    }

    pub fn neg(arg: Box<Expr>) -> Box<Expr> {
        Self::unary(UnaryOp::Negate, arg)
    }

    /// Evaluates the expression for the given variable bindings.
    ///
    /// Evaluation is a pure function of the tree and `(x, y, z)`. Division by zero and
    /// out-of-domain arguments are not reported; infinities and NaN propagate.
    ///
    /// # Example
    /// ```
    /// # use xyz_expr::prefix::parse_prefix;
    /// let expr = parse_prefix("(+ (* x y) z)").unwrap();
    /// assert_eq!(expr.evaluate(2.0, 3.0, 4.0), 10.0);
    /// ```
    pub fn evaluate(&self, x: f64, y: f64, z: f64) -> f64 {
        match self {
            Expr::Const(value) => *value,
            Expr::Var(variable) => variable.select(x, y, z),
            Expr::Unary(op, arg) => op.apply(arg.evaluate(x, y, z)),
            Expr::Binary(op, left, right) => {
                op.apply(left.evaluate(x, y, z), right.evaluate(x, y, z))
            }
        }
    }

    /// Evaluates the expression at a point given as `[x, y, z]`.
    pub fn evaluate_at(&self, point: [f64; 3]) -> f64 {
        self.evaluate(point[0], point[1], point[2])
    }

    /// Computes the symbolic derivative of this expression with respect to a variable.
    ///
    /// Recursively applies the rules of differentiation to build a new expression tree
    /// representing the derivative. The rules implemented are:
    /// - d/dv(c) = 0 for constants
    /// - d/dv(v) = 1, d/dv(w) = 0 for any other variable w
    /// - Sum and difference rules: (f ± g)' = f' ± g'
    /// - Product rule: (f * g)' = f' * g + f * g'
    /// - Quotient rule: (f / g)' = (f' * g - f * g') / (g * g)
    /// - Negation: (-f)' = -(f')
    /// - sinh: (sinh f)' = cosh f * f'
    /// - cosh: (cosh f)' = -(sinh f) * f'
    /// - atan: (atan f)' = 1 / (1 + f * f) * f'
    /// - atan2: (atan2 f g)' = (-f * g') / (f * f + g * g) + (g * f') / (f * f + g * g)
    ///
    /// # Arguments
    /// * `with_respect_to` - The variable to differentiate with respect to
    ///
    /// # Returns
    /// A new, unsimplified expression tree representing the derivative
    pub fn differentiate(&self, with_respect_to: Variable) -> Box<Expr> {
        match self {
            Expr::Const(_) => Expr::constant(0.0),

            Expr::Var(variable) => {
                if *variable == with_respect_to {
                    Expr::constant(1.0)
                } else {
                    Expr::constant(0.0)
                }
            }

            Expr::Unary(op, arg) => {
                let d_arg = arg.differentiate(with_respect_to);
                match op {
                    UnaryOp::Negate => Expr::neg(d_arg),
                    UnaryOp::Sinh => Expr::mul(Expr::unary(UnaryOp::Cosh, arg.clone()), d_arg),
                    UnaryOp::Cosh => Expr::mul(
                        Expr::neg(Expr::unary(UnaryOp::Sinh, arg.clone())),
                        d_arg,
                    ),
                    UnaryOp::Atan => Expr::mul(
                        Expr::div(
                            Expr::constant(1.0),
                            Expr::add(Expr::constant(1.0), Expr::mul(arg.clone(), arg.clone())),
                        ),
                        d_arg,
                    ),
                }
            }

            Expr::Binary(op, left, right) => {
                let d_left = left.differentiate(with_respect_to);
                let d_right = right.differentiate(with_respect_to);
                match op {
                    BinaryOp::Add => Expr::add(d_left, d_right),
                    BinaryOp::Sub => Expr::sub(d_left, d_right),
                    BinaryOp::Mul => Expr::add(
                        Expr::mul(d_left, right.clone()),
                        Expr::mul(left.clone(), d_right),
                    ),
                    BinaryOp::Div => Expr::div(
                        Expr::sub(
                            Expr::mul(d_left, right.clone()),
                            Expr::mul(left.clone(), d_right),
                        ),
                        Expr::mul(right.clone(), right.clone()),
                    ),
                    BinaryOp::Atan2 => {
                        // Each quotient gets its own copy of l*l + r*r.
                        let norm = || {
                            Expr::add(
                                Expr::mul(left.clone(), left.clone()),
                                Expr::mul(right.clone(), right.clone()),
                            )
                        };
                        Expr::add(
                            Expr::div(Expr::mul(Expr::neg(left.clone()), d_right), norm()),
                            Expr::div(Expr::mul(right.clone(), d_left), norm()),
                        )
                    }
                }
            }
        }
    }

    /// Differentiates with respect to a variable given by name.
    ///
    /// # Errors
    /// Returns `ParseError::UnknownVariable` if `name` is not `x`, `y` or `z`.
    pub fn differentiate_by_name(&self, name: &str) -> Result<Box<Expr>, ParseError> {
        Ok(self.differentiate(name.parse()?))
    }

    /// Returns a `Display` adapter that renders the fully parenthesized prefix form.
    pub fn prefix(&self) -> Prefix<'_> {
        Prefix(self)
    }

    /// Renders the fully parenthesized prefix form, e.g. `(+ x (negate 1))`.
    ///
    /// This form round-trips through [`crate::prefix::parse_prefix`].
    pub fn to_prefix_string(&self) -> String {
        self.prefix().to_string()
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        match self {
            Expr::Const(_) | Expr::Var(_) => 1,
            Expr::Unary(_, arg) => 1 + arg.node_count(),
            Expr::Binary(_, left, right) => 1 + left.node_count() + right.node_count(),
        }
    }

    /// Length of the longest root-to-leaf path, counting nodes.
    pub fn depth(&self) -> usize {
        match self {
            Expr::Const(_) | Expr::Var(_) => 1,
            Expr::Unary(_, arg) => 1 + arg.depth(),
            Expr::Binary(_, left, right) => 1 + left.depth().max(right.depth()),
        }
    }

    /// The set of variables referenced anywhere in the tree.
    pub fn variables(&self) -> BTreeSet<Variable> {
        let mut found = BTreeSet::new();
        self.collect_variables(&mut found);
        found
    }

    fn collect_variables(&self, found: &mut BTreeSet<Variable>) {
        match self {
            Expr::Const(_) => {}
            Expr::Var(variable) => {
                found.insert(*variable);
            }
            Expr::Unary(_, arg) => arg.collect_variables(found),
            Expr::Binary(_, left, right) => {
                left.collect_variables(found);
                right.collect_variables(found);
            }
        }
    }
}

/// Postfix-flavoured text form.
///
/// - Constants and variables print as their literal token
/// - Unary nodes print as `<arg> <symbol>`
/// - Binary nodes print as `<left> <right> <symbol>`
///
/// No parentheses are inserted, so the text is not guaranteed to parse back.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Const(value) => write!(f, "{value}"),
            Expr::Var(variable) => write!(f, "{variable}"),
            Expr::Unary(op, arg) => write!(f, "{arg} {op}"),
            Expr::Binary(op, left, right) => write!(f, "{left} {right} {op}"),
        }
    }
}

/// Display adapter for the prefix form of an expression, see [`Expr::prefix`].
#[derive(Debug, Clone, Copy)]
pub struct Prefix<'a>(&'a Expr);

impl fmt::Display for Prefix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Expr::Const(value) => write!(f, "{value}"),
            Expr::Var(variable) => write!(f, "{variable}"),
            Expr::Unary(op, arg) => write!(f, "({op} {})", arg.prefix()),
            Expr::Binary(op, left, right) => {
                write!(f, "({op} {} {})", left.prefix(), right.prefix())
            }
        }
    }
}
