//! Prefix parser with full error checking.
//!
//! Input is fully parenthesized prefix notation such as `(+ (* x y) (negate 2))`.
//! Operands, operator symbols and unary keywords are pushed onto a stack; every operand
//! push triggers a reduction that folds completed operator applications into nodes.
//! Parentheses only feed a balance counter, the structure comes from operator arity.
//!
//! Every malformed input is rejected with a `ParseError` before a tree is returned.

use tracing::{debug, trace};

use crate::errors::ParseError;
use crate::expr::{Expr, Variable};
use crate::operators::{BinaryOp, UnaryOp};
use crate::token::{Scanner, Token};

/// An entry of the parse stack.
#[derive(Debug)]
enum Symbol {
    /// A completed sub-expression
    Operand(Box<Expr>),
    /// A binary operator still waiting for its operands
    Binary(BinaryOp),
    /// A unary operator still waiting for its operand
    Unary(UnaryOp),
}

/// Folds completed operator applications on top of the stack.
///
/// Runs right after an operand was pushed, so the top of the stack is always an operand.
/// Stops as soon as the entry below the top is a binary operator that still needs its
/// second operand.
fn reduce(stack: &mut Vec<Symbol>, position: usize) -> Result<(), ParseError> {
    let illegal = ParseError::IllegalExpression { position };

    while stack.len() > 1 {
        match &stack[stack.len() - 2] {
            Symbol::Binary(_) => break,
            Symbol::Unary(op) => {
                let op = *op;
                let Some(Symbol::Operand(arg)) = stack.pop() else {
                    return Err(illegal);
                };
                stack.pop();
                trace!(operator = %op, "reduced unary application");
                stack.push(Symbol::Operand(Expr::unary(op, arg)));
            }
            Symbol::Operand(_) => {
                let (Some(Symbol::Operand(right)), Some(Symbol::Operand(left))) =
                    (stack.pop(), stack.pop())
                else {
                    return Err(illegal);
                };
                let Some(Symbol::Binary(op)) = stack.pop() else {
                    return Err(illegal);
                };
                trace!(operator = %op, "reduced binary application");
                stack.push(Symbol::Operand(Expr::binary(op, left, right)));
            }
        }
    }
    Ok(())
}

/// Parses fully parenthesized prefix text into an expression tree.
///
/// # Errors
/// - `ParseError::EmptyInput` if the input is empty
/// - `ParseError::IncorrectInput` for the degenerate inputs `(x)` and `(0)`, for input that
///   leaves no expression or only a bare operator, and for a parenthesized bare `x`
/// - `ParseError::UnmatchedClosingParen` when a `)` has no matching `(`
/// - `ParseError::MissingClosingParen` when the input ends with open parentheses
/// - `ParseError::IllegalSymbol` for characters outside the vocabulary
/// - `ParseError::IllegalExpression` when operands meet with no operator to combine them
/// - `ParseError::ArgumentCountMismatch` when an operator is left without all its operands
///
/// # Example
/// ```
/// # use xyz_expr::prefix::parse_prefix;
/// let expr = parse_prefix("(+ x (negate 1))").unwrap();
/// assert_eq!(expr.evaluate(5.0, 0.0, 0.0), 4.0);
/// assert_eq!(expr.to_prefix_string(), "(+ x (negate 1))");
///
/// assert!(parse_prefix("(+ x 1").is_err());
/// ```
pub fn parse_prefix(input: &str) -> Result<Expr, ParseError> {
    if input.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    if input == "(x)" || input == "(0)" {
        return Err(ParseError::IncorrectInput(format!(
            "{input} is not a valid expression"
        )));
    }

    let mut stack: Vec<Symbol> = Vec::new();
    let mut balance: usize = 0;
    let mut saw_paren = false;

    for scanned in Scanner::new(input) {
        let (position, token) = scanned?;
        match token {
            Token::Variable(variable) => {
                stack.push(Symbol::Operand(Expr::var(variable)));
                reduce(&mut stack, position)?;
            }
            Token::Number(value) => {
                stack.push(Symbol::Operand(Expr::constant(value)));
                reduce(&mut stack, position)?;
            }
            Token::Unary(op) => stack.push(Symbol::Unary(op)),
            Token::Binary(op) => stack.push(Symbol::Binary(op)),
            Token::Open => {
                saw_paren = true;
                balance += 1;
            }
            Token::Close => {
                saw_paren = true;
                balance = balance
                    .checked_sub(1)
                    .ok_or(ParseError::UnmatchedClosingParen { position })?;
            }
        }
    }

    if balance > 0 {
        return Err(ParseError::MissingClosingParen { open: balance });
    }
    if stack.len() > 1 {
        return Err(ParseError::ArgumentCountMismatch {
            entries: stack.len(),
        });
    }

    let expr = match stack.pop() {
        Some(Symbol::Operand(expr)) => expr,
        Some(Symbol::Binary(op)) => {
            return Err(ParseError::IncorrectInput(format!(
                "operator '{op}' has no operands"
            )))
        }
        Some(Symbol::Unary(op)) => {
            return Err(ParseError::IncorrectInput(format!(
                "operator '{op}' has no operand"
            )))
        }
        None => {
            return Err(ParseError::IncorrectInput(
                "no expression found".to_string(),
            ))
        }
    };

    if saw_paren && *expr == Expr::Var(Variable::X) {
        return Err(ParseError::IncorrectInput(
            "parenthesized variable without an operator".to_string(),
        ));
    }

    debug!(nodes = expr.node_count(), depth = expr.depth(), "parsed prefix expression");
    Ok(*expr)
}
