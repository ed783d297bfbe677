//! Postfix (reverse Polish) parser.
//!
//! A single left-to-right scan pushes operands onto a stack; every operator pops its
//! operands and pushes the node it builds. The parser trusts its input: it does not check
//! that exactly one expression remains, and the most recently pushed entry is the result.
//! It only fails when it cannot produce a tree at all.

use tracing::debug;

use crate::errors::ParseError;
use crate::expr::Expr;
use crate::token::{Scanner, Token};

/// Parses postfix text such as `x y * 2 +` into an expression tree.
///
/// Operands are consumed in push order: for `a b -` the first-pushed `a` becomes the left
/// argument. Leftover operands below the result are ignored.
///
/// # Errors
/// - `ParseError::EmptyInput` if the input contains no tokens
/// - `ParseError::IllegalSymbol` for characters outside the vocabulary, parentheses included
/// - `ParseError::MissingOperand` if an operator finds too few operands on the stack
///
/// # Example
/// ```
/// # use xyz_expr::postfix::parse_postfix;
/// let expr = parse_postfix("3 4 +").unwrap();
/// assert_eq!(expr.evaluate(0.0, 0.0, 0.0), 7.0);
/// ```
pub fn parse_postfix(input: &str) -> Result<Expr, ParseError> {
    let mut stack: Vec<Box<Expr>> = Vec::new();

    for scanned in Scanner::new(input) {
        let (position, token) = scanned?;
        let missing = |operator: &str| ParseError::MissingOperand {
            operator: operator.to_string(),
            position,
        };

        match token {
            Token::Variable(variable) => stack.push(Expr::var(variable)),
            Token::Number(value) => stack.push(Expr::constant(value)),
            Token::Unary(op) => {
                let arg = stack.pop().ok_or_else(|| missing(op.symbol()))?;
                stack.push(Expr::unary(op, arg));
            }
            Token::Binary(op) => {
                let right = stack.pop().ok_or_else(|| missing(op.symbol()))?;
                let left = stack.pop().ok_or_else(|| missing(op.symbol()))?;
                stack.push(Expr::binary(op, left, right));
            }
            Token::Open | Token::Close => {
                let symbol = if token == Token::Open { '(' } else { ')' };
                return Err(ParseError::IllegalSymbol { symbol, position });
            }
        }
    }

    let result = stack.pop().ok_or(ParseError::EmptyInput)?;
    if !stack.is_empty() {
        debug!(leftover = stack.len(), "ignoring unconsumed postfix operands");
    }
    debug!(nodes = result.node_count(), "parsed postfix expression");
    Ok(*result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Variable;
    use crate::operators::{BinaryOp, UnaryOp};

    #[test]
    fn test_smoke() {
        assert_eq!(parse_postfix("3 4 +").unwrap().evaluate(0.0, 0.0, 0.0), 7.0);
        assert_eq!(parse_postfix("x y *").unwrap().evaluate(3.0, 4.0, 0.0), 12.0);
    }

    #[test]
    fn test_operand_order() {
        assert_eq!(
            parse_postfix("x 1 -").unwrap(),
            *Expr::sub(Expr::var(Variable::X), Expr::constant(1.0))
        );
        assert_eq!(
            parse_postfix("y x atan2").unwrap(),
            *Expr::binary(BinaryOp::Atan2, Expr::var(Variable::Y), Expr::var(Variable::X))
        );
        assert_eq!(parse_postfix("8 2 /").unwrap().evaluate(0.0, 0.0, 0.0), 4.0);
    }

    #[test]
    fn test_unary_keywords() {
        assert_eq!(
            parse_postfix("x negate").unwrap(),
            *Expr::neg(Expr::var(Variable::X))
        );
        assert_eq!(
            parse_postfix("z atan").unwrap(),
            *Expr::unary(UnaryOp::Atan, Expr::var(Variable::Z))
        );
        assert_eq!(
            parse_postfix("x sinh cosh").unwrap(),
            *Expr::unary(UnaryOp::Cosh, Expr::unary(UnaryOp::Sinh, Expr::var(Variable::X)))
        );
    }

    #[test]
    fn test_negative_literals() {
        assert_eq!(parse_postfix("-5").unwrap(), Expr::Const(-5.0));
        // `-` followed by a digit is a literal, never subtraction
        assert_eq!(parse_postfix("x -3").unwrap(), Expr::Const(-3.0));
        assert_eq!(parse_postfix("5-3 +").unwrap().evaluate(0.0, 0.0, 0.0), 2.0);
        assert_eq!(parse_postfix("10 -3 -").unwrap().evaluate(0.0, 0.0, 0.0), 13.0);
    }

    #[test]
    fn test_display_roundtrip() {
        let text = "x y + 2 * z negate /";
        let expr = parse_postfix(text).unwrap();
        assert_eq!(expr.to_string(), text);
        assert_eq!(expr.evaluate(1.0, 2.0, 3.0), -2.0);
    }

    #[test]
    fn test_leftover_operands_are_ignored() {
        assert_eq!(parse_postfix("1 2 3 +").unwrap().evaluate(0.0, 0.0, 0.0), 5.0);
        assert_eq!(parse_postfix("x y").unwrap(), Expr::Var(Variable::Y));
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_postfix(""), Err(ParseError::EmptyInput));
        assert_eq!(parse_postfix("   "), Err(ParseError::EmptyInput));
        assert_eq!(
            parse_postfix("x +"),
            Err(ParseError::MissingOperand {
                operator: "+".to_string(),
                position: 2
            })
        );
        assert!(matches!(
            parse_postfix("negate"),
            Err(ParseError::MissingOperand { .. })
        ));
        assert_eq!(
            parse_postfix("(x)"),
            Err(ParseError::IllegalSymbol {
                symbol: '(',
                position: 0
            })
        );
        assert!(matches!(
            parse_postfix("x w +"),
            Err(ParseError::IllegalSymbol { symbol: 'w', .. })
        ));
    }
}
