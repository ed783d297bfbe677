//! Error types for the xyz-expr crate.
//!
//! This module defines the failure modes of parsing and of the high-level formula API:
//!
//! - `ParseError`: Errors while turning text into an expression tree
//! - `FormulaError`: High-level errors when working with a parsed formula
//!
//! Evaluation and differentiation of an already-built tree never fail; division by zero
//! and similar cases follow IEEE-754 semantics and produce infinities or NaN.

use thiserror::Error;

/// Errors that can occur while parsing an expression.
///
/// The prefix parser classifies every malformed input into one of these kinds. The postfix
/// parser is permissive and only reports the cases that would otherwise leave it without a
/// tree to return (`EmptyInput`, `IllegalSymbol`, `MissingOperand`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input was empty or contained only spaces
    #[error("Empty input: nothing to parse")]
    EmptyInput,
    /// A closing parenthesis appeared without a matching opening one
    #[error("Unmatched ')' at position {position}: no opening '('")]
    UnmatchedClosingParen { position: usize },
    /// The input ended while parentheses were still open
    #[error("Missing closing ')': {open} parenthesis left open")]
    MissingClosingParen { open: usize },
    /// A character outside the token vocabulary
    #[error("Illegal symbol '{symbol}' at position {position}")]
    IllegalSymbol { symbol: char, position: usize },
    /// Two operands were reduced but no operator was left to combine them
    #[error("Illegal expression: operands at position {position} have no operator to apply")]
    IllegalExpression { position: usize },
    /// More than one entry was left after the scan
    #[error("Mismatch in number of arguments: {entries} entries left unreduced")]
    ArgumentCountMismatch { entries: usize },
    /// Degenerate input, or the result is a bare operator instead of an expression
    #[error("Incorrect input: {0}")]
    IncorrectInput(String),
    /// An operator in postfix input found fewer operands than it needs
    #[error("Operator '{operator}' at position {position} is missing an operand")]
    MissingOperand { operator: String, position: usize },
    /// A variable name other than x, y or z
    #[error("Unknown variable: {0:?} (expected x, y or z)")]
    UnknownVariable(String),
}

/// High-level errors that can occur when working with a `Formula`.
#[derive(Error, Debug)]
pub enum FormulaError {
    /// Error when parsing the formula text
    #[error("Failed to parse formula")]
    Parse(#[from] ParseError),
    /// Error when the input length is not the number of variables
    #[error("Invalid input length: expected {expected}, got {got}")]
    InvalidInputLength { expected: usize, got: usize },
}
