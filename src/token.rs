//! Token scanner shared by the postfix and prefix parsers.
//!
//! The vocabulary is:
//! - variables `x`, `y`, `z`
//! - integer literals with an optional leading `-`
//! - binary symbols `+ - * /` and the binary keyword `atan2`
//! - unary keywords `negate`, `sinh`, `cosh`, `atan`
//! - parentheses `(` and `)`
//!
//! Spaces separate tokens and are the only whitespace. A `-` directly followed by a digit
//! always starts a negative literal, so `5-3` scans as `5` followed by `-3`.

use crate::errors::ParseError;
use crate::expr::Variable;
use crate::operators::{BinaryOp, UnaryOp};

/// A single lexical token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Variable(Variable),
    Number(f64),
    Unary(UnaryOp),
    Binary(BinaryOp),
    Open,
    Close,
}

/// Keywords in matching order. `atan2` must be tried before its prefix `atan`.
const KEYWORDS: [(&str, Token); 5] = [
    ("negate", Token::Unary(UnaryOp::Negate)),
    ("atan2", Token::Binary(BinaryOp::Atan2)),
    ("atan", Token::Unary(UnaryOp::Atan)),
    ("sinh", Token::Unary(UnaryOp::Sinh)),
    ("cosh", Token::Unary(UnaryOp::Cosh)),
];

/// Iterator over the tokens of an input string, yielding `(position, token)` pairs.
///
/// Positions are byte offsets into the input. Scanning stops after the first error.
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    failed: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            failed: false,
        }
    }

    fn skip_spaces(&mut self) {
        let rest = &self.input[self.pos..];
        self.pos += rest.len() - rest.trim_start_matches(' ').len();
    }

    fn scan_number(&mut self) -> f64 {
        let bytes = self.input.as_bytes();
        let start = self.pos;
        if bytes[self.pos] == b'-' {
            self.pos += 1;
        }
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        // An optional sign followed by at least one digit always parses.
        self.input[start..self.pos].parse().unwrap_or(f64::NAN)
    }

    fn scan_token(&mut self) -> Result<Token, ParseError> {
        let rest = &self.input[self.pos..];
        let bytes = rest.as_bytes();
        let first = bytes[0];

        if let Ok(variable) = Variable::try_from(first as char) {
            self.pos += 1;
            return Ok(Token::Variable(variable));
        }

        let negative_literal = first == b'-' && bytes.get(1).is_some_and(u8::is_ascii_digit);
        if first.is_ascii_digit() || negative_literal {
            return Ok(Token::Number(self.scan_number()));
        }

        if let Some((keyword, token)) = KEYWORDS.iter().find(|(kw, _)| rest.starts_with(kw)) {
            self.pos += keyword.len();
            return Ok(*token);
        }

        let symbol = rest.chars().next().unwrap_or_default();
        let token = match symbol {
            '(' => Token::Open,
            ')' => Token::Close,
            c => match BinaryOp::from_symbol(c) {
                Some(op) => Token::Binary(op),
                None => {
                    return Err(ParseError::IllegalSymbol {
                        symbol,
                        position: self.pos,
                    })
                }
            },
        };
        self.pos += 1;
        Ok(token)
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<(usize, Token), ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        self.skip_spaces();
        if self.pos >= self.input.len() {
            return None;
        }
        let start = self.pos;
        match self.scan_token() {
            Ok(token) => {
                tracing::trace!(position = start, ?token, "scanned token");
                Some(Ok((start, token)))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

/// Scans the whole input into a vector of positioned tokens.
pub fn tokenize(input: &str) -> Result<Vec<(usize, Token)>, ParseError> {
    Scanner::new(input).collect()
}
