//! Arithmetic expression evaluation for the calculator tool.
//!
//! # Responsibility
//! - Tokenize and evaluate `+ - × ÷ % ( )` expressions over decimals.
//! - Format results the way the calculator displays them.
//!
//! # Invariants
//! - Only the fixed token set is accepted; anything else is an error.
//! - Non-finite results are errors, never displayed values.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod lexer;
mod parser;

pub use lexer::{tokenize, Token};

pub type CalcResult<T> = Result<T, CalcError>;

#[derive(Debug, Clone, PartialEq)]
pub enum CalcError {
    /// Input is empty or whitespace-only.
    Empty,
    UnexpectedChar { ch: char, offset: usize },
    InvalidNumber(String),
    /// Input ended while an operand was expected.
    UnexpectedEnd,
    UnexpectedToken(Token),
    UnbalancedParen,
    NestingTooDeep,
    DivisionByZero,
    NonFinite,
}

impl Display for CalcError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty expression"),
            Self::UnexpectedChar { ch, offset } => {
                write!(f, "unexpected character `{ch}` at {offset}")
            }
            Self::InvalidNumber(text) => write!(f, "invalid number `{text}`"),
            Self::UnexpectedEnd => write!(f, "unexpected end of expression"),
            Self::UnexpectedToken(token) => write!(f, "unexpected token `{token}`"),
            Self::UnbalancedParen => write!(f, "unbalanced parenthesis"),
            Self::NestingTooDeep => write!(f, "expression nesting is too deep"),
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::NonFinite => write!(f, "result is not a finite number"),
        }
    }
}

impl Error for CalcError {}

/// Evaluates an expression to a finite number.
pub fn evaluate(input: &str) -> CalcResult<f64> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(CalcError::Empty);
    }
    let value = parser::Parser::new(&tokens).parse()?;
    if !value.is_finite() {
        return Err(CalcError::NonFinite);
    }
    Ok(value)
}

/// Integral values print bare; others with four decimals.
pub fn format_result(value: f64) -> String {
    // Normalizes -0 to 0.
    let value = if value == 0.0 { 0.0 } else { value };
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.4}")
    }
}

/// Evaluates and formats in one step.
pub fn evaluate_display(input: &str) -> CalcResult<String> {
    evaluate(input).map(format_result)
}
