//! Tokenizer for calculator expressions.

use super::{CalcError, CalcResult};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Plus,
    Minus,
    Times,
    Divide,
    Percent,
    LParen,
    RParen,
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Plus => f.write_str("+"),
            Self::Minus => f.write_str("-"),
            Self::Times => f.write_str("×"),
            Self::Divide => f.write_str("÷"),
            Self::Percent => f.write_str("%"),
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
        }
    }
}

/// Splits `input` into tokens; whitespace is skipped.
///
/// Both display glyphs (`×`, `÷`) and their ASCII forms (`*`, `/`) are read.
pub fn tokenize(input: &str) -> CalcResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(offset, ch)) = chars.peek() {
        let token = match ch {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            c if c.is_ascii_digit() || c == '.' => {
                let mut literal = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_ascii_digit() || c == '.' {
                        literal.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value = parse_number(&literal)?;
                tokens.push(Token::Number(value));
                continue;
            }
            '+' => Token::Plus,
            '-' | '−' => Token::Minus,
            '×' | '*' => Token::Times,
            '÷' | '/' => Token::Divide,
            '%' => Token::Percent,
            '(' => Token::LParen,
            ')' => Token::RParen,
            other => return Err(CalcError::UnexpectedChar { ch: other, offset }),
        };
        tokens.push(token);
        chars.next();
    }

    Ok(tokens)
}

fn parse_number(literal: &str) -> CalcResult<f64> {
    if literal == "." || literal.matches('.').count() > 1 {
        return Err(CalcError::InvalidNumber(literal.to_string()));
    }
    literal
        .parse::<f64>()
        .map_err(|_| CalcError::InvalidNumber(literal.to_string()))
}
