//! Recursive-descent evaluator.
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := unary (('×' | '÷' | '%') unary)*
//! unary  := ('+' | '-') unary | primary
//! primary:= NUMBER | '(' expr ')'
//! ```

use super::lexer::Token;
use super::{CalcError, CalcResult};

const MAX_DEPTH: usize = 256;

pub(super) struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub(super) fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Parses the full token stream; trailing tokens are an error.
    pub(super) fn parse(mut self) -> CalcResult<f64> {
        let value = self.expr()?;
        match self.peek() {
            None => Ok(value),
            Some(token) => Err(CalcError::UnexpectedToken(token.clone())),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expr(&mut self) -> CalcResult<f64> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> CalcResult<f64> {
        let mut value = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Times) => {
                    self.pos += 1;
                    value *= self.unary()?;
                }
                Some(Token::Divide) => {
                    self.pos += 1;
                    let rhs = self.unary()?;
                    if rhs == 0.0 {
                        return Err(CalcError::DivisionByZero);
                    }
                    value /= rhs;
                }
                Some(Token::Percent) => {
                    self.pos += 1;
                    let rhs = self.unary()?;
                    if rhs == 0.0 {
                        return Err(CalcError::DivisionByZero);
                    }
                    value %= rhs;
                }
                _ => return Ok(value),
            }
        }
    }

    fn unary(&mut self) -> CalcResult<f64> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                self.nested(|parser| parser.unary()).map(|value| -value)
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.nested(|parser| parser.unary())
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> CalcResult<f64> {
        match self.advance().cloned() {
            Some(Token::Number(value)) => Ok(value),
            Some(Token::LParen) => {
                let value = self.nested(|parser| parser.expr())?;
                match self.advance() {
                    Some(Token::RParen) => Ok(value),
                    Some(other) => Err(CalcError::UnexpectedToken(other.clone())),
                    None => Err(CalcError::UnbalancedParen),
                }
            }
            Some(other) => Err(CalcError::UnexpectedToken(other)),
            None => Err(CalcError::UnexpectedEnd),
        }
    }

    fn nested(&mut self, inner: impl FnOnce(&mut Self) -> CalcResult<f64>) -> CalcResult<f64> {
        if self.depth >= MAX_DEPTH {
            return Err(CalcError::NestingTooDeep);
        }
        self.depth += 1;
        let result = inner(self);
        self.depth -= 1;
        result
    }
}
