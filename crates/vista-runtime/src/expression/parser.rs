//! Token stream parser
//!
//! Recursive descent over the grammar:
//!
//! ```text
//! or      := and ( "||" and )*
//! and     := unary ( "&&" unary )*
//! unary   := "not" unary | primary
//! primary := variable | "(" or ")"
//! ```

use super::token::{join, Token};
use super::tree::BoolExpr;
use crate::error::{Result, RuntimeError};

/// Builds a `BoolExpr` from tokens
pub struct ExpressionParser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> ExpressionParser<'a> {
    /// Parse a complete token stream
    pub fn parse(tokens: &'a [Token]) -> Result<BoolExpr> {
        let mut parser = ExpressionParser { tokens, pos: 0 };

        if tokens.is_empty() {
            return Err(parser.error("empty expression"));
        }

        let expr = parser.parse_or()?;

        if let Some(token) = parser.peek() {
            return Err(parser.error(format!("unexpected token '{}'", token)));
        }

        Ok(expr)
    }

    /// Lex and parse expression text
    pub fn parse_str(input: &str) -> Result<BoolExpr> {
        let tokens = Token::lex(input);
        ExpressionParser::parse(&tokens)
    }

    fn parse_or(&mut self) -> Result<BoolExpr> {
        let mut operands = vec![self.parse_and()?];
        while self.eat(&Token::Or) {
            operands.push(self.parse_and()?);
        }
        Ok(BoolExpr::or(operands))
    }

    fn parse_and(&mut self) -> Result<BoolExpr> {
        let mut operands = vec![self.parse_unary()?];
        while self.eat(&Token::And) {
            operands.push(self.parse_unary()?);
        }
        Ok(BoolExpr::and(operands))
    }

    fn parse_unary(&mut self) -> Result<BoolExpr> {
        if self.eat(&Token::Not) {
            return Ok(BoolExpr::not(self.parse_unary()?));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<BoolExpr> {
        match self.advance() {
            Some(Token::Variable(name)) => Ok(BoolExpr::Variable(name.clone())),
            Some(Token::LeftParen) => {
                let inner = self.parse_or()?;
                if !self.eat(&Token::RightParen) {
                    return Err(self.error("missing closing bracket"));
                }
                Ok(inner)
            }
            Some(token) => Err(self.error(format!("unexpected token '{}'", token))),
            None => Err(self.error("unexpected end of expression")),
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn error(&self, message: impl Into<String>) -> RuntimeError {
        RuntimeError::Syntax {
            message: message.into(),
            expression: join(self.tokens),
        }
    }
}
