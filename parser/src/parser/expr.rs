//! Expression parsing.
//!
//! Expressions are identifiers joined left-associatively by member access
//! (`.`) or the derives-from arrow (`<-`).

use super::Parser;
use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::lexer::TokenKind;

impl Parser {
    /// Parse an expression.
    pub(crate) fn parse_expr(&mut self) -> ParseResult<Expression> {
        let mut left = Expression::Identifier(self.expect_ident()?);

        loop {
            let op = if self.check(&TokenKind::Dot) {
                BinaryOp::Member
            } else if self.check(&TokenKind::LeftArrow) {
                BinaryOp::DerivesFrom
            } else {
                break;
            };

            self.advance();
            let right = Expression::Identifier(self.expect_ident()?);
            left = Expression::Binary(BinaryExpression {
                op,
                left: Box::new(left),
                right: Box::new(right),
            });
        }

        Ok(left)
    }

    /// Parse a parenthesized, comma-separated, non-empty identifier list.
    pub(crate) fn parse_args(&mut self) -> ParseResult<Vec<Identifier>> {
        let open = self.expect(&TokenKind::LParen)?;

        if self.check(&TokenKind::RParen) {
            return Err(ParseError::new("argument list must not be empty", open.span)
                .with_expected(vec!["identifier".to_string()])
                .with_found("')'"));
        }

        let mut args = vec![self.expect_ident()?];
        while self.check(&TokenKind::Comma) {
            self.advance();
            args.push(self.expect_ident()?);
        }

        self.expect(&TokenKind::RParen)?;
        Ok(args)
    }
}
