//! Parser for interface schema source text.
//!
//! This module is organized into submodules by parsing category:
//! - `stmt`: Program, statements, pattern declarations, definitions, relations
//! - `expr`: Expressions and argument lists

mod expr;
mod stmt;

use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::preprocess::preprocess;

// ==================== PARSER STATE ====================

/// Parser state.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Create a new parser from preprocessed text.
    pub fn new(input: &str) -> ParseResult<Self> {
        let tokens = Lexer::new(input).tokenize()?;
        Ok(Self { tokens, pos: 0 })
    }
}

// ==================== TOKEN HELPERS ====================

impl Parser {
    pub(crate) fn peek(&self) -> &Token {
        self.peek_at(0)
    }

    /// Look `offset` tokens ahead; past the end this is the EOF token.
    pub(crate) fn peek_at(&self, offset: usize) -> &Token {
        self.tokens.get(self.pos + offset).unwrap_or_else(|| {
            self.tokens
                .last()
                .expect("tokens should always end with EOF")
        })
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    /// Check for a context-specific keyword.
    pub(crate) fn check_word(&self, word: &str) -> bool {
        matches!(&self.peek().kind, TokenKind::Ident(s) if s == word)
    }

    pub(crate) fn check_ident_at(&self, offset: usize) -> bool {
        matches!(self.peek_at(offset).kind, TokenKind::Ident(_))
    }

    pub(crate) fn is_line_end_at(&self, offset: usize) -> bool {
        matches!(
            self.peek_at(offset).kind,
            TokenKind::Newline | TokenKind::Eof
        )
    }

    pub(crate) fn expect(&mut self, kind: &TokenKind) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.name()))
        }
    }

    pub(crate) fn expect_ident(&mut self) -> ParseResult<Identifier> {
        match self.peek().kind.clone() {
            TokenKind::Ident(name) => {
                let span = self.advance().span;
                Ok(Identifier::with_span(name, span))
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    pub(crate) fn expect_word(&mut self, word: &str) -> ParseResult<Token> {
        if self.check_word(word) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&format!("'{}'", word)))
        }
    }

    /// Consume the end of a statement line. End of input also ends a line.
    pub(crate) fn expect_line_end(&mut self) -> ParseResult<()> {
        match self.peek().kind {
            TokenKind::Newline => {
                self.advance();
                Ok(())
            }
            TokenKind::Eof => Ok(()),
            _ => Err(self.unexpected("end of line")),
        }
    }

    pub(crate) fn skip_newlines(&mut self) {
        while self.check(&TokenKind::Newline) {
            self.advance();
        }
    }

    /// Build an error describing the current token.
    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.peek();
        if matches!(token.kind, TokenKind::Eof) {
            ParseError::unexpected_eof(token.span, expected)
        } else {
            ParseError::unexpected_token(token.span, expected, &token.describe())
        }
    }
}

// ==================== PUBLIC API ====================

/// Parse a whole document.
///
/// Bad input yields a [`ParseError`]; this never panics on user text.
pub fn parse(source: &str) -> ParseResult<Program> {
    let text = preprocess(source);
    tracing::debug!(preprocessed = %text, "preprocessed source");

    let program = Parser::new(&text)?.parse_program()?;
    tracing::debug!(statements = program.statements.len(), ?program, "parsed program");
    Ok(program)
}

/// Parse exactly one statement from source text.
pub fn parse_statement(source: &str) -> ParseResult<Statement> {
    let mut program = parse(source)?;
    match program.statements.len() {
        1 => Ok(program.statements.remove(0)),
        n => Err(ParseError::new(
            format!("expected exactly one statement, found {}", n),
            Span::default(),
        )),
    }
}

// ==================== TESTS ====================
