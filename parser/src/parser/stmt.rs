//! Statement parsing.
//!
//! Handles parsing of schema statements:
//! - Pattern declarations: `pattern Name(args) extends Base:` ... `end`
//! - Definitions: decorator chains `A: B(x): name`
//! - Relations: `mapto`, `mapto many`, `structures`, `constrains`,
//!   `cover ... along ...`, `represents ... as ...`
//! - Expression statements

use super::Parser;
use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::lexer::TokenKind;

/// Words introducing a pattern declaration. `class` is the legacy spelling.
const PATTERN_KEYWORDS: [&str; 2] = ["pattern", "class"];

impl Parser {
    /// Parse a whole program: statements separated by newlines.
    pub fn parse_program(&mut self) -> ParseResult<Program> {
        let mut statements = Vec::new();

        loop {
            self.skip_newlines();
            if self.check(&TokenKind::Eof) {
                break;
            }
            if self.check(&TokenKind::Indent(0)) {
                let token = self.peek();
                return Err(ParseError::new(
                    "unexpected indentation outside a pattern body",
                    token.span,
                )
                .with_expected(vec!["statement".to_string()])
                .with_found("indentation"));
            }
            statements.push(self.parse_statement()?);
            self.expect_line_end()?;
        }

        Ok(Program { statements })
    }

    /// Parse a single statement, without its line terminator.
    ///
    /// Alternatives are tried in grammar order: relation, pattern
    /// declaration, definition, expression.
    pub fn parse_statement(&mut self) -> ParseResult<Statement> {
        if self.at_pattern_decl() {
            return self.parse_pattern_decl().map(Statement::Pattern);
        }

        let left = self.parse_relation_left()?;
        self.parse_relation_tail(left)
    }

    // ==================== PATTERNS ====================

    /// A pattern header is the keyword, a name, then `(`, `:` or
    /// `extends Base:`. Anything else starting with the keyword is a
    /// relation or expression, e.g. `pattern mapto superset`.
    fn at_pattern_decl(&self) -> bool {
        if !PATTERN_KEYWORDS.iter().any(|kw| self.check_word(kw)) || !self.check_ident_at(1) {
            return false;
        }

        match &self.peek_at(2).kind {
            TokenKind::LParen | TokenKind::Colon => true,
            TokenKind::Ident(word) if word == "extends" => {
                self.check_ident_at(3) && matches!(self.peek_at(4).kind, TokenKind::Colon)
            }
            _ => false,
        }
    }

    /// Parse a pattern declaration.
    /// Syntax: pattern Name [(args)] [extends Base]: NEWLINE (INDENT statement NEWLINE)+ end
    fn parse_pattern_decl(&mut self) -> ParseResult<PatternStatement> {
        self.advance(); // consume 'pattern'
        let name = self.expect_ident()?;

        let args = if self.check(&TokenKind::LParen) {
            Some(self.parse_args()?)
        } else {
            None
        };

        let extends = if self.check_word("extends") {
            self.advance();
            Some(self.expect_ident()?)
        } else {
            None
        };

        self.expect(&TokenKind::Colon)?;
        if !self.check(&TokenKind::Newline) {
            return Err(self.unexpected("end of line after pattern header"));
        }
        self.advance();

        let statements = self.parse_pattern_body(&name)?;

        Ok(PatternStatement {
            name,
            args,
            statements,
            extends,
        })
    }

    /// Parse indented body lines up to and including the closing `end`.
    fn parse_pattern_body(&mut self, name: &Identifier) -> ParseResult<Vec<Statement>> {
        let mut statements = Vec::new();

        loop {
            let indented = if self.check(&TokenKind::Indent(0)) {
                self.advance();
                true
            } else {
                false
            };

            if self.check_word("end") && self.is_line_end_at(1) {
                if statements.is_empty() {
                    return Err(ParseError::new(
                        format!(
                            "pattern '{}' must contain at least one statement",
                            name.name
                        ),
                        self.peek().span,
                    ));
                }
                self.advance(); // consume 'end'
                return Ok(statements);
            }

            let closing = format!("'end' to close pattern '{}'", name.name);
            if self.check(&TokenKind::Eof) {
                return Err(self.unexpected(&closing));
            }
            if !indented {
                return Err(self.unexpected("indented statement or 'end'"));
            }

            statements.push(self.parse_statement()?);

            match self.peek().kind {
                TokenKind::Newline => {
                    self.advance();
                }
                TokenKind::Eof => return Err(self.unexpected(&closing)),
                _ => return Err(self.unexpected("end of line")),
            }
        }
    }

    // ==================== DEFINITIONS ====================

    /// A definition starts with a decorator: a word followed by ':' or '('.
    fn at_definition(&self) -> bool {
        self.check_ident_at(0)
            && matches!(
                self.peek_at(1).kind,
                TokenKind::Colon | TokenKind::LParen
            )
    }

    /// Parse a definition.
    /// Syntax: (decorator ':')+ name, where decorator is `ident` or `ident(args)`
    fn parse_definition(&mut self) -> ParseResult<DefinitionStatement> {
        let mut decorators = Vec::new();

        loop {
            let ident = self.expect_ident()?;

            if self.check(&TokenKind::LParen) {
                let args = self.parse_args()?;
                self.expect(&TokenKind::Colon)?;
                decorators.push(Decorator::Call(PatternCall { name: ident, args }));
            } else if self.check(&TokenKind::Colon) {
                self.advance();
                decorators.push(Decorator::Tag(ident));
            } else {
                debug_assert!(!decorators.is_empty());
                return Ok(DefinitionStatement::new(decorators, ident));
            }
        }
    }

    // ==================== RELATIONS ====================

    fn parse_relation_left(&mut self) -> ParseResult<RelationLeft> {
        if self.at_definition() {
            self.parse_definition().map(RelationLeft::Definition)
        } else {
            self.parse_expr().map(RelationLeft::Expression)
        }
    }

    /// Parse whatever follows the left operand. Without a relation keyword
    /// the left operand is the statement itself.
    fn parse_relation_tail(&mut self, left: RelationLeft) -> ParseResult<Statement> {
        if let Some(relation) = self.parse_relation_keyword() {
            let right = self.parse_expr()?;
            return Ok(Statement::BinaryRelation(BinaryRelation {
                left,
                right,
                relation,
            }));
        }

        if self.check_word("cover") {
            self.advance();
            let middle = self.parse_expr()?;
            self.expect_word("along")?;
            let right = self.parse_expr()?;
            return Ok(Statement::CoverRelation(CoverRelation {
                left,
                middle,
                right,
            }));
        }

        if self.check_word("represents") {
            self.advance();
            let data = self.parse_with_expr()?;
            let structure = if self.check_word("as") {
                self.advance();
                Some(self.parse_with_expr()?)
            } else {
                None
            };
            return Ok(Statement::RepresentsRelation(RepresentsRelation {
                view: left,
                data,
                structure,
            }));
        }

        Ok(match left {
            RelationLeft::Definition(def) => Statement::Definition(def),
            RelationLeft::Expression(expression) => {
                Statement::Expression(ExpressionStatement { expression })
            }
        })
    }

    /// Consume a relation keyword, longest alternative first.
    fn parse_relation_keyword(&mut self) -> Option<RelationKind> {
        let relation = if self.check_word("mapto") {
            // `mapto many x`; a bare `mapto many` maps to something named many
            let is_many = matches!(&self.peek_at(1).kind, TokenKind::Ident(s) if s == "many")
                && self.check_ident_at(2);
            if is_many {
                self.advance();
                RelationKind::MapToMany
            } else {
                RelationKind::MapTo
            }
        } else if self.check_word("structures") {
            RelationKind::Structures
        } else if self.check_word("constrains") {
            RelationKind::Constrains
        } else {
            return None;
        };

        self.advance();
        Some(relation)
    }

    /// Parse `expr [with expr]`.
    fn parse_with_expr(&mut self) -> ParseResult<WithExpression> {
        let left = self.parse_expr()?;
        let right = if self.check_word("with") {
            self.advance();
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(WithExpression { left, right })
    }
}
