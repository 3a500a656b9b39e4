//! Lexer (tokenizer) for preprocessed interface schema text.
//!
//! Keywords are context-specific and come out as identifiers; the parser
//! decides where a word acts as a keyword.

use crate::preprocess::INDENT;
use crate::{ParseError, ParseResult, Span};

/// Token types.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident(String),

    // Symbols
    Colon,     // :
    LParen,    // (
    RParen,    // )
    Comma,     // ,
    Dot,       // .
    LeftArrow, // <-

    // Layout
    /// Leading indentation of a line, in canonical units.
    Indent(usize),
    Newline,

    // End of file
    Eof,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Ident(_) => "identifier",
            TokenKind::Colon => "':'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Comma => "','",
            TokenKind::Dot => "'.'",
            TokenKind::LeftArrow => "'<-'",
            TokenKind::Indent(_) => "indentation",
            TokenKind::Newline => "end of line",
            TokenKind::Eof => "end of input",
        }
    }
}

/// A token with its span.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn eof(pos: usize, line: usize, column: usize) -> Self {
        Self {
            kind: TokenKind::Eof,
            span: Span::new(pos, pos, line, column),
        }
    }

    /// Human readable description used in diagnostics.
    pub fn describe(&self) -> String {
        match &self.kind {
            TokenKind::Ident(name) => format!("'{}'", name),
            kind => kind.name().to_string(),
        }
    }
}

/// Lexer state.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    pos: usize,
    line: usize,
    column: usize,
    at_line_start: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
            pos: 0,
            line: 1,
            column: 1,
            at_line_start: true,
        }
    }

    /// Tokenize all input into a vector of tokens.
    pub fn tokenize(mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn span_from(&self, start: usize, start_line: usize, start_col: usize) -> Span {
        Span::new(start, self.pos, start_line, start_col)
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn next_char(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.pos = pos + c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            Some(c)
        } else {
            None
        }
    }

    /// Skip blanks inside a line. Newlines are significant.
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if c == ' ' || c == '\t' || c == '\r' {
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn scan_indent(&mut self) -> Option<Token> {
        let start = self.pos;
        let start_line = self.line;
        let start_col = self.column;

        let mut depth = 0;
        while self.peek_char() == Some(INDENT) {
            self.next_char();
            depth += 1;
        }

        (depth > 0).then(|| {
            Token::new(
                TokenKind::Indent(depth),
                self.span_from(start, start_line, start_col),
            )
        })
    }

    fn next_token(&mut self) -> ParseResult<Token> {
        if self.at_line_start {
            self.at_line_start = false;
            if let Some(indent) = self.scan_indent() {
                return Ok(indent);
            }
        }

        self.skip_whitespace();

        let start = self.pos;
        let start_line = self.line;
        let start_col = self.column;

        let Some(c) = self.next_char() else {
            return Ok(Token::eof(self.pos, self.line, self.column));
        };

        let kind = match c {
            '\n' => {
                self.at_line_start = true;
                TokenKind::Newline
            }
            ':' => TokenKind::Colon,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '<' => {
                if self.peek_char() == Some('-') {
                    self.next_char();
                    TokenKind::LeftArrow
                } else {
                    return Err(ParseError::new(
                        "unexpected character '<', did you mean '<-'?",
                        self.span_from(start, start_line, start_col),
                    )
                    .with_expected(vec!["'<-'".to_string()])
                    .with_found("'<'"));
                }
            }
            c if is_ident_char(c) => self.scan_ident(c),
            _ => {
                return Err(ParseError::new(
                    format!("unexpected character '{}'", c),
                    self.span_from(start, start_line, start_col),
                )
                .with_found(format!("'{}'", c)));
            }
        };

        Ok(Token::new(
            kind,
            self.span_from(start, start_line, start_col),
        ))
    }

    fn scan_ident(&mut self, first: char) -> TokenKind {
        let mut ident = String::new();
        ident.push(first);

        while let Some(c) = self.peek_char() {
            if is_ident_char(c) {
                ident.push(c);
                self.next_char();
            } else {
                break;
            }
        }

        TokenKind::Ident(ident)
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
