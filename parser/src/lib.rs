//! Interface schema parser
//!
//! This crate turns interface schema source text into an AST:
//! - Preprocessing (comment and blank line removal, indentation canonicalization)
//! - Tokenizing with line layout (indentation, newlines)
//! - Statement parsing (pattern declarations, decorator chains, relations)
//! - Error handling with location information and usage hints

mod ast;
mod error;
mod lexer;
mod parser;
mod preprocess;

pub use ast::*;
pub use error::*;
pub use parser::{parse, parse_statement, Parser};
pub use preprocess::{preprocess, COMMENT_MARKER};
