//! Transpiler error types.

use isc_parser::{Identifier, ParseError};
use thiserror::Error;

/// Semantic errors: a parsed-but-invalid shape. These abort the whole
/// transpile call; no partial fact output is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranspileError {
    /// A definition without decorators (unreachable from the grammar).
    #[error("Definition '{name}' has no decorators at line {line}, column {column}")]
    EmptyDefinition {
        name: String,
        line: usize,
        column: usize,
    },

    /// A template instantiation naming a template that was never declared.
    #[error("Undeclared template '{name}' at line {line}, column {column}")]
    UndeclaredTemplate {
        name: String,
        line: usize,
        column: usize,
    },

    /// Two templates declared with the same name.
    #[error("Duplicate template name '{name}' at line {line}, column {column}")]
    DuplicateTemplate {
        name: String,
        line: usize,
        column: usize,
    },

    /// Call arguments do not match the template's parameters.
    #[error(
        "Template '{name}' expects {expected} arguments, got {actual} at line {line}, column {column}"
    )]
    ArityMismatch {
        name: String,
        expected: usize,
        actual: usize,
        line: usize,
        column: usize,
    },

    /// A template instantiating itself, directly or transitively.
    #[error("Recursive instantiation of template '{name}': {chain}")]
    RecursiveTemplate { name: String, chain: String },
}

impl TranspileError {
    pub fn empty_definition(name: &Identifier) -> Self {
        Self::EmptyDefinition {
            name: name.name.clone(),
            line: name.span.line,
            column: name.span.column,
        }
    }

    pub fn undeclared_template(name: &Identifier) -> Self {
        Self::UndeclaredTemplate {
            name: name.name.clone(),
            line: name.span.line,
            column: name.span.column,
        }
    }

    pub fn duplicate_template(name: &Identifier) -> Self {
        Self::DuplicateTemplate {
            name: name.name.clone(),
            line: name.span.line,
            column: name.span.column,
        }
    }

    pub fn arity_mismatch(name: &Identifier, expected: usize, actual: usize) -> Self {
        Self::ArityMismatch {
            name: name.name.clone(),
            expected,
            actual,
            line: name.span.line,
            column: name.span.column,
        }
    }

    pub fn recursive_template(name: impl Into<String>, chain: impl Into<String>) -> Self {
        Self::RecursiveTemplate {
            name: name.into(),
            chain: chain.into(),
        }
    }
}

/// Result type for transpiler operations.
pub type TranspileResult<T> = Result<T, TranspileError>;

/// Errors from a whole `compile` call.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The source did not match the grammar. Recoverable by editing input.
    #[error("{0}")]
    Syntax(#[from] ParseError),

    /// The source parsed but cannot be lowered.
    #[error("Semantic error: {0}")]
    Semantic(#[from] TranspileError),
}

impl CompileError {
    /// User-facing explanation; syntax errors include usage hints.
    pub fn reason(&self) -> String {
        match self {
            CompileError::Syntax(e) => e.reason(),
            CompileError::Semantic(e) => e.to_string(),
        }
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, CompileError::Syntax(_))
    }
}

/// Result type for compile calls.
pub type CompileResult<T> = Result<T, CompileError>;
