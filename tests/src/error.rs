//! Fixture harness errors.

use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Fixture '{name}' has no .facts or .err expectation")]
    MissingExpectation { name: String },

    #[error("Fixture '{name}' produced different facts\n--- expected\n{expected}\n--- actual\n{actual}")]
    FactMismatch {
        name: String,
        expected: String,
        actual: String,
    },

    #[error("Fixture '{name}' failed unexpectedly: {reason}")]
    UnexpectedFailure { name: String, reason: String },

    #[error("Fixture '{name}' compiled but was expected to fail with '{expected}'")]
    UnexpectedSuccess { name: String, expected: String },

    #[error("Fixture '{name}' failed without '{expected}' in:\n{reason}")]
    WrongError {
        name: String,
        expected: String,
        reason: String,
    },

    #[error("{} fixture(s) failed:\n{}", .0.len(), .0.join("\n\n"))]
    Failures(Vec<String>),
}

impl FixtureError {
    pub fn file_read(path: &Path, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.display().to_string(),
            source,
        }
    }
}

pub type FixtureResult<T> = Result<T, FixtureError>;
