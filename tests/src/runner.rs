//! Fixture runner.

use std::path::Path;

use isc_transpiler::compile;

use crate::error::{FixtureError, FixtureResult};
use crate::fixture::{Expectation, Fixture};

impl Fixture {
    /// Compile the fixture and check it against its expectation.
    pub fn run(&self) -> FixtureResult<()> {
        let result = compile(&self.source);

        match (&self.expectation, result) {
            (Expectation::Facts(expected), Ok(actual)) => {
                if actual.trim_end() == expected {
                    Ok(())
                } else {
                    Err(FixtureError::FactMismatch {
                        name: self.name.clone(),
                        expected: expected.clone(),
                        actual,
                    })
                }
            }
            (Expectation::Facts(_), Err(e)) => Err(FixtureError::UnexpectedFailure {
                name: self.name.clone(),
                reason: e.reason(),
            }),
            (Expectation::Error(expected), Ok(_)) => Err(FixtureError::UnexpectedSuccess {
                name: self.name.clone(),
                expected: expected.clone(),
            }),
            (Expectation::Error(expected), Err(e)) => {
                let reason = e.reason();
                if reason.contains(expected.as_str()) {
                    Ok(())
                } else {
                    Err(FixtureError::WrongError {
                        name: self.name.clone(),
                        expected: expected.clone(),
                        reason,
                    })
                }
            }
        }
    }
}

/// Run every fixture in `dir`, returning how many ran. All fixtures run
/// even after a failure; failures are reported together.
pub fn run_all(dir: &Path) -> FixtureResult<usize> {
    let fixtures = Fixture::discover(dir)?;

    let failures: Vec<String> = fixtures
        .iter()
        .filter_map(|f| f.run().err())
        .map(|e| e.to_string())
        .collect();

    if failures.is_empty() {
        Ok(fixtures.len())
    } else {
        Err(FixtureError::Failures(failures))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(source: &str, expectation: Expectation) -> Fixture {
        Fixture {
            name: "inline".to_string(),
            source: source.to_string(),
            expectation,
        }
    }

    #[test]
    fn test_matching_facts_pass() {
        let f = fixture("many: x", Expectation::Facts("set(many, x)".to_string()));
        assert!(f.run().is_ok());
    }

    #[test]
    fn test_mismatched_facts_reported() {
        let f = fixture("many: x", Expectation::Facts("set(single, x)".to_string()));

        let err = f.run().unwrap_err();

        assert!(matches!(err, FixtureError::FactMismatch { ref actual, .. } if actual == "set(many, x)"));
    }

    #[test]
    fn test_expected_error_matched() {
        let f = fixture("a <", Expectation::Error("did you mean '<-'".to_string()));
        assert!(f.run().is_ok());
    }

    #[test]
    fn test_expected_error_but_compiled() {
        let f = fixture("many: x", Expectation::Error("boom".to_string()));
        assert!(matches!(f.run(), Err(FixtureError::UnexpectedSuccess { .. })));
    }
}
