//! Fixture discovery.
//!
//! A fixture is a `<name>.is` schema paired with either `<name>.facts`
//! (the exact expected output) or `<name>.err` (a substring the failure
//! reason must contain).

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{FixtureError, FixtureResult};

pub const SOURCE_EXT: &str = "is";
pub const FACTS_EXT: &str = "facts";
pub const ERROR_EXT: &str = "err";

/// What a fixture is expected to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    /// Exact fact text, trailing whitespace ignored.
    Facts(String),
    /// Compile fails with a reason containing this text.
    Error(String),
}

#[derive(Debug, Clone)]
pub struct Fixture {
    pub name: String,
    pub source: String,
    pub expectation: Expectation,
}

impl Fixture {
    /// Load the fixture whose schema lives at `path`.
    pub fn load(path: &Path) -> FixtureResult<Self> {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let source = read(path)?;

        let facts = path.with_extension(FACTS_EXT);
        let error = path.with_extension(ERROR_EXT);
        let expectation = if facts.exists() {
            Expectation::Facts(read(&facts)?.trim_end().to_string())
        } else if error.exists() {
            Expectation::Error(read(&error)?.trim().to_string())
        } else {
            return Err(FixtureError::MissingExpectation { name });
        };

        Ok(Self {
            name,
            source,
            expectation,
        })
    }

    /// Load every fixture in `dir`, sorted by name.
    pub fn discover(dir: &Path) -> FixtureResult<Vec<Self>> {
        let entries = fs::read_dir(dir).map_err(|e| FixtureError::file_read(dir, e))?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| FixtureError::file_read(dir, e))?.path();
            if path.extension().is_some_and(|ext| ext == SOURCE_EXT) {
                paths.push(path);
            }
        }
        paths.sort();

        paths.iter().map(|p| Self::load(p)).collect()
    }
}

/// The fixtures shipped with this crate.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

fn read(path: &Path) -> FixtureResult<String> {
    fs::read_to_string(path).map_err(|e| FixtureError::file_read(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_facts_fixture() {
        // GIVEN
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("one.is"), "many: x\n").unwrap();
        fs::write(dir.path().join("one.facts"), "set(many, x)\n\n").unwrap();

        // WHEN
        let fixture = Fixture::load(&dir.path().join("one.is")).unwrap();

        // THEN
        assert_eq!(fixture.name, "one");
        assert_eq!(fixture.expectation, Expectation::Facts("set(many, x)".to_string()));
    }

    #[test]
    fn test_missing_expectation() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("lonely.is"), "many: x\n").unwrap();

        let err = Fixture::load(&dir.path().join("lonely.is")).unwrap_err();

        assert!(matches!(err, FixtureError::MissingExpectation { ref name } if name == "lonely"));
    }

    #[test]
    fn test_discover_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b", "a"] {
            fs::write(dir.path().join(format!("{}.is", name)), "many: x\n").unwrap();
            fs::write(dir.path().join(format!("{}.err", name)), "boom\n").unwrap();
        }
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let fixtures = Fixture::discover(dir.path()).unwrap();

        let names: Vec<_> = fixtures.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
