//! Runs every schema under `fixtures/` through the full compiler.

use isc_tests::prelude::*;

#[test]
fn all_fixtures_pass() {
    let count = run_all(&fixtures_dir()).unwrap_or_else(|e| panic!("{}", e));
    assert!(count > 0, "no fixtures found in {}", fixtures_dir().display());
}

#[test]
fn fixtures_cover_both_outcomes() {
    let fixtures = Fixture::discover(&fixtures_dir()).unwrap();

    let errors = fixtures
        .iter()
        .filter(|f| matches!(f.expectation, Expectation::Error(_)))
        .count();

    assert!(errors > 0);
    assert!(errors < fixtures.len());
}

#[test]
fn shared_members_fixture_is_deterministic() {
    let path = fixtures_dir().join("shared_members.is");
    let fixture = Fixture::load(&path).unwrap();

    let first = isc_transpiler::compile(&fixture.source).unwrap();
    let second = isc_transpiler::compile(&fixture.source).unwrap();

    assert_eq!(first, second);
}
