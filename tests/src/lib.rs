//! Fixture-driven integration tests for the interface schema compiler.
//!
//! Fixtures live in `fixtures/` as `<name>.is` schemas with a `<name>.facts`
//! or `<name>.err` expectation next to them.

pub mod error;
pub mod fixture;
pub mod runner;

pub mod prelude {
    pub use crate::error::{FixtureError, FixtureResult};
    pub use crate::fixture::{fixtures_dir, Expectation, Fixture};
    pub use crate::runner::run_all;
}
