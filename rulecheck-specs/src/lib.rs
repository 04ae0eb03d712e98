//! Fixture-driven testing infrastructure for rulecheck.
//!
//! Test cases are declared in TOML fixture files: a set of sources plus the
//! conflicts the analysis must report (`expect`), must not report (`reject`),
//! and whether the report is `clean`.
//!
//! ## Modules
//!
//! - [`fixture`] - Fixture schema and parsing
//! - [`loader`] - Fixture file loading
//! - [`runner`] - Runs fixtures through the analyzer and checks assertions
//! - [`failures`] - Expected failures tracking via TOML
//! - [`formatter`] - Plain-text failure and summary formatting
//! - [`errors`] - Error types for the fixture harness

pub mod errors;
pub mod failures;
pub mod fixture;
pub mod formatter;
pub mod loader;
pub mod runner;

pub use errors::{SpecError, SpecResult};
pub use failures::{ExpectedFailures, FailureEntry, FailureState, HarnessResult};
pub use fixture::{parse_fixture, ConflictFixture, PairSpec, SourceSpec};
pub use loader::{load_all_fixtures, load_fixture};
pub use runner::{
    check_fixture_assertions, run_directory, run_fixture, AssertionOutcome, AssertionResult,
    FixtureRun, HarnessOutput,
};
