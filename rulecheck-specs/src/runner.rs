//! Runs fixtures through the analyzer and checks their assertions.

use std::path::Path;

use rulecheck::{Analyzer, ConflictRecord, Report};
use tracing::debug;

use crate::errors::SpecResult;
use crate::failures::{ExpectedFailures, FailureState, HarnessResult, LEDGER_FILE};
use crate::fixture::{ConflictFixture, PairSpec};
use crate::formatter::{format_failure, format_stale, format_summary};
use crate::loader::load_all_fixtures;

/// The outcome of one fixture assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionOutcome {
    Passed,
    /// An expected conflict was not reported.
    Missing { expected: String },
    /// A rejected pair was reported anyway.
    Unexpected { found: String },
    /// The report's `clean` flag disagreed with the fixture.
    CleanMismatch { expected: bool, conflicts: usize },
}

impl AssertionOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, AssertionOutcome::Passed)
    }
}

/// One checked assertion, referenced as `expect[0]`, `reject[1]` or `clean`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionResult {
    pub reference: String,
    pub outcome: AssertionOutcome,
}

/// The report produced for a fixture and the checked assertions.
#[derive(Debug, Clone)]
pub struct FixtureRun {
    pub report: Report,
    pub results: Vec<AssertionResult>,
}

impl FixtureRun {
    pub fn failures(&self) -> impl Iterator<Item = &AssertionResult> {
        self.results.iter().filter(|result| !result.outcome.passed())
    }
}

/// Analyzes a fixture's sources and checks every assertion it makes.
pub fn run_fixture(name: &str, fixture: &ConflictFixture) -> SpecResult<FixtureRun> {
    let sources = fixture.build_sources(name)?;
    let report = Analyzer::new(fixture.config.clone()).analyze(&sources);
    let results = check_fixture_assertions(fixture, &report);

    debug!(
        fixture = name,
        conflicts = report.conflicts.len(),
        failed = results.iter().filter(|r| !r.outcome.passed()).count(),
        "ran fixture"
    );
    Ok(FixtureRun { report, results })
}

/// Checks a fixture's assertions against a report.
pub fn check_fixture_assertions(fixture: &ConflictFixture, report: &Report) -> Vec<AssertionResult> {
    let mut results = Vec::new();

    for (index, pair) in fixture.expect.iter().enumerate() {
        let outcome = match find(pair, &report.conflicts) {
            Some(_) => AssertionOutcome::Passed,
            None => AssertionOutcome::Missing {
                expected: pair.to_string(),
            },
        };
        results.push(AssertionResult {
            reference: format!("expect[{index}]"),
            outcome,
        });
    }

    for (index, pair) in fixture.reject.iter().enumerate() {
        let outcome = match find(pair, &report.conflicts) {
            Some(conflict) => AssertionOutcome::Unexpected {
                found: conflict.message.clone(),
            },
            None => AssertionOutcome::Passed,
        };
        results.push(AssertionResult {
            reference: format!("reject[{index}]"),
            outcome,
        });
    }

    if let Some(expected) = fixture.clean {
        let outcome = if report.clean == expected {
            AssertionOutcome::Passed
        } else {
            AssertionOutcome::CleanMismatch {
                expected,
                conflicts: report.conflicts.len(),
            }
        };
        results.push(AssertionResult {
            reference: "clean".to_string(),
            outcome,
        });
    }

    results
}

/// Totals and rendered output of a harness run over a fixture directory.
#[derive(Debug, Clone, Default)]
pub struct HarnessOutput {
    pub result: HarnessResult,
    pub output: String,
}

/// Runs every fixture in `dir` against the directory's expected-failures ledger.
///
/// Ledger entries whose assertion now passes, or whose fixture is gone, are
/// reported as stale. They do not count as regressions.
pub fn run_directory(dir: &Path) -> SpecResult<HarnessOutput> {
    let ledger = ExpectedFailures::load(&dir.join(LEDGER_FILE))?;
    let fixtures = load_all_fixtures(dir)?;
    let mut harness = HarnessOutput::default();

    for listed in ledger.all_fixtures() {
        if !fixtures.iter().any(|(name, _)| name == listed) {
            harness.result.record_stale();
            harness.output.push_str(&format_stale(listed, None, None));
        }
    }

    for (name, fixture) in fixtures {
        let run = run_fixture(&name, &fixture)?;
        let mut fixture_result = HarnessResult::new();

        for result in &run.results {
            if result.outcome.passed() {
                fixture_result.record_pass();
                harness.result.record_pass();
                if let Some(entry) = ledger.get_entry(&name, &result.reference) {
                    harness.result.record_stale();
                    harness.output.push_str(&format_stale(
                        &name,
                        Some(result.reference.as_str()),
                        entry.reason.as_deref(),
                    ));
                }
                continue;
            }

            let state = ledger.is_expected(&name, &result.reference);
            fixture_result.record_failure(state);
            harness.result.record_failure(state);
            if state == FailureState::Regression {
                harness
                    .output
                    .push_str(&format_failure(&name, result, state, &run.report));
            }
        }

        harness.output.push_str(&format_summary(
            &name,
            fixture_result.passed,
            fixture_result.expected_failures,
            fixture_result.regressions,
        ));
    }

    Ok(harness)
}

fn find<'r>(pair: &PairSpec, conflicts: &'r [ConflictRecord]) -> Option<&'r ConflictRecord> {
    conflicts.iter().find(|conflict| pair.matches(conflict))
}
