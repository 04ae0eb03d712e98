//! Plain-text formatting for fixture failures.

use std::fmt::Write;

use rulecheck::Report;

use crate::failures::FailureState;
use crate::runner::{AssertionOutcome, AssertionResult};

/// Format a failed assertion with the report's conflicts as context.
pub fn format_failure(
    fixture_name: &str,
    result: &AssertionResult,
    state: FailureState,
    report: &Report,
) -> String {
    let mut output = String::new();
    let label = match state {
        FailureState::Regression => "FAIL",
        FailureState::Known => "KNOWN",
        FailureState::Pending => "PENDING",
    };

    let _ = writeln!(output, "{}: {} {}", label, fixture_name, result.reference);
    match &result.outcome {
        AssertionOutcome::Passed => {
            let _ = writeln!(output, "  (passed)");
        }
        AssertionOutcome::Missing { expected } => {
            let _ = writeln!(output, "  expected conflict not reported: {}", expected);
        }
        AssertionOutcome::Unexpected { found } => {
            let _ = writeln!(output, "  rejected conflict was reported: {}", found);
        }
        AssertionOutcome::CleanMismatch {
            expected,
            conflicts,
        } => {
            let _ = writeln!(
                output,
                "  expected clean = {}, found {} conflict(s)",
                expected, conflicts
            );
        }
    }

    if !report.conflicts.is_empty() && !result.outcome.passed() {
        let _ = writeln!(output, "  reported:");
        for conflict in &report.conflicts {
            let _ = writeln!(output, "    - {}", conflict.message);
        }
    }

    output
}

/// Format a one-fixture summary.
pub fn format_summary(
    fixture_name: &str,
    passed: usize,
    expected_failures: usize,
    regressions: usize,
) -> String {
    let status = if regressions > 0 { "FAIL" } else { "PASS" };
    format!(
        "{}: {} ({} passed, {} expected failures, {} regressions)\n",
        status, fixture_name, passed, expected_failures, regressions
    )
}

/// Format a ledger entry that no longer matches a failing assertion.
///
/// Without a reference the entry names a fixture that no longer exists.
pub fn format_stale(fixture_name: &str, reference: Option<&str>, reason: Option<&str>) -> String {
    let mut output = String::new();
    match reference {
        Some(reference) => {
            let _ = writeln!(
                output,
                "STALE: {} {} now passes; remove it from the ledger",
                fixture_name, reference
            );
        }
        None => {
            let _ = writeln!(
                output,
                "STALE: {} is listed in the ledger but no such fixture exists",
                fixture_name
            );
        }
    }
    if let Some(reason) = reason {
        let _ = writeln!(output, "  reason: {}", reason);
    }
    output
}
