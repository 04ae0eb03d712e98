//! Expected failures tracking via TOML file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{SpecError, SpecResult};

/// Conventional ledger file name inside a fixture directory.
pub const LEDGER_FILE: &str = "expected-failures.toml";

/// Loaded expected failures configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpectedFailures {
    /// Known failures (heuristic limitations, won't fix soon).
    #[serde(default)]
    pub known: Vec<FailureEntry>,
    /// Pending failures (awaiting fix).
    #[serde(default)]
    pub pending: Vec<FailureEntry>,
}

/// A single expected failure entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureEntry {
    /// Fixture file name, relative to the fixture directory.
    pub fixture: String,
    /// Assertion reference (e.g., "reject[0]", "clean").
    pub assertion: String,
    /// Human-readable reason.
    #[serde(default)]
    pub reason: Option<String>,
    /// Date added (YYYY-MM-DD).
    #[serde(default)]
    pub added: Option<String>,
    /// Related issue URL.
    #[serde(default)]
    pub issue: Option<String>,
}

/// Failure lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureState {
    /// Known limitation, won't fix soon.
    Known,
    /// Awaiting fix, not blocking.
    Pending,
    /// Expected to pass - failure is a regression.
    Regression,
}

impl ExpectedFailures {
    /// Load from a TOML file. A missing file means no expected failures.
    pub fn load(path: &Path) -> SpecResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| SpecError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| SpecError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Check if a failure is expected.
    pub fn is_expected(&self, fixture: &str, assertion_ref: &str) -> FailureState {
        if self.find(&self.known, fixture, assertion_ref).is_some() {
            return FailureState::Known;
        }
        if self.find(&self.pending, fixture, assertion_ref).is_some() {
            return FailureState::Pending;
        }
        FailureState::Regression
    }

    /// Get entry for a specific failure (if expected).
    pub fn get_entry(&self, fixture: &str, assertion_ref: &str) -> Option<&FailureEntry> {
        self.find(&self.known, fixture, assertion_ref)
            .or_else(|| self.find(&self.pending, fixture, assertion_ref))
    }

    /// Get all expected failure fixtures.
    pub fn all_fixtures(&self) -> Vec<&str> {
        let mut fixtures: Vec<_> = self
            .known
            .iter()
            .chain(self.pending.iter())
            .map(|e| e.fixture.as_str())
            .collect();
        fixtures.sort();
        fixtures.dedup();
        fixtures
    }

    fn find<'a>(
        &self,
        entries: &'a [FailureEntry],
        fixture: &str,
        assertion_ref: &str,
    ) -> Option<&'a FailureEntry> {
        entries
            .iter()
            .find(|e| e.fixture == fixture && e.assertion == assertion_ref)
    }
}

/// Result of running the harness.
#[derive(Debug, Clone, Default)]
pub struct HarnessResult {
    /// Total assertions checked.
    pub total: usize,
    /// Passed assertions.
    pub passed: usize,
    /// Expected failures (known + pending).
    pub expected_failures: usize,
    /// Regressions (unexpected failures).
    pub regressions: usize,
    /// Ledger entries that no longer describe a failing assertion.
    pub stale: usize,
}

impl HarnessResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all tests passed (no regressions).
    pub fn success(&self) -> bool {
        self.regressions == 0
    }

    /// Record a passed assertion.
    pub fn record_pass(&mut self) {
        self.total += 1;
        self.passed += 1;
    }

    /// Record a ledger entry that no longer matches a failure.
    pub fn record_stale(&mut self) {
        self.stale += 1;
    }

    /// Record a failed assertion with its state.
    pub fn record_failure(&mut self, state: FailureState) {
        self.total += 1;
        match state {
            FailureState::Known | FailureState::Pending => {
                self.expected_failures += 1;
            }
            FailureState::Regression => {
                self.regressions += 1;
            }
        }
    }
}
