//! Grouped, summarized conflict reports.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::conflict::ConflictRecord;
use crate::source::Source;

/// The final result of an analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// `true` iff `conflicts` is empty.
    pub clean: bool,
    pub conflicts: Vec<ConflictRecord>,
    /// Conflicts keyed by `"A vs B"` (ids sorted).
    pub groups: BTreeMap<String, Vec<ConflictRecord>>,
    pub summary: String,
    /// Every analyzed source id, sorted.
    pub files_covered: Vec<String>,
}

impl Report {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.summary)?;
        for (group, conflicts) in &self.groups {
            writeln!(f)?;
            writeln!(f, "{group}")?;
            for conflict in conflicts {
                writeln!(f, "  [{:?}] {}", conflict.severity, conflict.message)?;
                writeln!(
                    f,
                    "    {}:{}: {}",
                    conflict.source_a, conflict.directive_a.line, conflict.directive_a.raw
                )?;
                writeln!(
                    f,
                    "    {}:{}: {}",
                    conflict.source_b, conflict.directive_b.line, conflict.directive_b.raw
                )?;
                writeln!(f, "    hint: {}", conflict.hint)?;
            }
        }
        Ok(())
    }
}

/// Builds a [`Report`] from an already deduplicated conflict list.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    files: Vec<String>,
    conflicts: Vec<ConflictRecord>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sources<'a>(mut self, sources: impl IntoIterator<Item = &'a Source>) -> Self {
        self.files
            .extend(sources.into_iter().map(|source| source.id().to_string()));
        self
    }

    pub fn files<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn conflicts(mut self, conflicts: Vec<ConflictRecord>) -> Self {
        self.conflicts.extend(conflicts);
        self
    }

    pub fn build(self) -> Report {
        let mut files_covered = self.files;
        files_covered.sort();
        files_covered.dedup();

        let mut groups: BTreeMap<String, Vec<ConflictRecord>> = BTreeMap::new();
        for conflict in &self.conflicts {
            groups
                .entry(conflict.group_key())
                .or_default()
                .push(conflict.clone());
        }

        let summary = summarize(self.conflicts.len(), files_covered.len(), groups.len());

        Report {
            clean: self.conflicts.is_empty(),
            conflicts: self.conflicts,
            groups,
            summary,
            files_covered,
        }
    }
}

fn summarize(conflicts: usize, files: usize, groups: usize) -> String {
    if conflicts == 0 {
        format!("No conflicts across {files} files")
    } else {
        format!("{conflicts} conflict(s) across {files} files in {groups} group(s)")
    }
}
