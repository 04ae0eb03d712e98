//! Top-level analysis entry point.

use tracing::debug;

use crate::comparator::{CrossFormat, PairPolicy, RuleScope, SourceComparator};
use crate::config::AnalysisConfig;
use crate::conflict::{self, ConflictRecord};
use crate::report::{Report, ReportBuilder};
use crate::source::Source;

/// Runs both comparators over a set of sources and builds the report.
///
/// Analysis is pure: the same sources and config always yield the same report.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalysisConfig,
    comparator: SourceComparator,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            comparator: SourceComparator::new(),
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn analyze(&self, sources: &[Source]) -> Report {
        let sources: Vec<&Source> = sources
            .iter()
            .filter(|source| !self.config.is_ignored(source.id()))
            .collect();

        let mut raw = Vec::new();
        raw.extend(self.run_policy(&sources, &RuleScope));
        raw.extend(self.run_policy(&sources, &CrossFormat));

        if self.config.detect_self_conflicts {
            for source in &sources {
                raw.extend(self.comparator.compare_within(source));
            }
        }

        let raw_count = raw.len();
        let conflicts = conflict::dedup(raw);
        debug!(
            sources = sources.len(),
            raw = raw_count,
            conflicts = conflicts.len(),
            "analysis complete"
        );

        ReportBuilder::new()
            .sources(sources.iter().copied())
            .conflicts(conflicts)
            .build()
    }

    fn run_policy<P: PairPolicy>(&self, sources: &[&Source], policy: &P) -> Vec<ConflictRecord> {
        let conflicts = self.comparator.compare(sources, policy);
        debug!(
            policy = policy.name(),
            conflicts = conflicts.len(),
            "compared source pairs"
        );
        conflicts
    }
}

/// Analyzes sources with the default configuration.
pub fn analyze(sources: &[Source]) -> Report {
    Analyzer::default().analyze(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceKind;

    #[test]
    fn test_ignored_sources_are_dropped() {
        let sources = vec![
            Source::new("CLAUDE.md", SourceKind::Instructions, "Always use semicolons."),
            Source::new(".cursorrules", SourceKind::LegacyRules, "Never use semicolons."),
        ];
        assert!(!analyze(&sources).clean);

        let config = AnalysisConfig {
            ignore: vec![".cursorrules".into()],
            ..AnalysisConfig::default()
        };
        let report = Analyzer::new(config).analyze(&sources);
        assert!(report.clean);
        assert_eq!(report.files_covered, vec!["CLAUDE.md"]);
    }

    #[test]
    fn test_self_conflicts_are_opt_in() {
        let sources = vec![Source::new(
            "CLAUDE.md",
            SourceKind::Instructions,
            "Always use semicolons.\nNever use semicolons.",
        )];
        assert!(analyze(&sources).clean);

        let config = AnalysisConfig {
            detect_self_conflicts: true,
            ..AnalysisConfig::default()
        };
        let report = Analyzer::new(config).analyze(&sources);
        assert_eq!(report.conflicts.len(), 1);
        assert_eq!(report.conflicts[0].group_key(), "CLAUDE.md vs CLAUDE.md");
    }
}
