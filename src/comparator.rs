//! Pairwise comparison of sources.
//!
//! The comparator is shared by two call sites that differ only in which
//! source pairs are eligible; that choice is a [`PairPolicy`].

use crate::classifier::ConflictClassifier;
use crate::conflict::ConflictRecord;
use crate::directive::Directive;
use crate::scope;
use crate::source::Source;

/// Decides whether two distinct sources should be compared at all.
pub trait PairPolicy {
    fn name(&self) -> &'static str;

    fn accepts(&self, a: &Source, b: &Source) -> bool;
}

/// Compares every pair except two per-file rules. Rule-vs-rule pairs are the
/// business of [`RuleScope`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossFormat;

impl PairPolicy for CrossFormat {
    fn name(&self) -> &'static str {
        "cross_format"
    }

    fn accepts(&self, a: &Source, b: &Source) -> bool {
        !(a.is_rule() && b.is_rule())
    }
}

/// Compares two per-file rules only when some file can fall under both.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleScope;

impl PairPolicy for RuleScope {
    fn name(&self) -> &'static str {
        "rule_scope"
    }

    fn accepts(&self, a: &Source, b: &Source) -> bool {
        a.is_rule() && b.is_rule() && scope::overlaps(a.scope(), b.scope())
    }
}

/// Runs the classifier over directive cross-products of eligible source pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceComparator {
    classifier: ConflictClassifier,
}

impl SourceComparator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_classifier(classifier: ConflictClassifier) -> Self {
        Self { classifier }
    }

    /// Compares every unordered pair of distinct sources the policy accepts.
    ///
    /// Output order follows source order, then directive order within each
    /// source.
    pub fn compare<P>(&self, sources: &[&Source], policy: &P) -> Vec<ConflictRecord>
    where
        P: PairPolicy + ?Sized,
    {
        let mut conflicts = Vec::new();

        for (i, a) in sources.iter().enumerate() {
            for b in &sources[i + 1..] {
                if !policy.accepts(a, b) {
                    continue;
                }
                conflicts.extend(self.compare_pair(a, b));
            }
        }

        conflicts
    }

    /// Conflicts between two sources' directives.
    pub fn compare_pair(&self, a: &Source, b: &Source) -> Vec<ConflictRecord> {
        let mut conflicts = Vec::new();
        for directive_a in a.directives() {
            for directive_b in b.directives() {
                if let Some(conflict) = self.check(a.id(), directive_a, b.id(), directive_b) {
                    conflicts.push(conflict);
                }
            }
        }
        conflicts
    }

    /// Conflicts between distinct directives of a single source.
    pub fn compare_within(&self, source: &Source) -> Vec<ConflictRecord> {
        let directives = source.directives();
        let mut conflicts = Vec::new();

        for (i, directive_a) in directives.iter().enumerate() {
            for directive_b in &directives[i + 1..] {
                if let Some(conflict) =
                    self.check(source.id(), directive_a, source.id(), directive_b)
                {
                    conflicts.push(conflict);
                }
            }
        }

        conflicts
    }

    fn check(
        &self,
        id_a: &str,
        a: &Directive,
        id_b: &str,
        b: &Directive,
    ) -> Option<ConflictRecord> {
        let kind = self.classifier.classify(a, b)?;
        Some(ConflictRecord::new(id_a, a, id_b, b, kind))
    }
}
