//! Conflict records and their deduplication.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::classifier::ConflictKind;
use crate::directive::Directive;

/// How serious a reported conflict is.
///
/// Opposed directives are always reported as [`Severity::Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A directive as it appears in a conflict report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectiveRef {
    /// Rendered "action subject".
    pub text: String,
    pub line: usize,
    /// The raw source line the directive came from.
    pub raw: String,
}

impl From<&Directive> for DirectiveRef {
    fn from(directive: &Directive) -> Self {
        Self {
            text: directive.render(),
            line: directive.line,
            raw: directive.text.clone(),
        }
    }
}

/// Two directives from (usually) two sources that give opposing guidance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictRecord {
    pub severity: Severity,
    pub kind: ConflictKind,
    pub source_a: String,
    pub source_b: String,
    pub directive_a: DirectiveRef,
    pub directive_b: DirectiveRef,
    pub message: String,
    pub hint: String,
}

impl ConflictRecord {
    pub fn new(
        source_a: &str,
        directive_a: &Directive,
        source_b: &str,
        directive_b: &Directive,
        kind: ConflictKind,
    ) -> Self {
        let directive_a = DirectiveRef::from(directive_a);
        let directive_b = DirectiveRef::from(directive_b);
        let message = format!(
            "{} says '{}' but {} says '{}'",
            source_a, directive_a.text, source_b, directive_b.text
        );

        Self {
            severity: Severity::Error,
            kind,
            source_a: source_a.to_string(),
            source_b: source_b.to_string(),
            directive_a,
            directive_b,
            message,
            hint: kind.hint().to_string(),
        }
    }

    /// Identity of the conflict regardless of which side came first:
    /// `(source_a, source_b, text_a, text_b)` sorted and joined with `|`.
    pub fn dedup_key(&self) -> String {
        let mut parts = [
            self.source_a.as_str(),
            self.source_b.as_str(),
            self.directive_a.text.as_str(),
            self.directive_b.text.as_str(),
        ];
        parts.sort_unstable();
        parts.join("|")
    }

    /// The report group this conflict belongs to, `"A vs B"` with the ids sorted.
    pub fn group_key(&self) -> String {
        let (first, second) = if self.source_a <= self.source_b {
            (&self.source_a, &self.source_b)
        } else {
            (&self.source_b, &self.source_a)
        };
        format!("{first} vs {second}")
    }
}

/// Drops repeated conflicts, keeping the first occurrence of each key.
pub fn dedup(conflicts: Vec<ConflictRecord>) -> Vec<ConflictRecord> {
    let mut seen = HashSet::new();
    conflicts
        .into_iter()
        .filter(|conflict| seen.insert(conflict.dedup_key()))
        .collect()
}
