//! Opposition rules for pairs of directives.

use serde::{Deserialize, Serialize};

use crate::directive::{Action, Directive};
use crate::similarity::SimilarityMatcher;

/// Why two directives were judged to conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// Opposite actions on the same subject ("use X" vs "never use X").
    OpposedActions,
    /// Two style directives with the same action but different values.
    StyleValue(StyleAxis),
}

/// The style dimension two directives disagree on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleAxis {
    QuoteStyle,
    IndentCharacter,
    IndentWidth,
}

impl ConflictKind {
    /// A short remediation hint for reports.
    pub fn hint(&self) -> &'static str {
        match self {
            ConflictKind::OpposedActions => {
                "Decide which guidance wins, then remove the other directive or narrow its scope."
            }
            ConflictKind::StyleValue(StyleAxis::QuoteStyle) => {
                "Pick one quote style and state it in a single place."
            }
            ConflictKind::StyleValue(StyleAxis::IndentCharacter) => {
                "Pick either tabs or spaces for indentation and state it in a single place."
            }
            ConflictKind::StyleValue(StyleAxis::IndentWidth) => {
                "Pick one indentation width and state it in a single place."
            }
        }
    }
}

/// Actions that `action` opposes, one direction only.
///
/// The table is not symmetric (`avoid` does not list `prefer`), so callers
/// check both directions.
fn opposed_actions(action: Action) -> &'static [Action] {
    match action {
        Action::Require | Action::Use | Action::Prefer => &[Action::Forbid, Action::Avoid],
        Action::Forbid => &[Action::Require, Action::Use, Action::Prefer],
        Action::Avoid => &[Action::Require, Action::Use],
    }
}

/// Whether the two actions are opposed in either direction.
pub fn actions_oppose(a: Action, b: Action) -> bool {
    opposed_actions(a).contains(&b) || opposed_actions(b).contains(&a)
}

/// Judges whether two directives contradict each other.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConflictClassifier {
    matcher: SimilarityMatcher,
}

impl ConflictClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conflicts(&self, a: &Directive, b: &Directive) -> bool {
        self.classify(a, b).is_some()
    }

    /// Returns the reason two directives conflict, or `None`.
    ///
    /// Subjects must be similar first. Then either the actions oppose, or
    /// both are style directives with the same action that disagree on the
    /// value (quote character, indent character, indent width).
    pub fn classify(&self, a: &Directive, b: &Directive) -> Option<ConflictKind> {
        if !self.matcher.similar(&a.subject, &b.subject) {
            return None;
        }

        if actions_oppose(a.action, b.action) {
            return Some(ConflictKind::OpposedActions);
        }

        if a.style && b.style && a.action == b.action {
            return style_value_conflict(&a.subject, &b.subject).map(ConflictKind::StyleValue);
        }

        None
    }
}

fn mentions_pair(a: &str, b: &str, left: &str, right: &str) -> bool {
    (a.contains(left) && b.contains(right)) || (a.contains(right) && b.contains(left))
}

fn style_value_conflict(a: &str, b: &str) -> Option<StyleAxis> {
    if mentions_pair(a, b, "single", "double") {
        return Some(StyleAxis::QuoteStyle);
    }
    if mentions_pair(a, b, "tabs", "spaces") {
        return Some(StyleAxis::IndentCharacter);
    }
    match (indent_width(a), indent_width(b)) {
        (Some(width_a), Some(width_b)) if width_a != width_b => Some(StyleAxis::IndentWidth),
        _ => None,
    }
}

/// First run of digits in a subject, e.g. `4` in "4 spaces indentation".
fn indent_width(subject: &str) -> Option<u32> {
    let start = subject.find(|c: char| c.is_ascii_digit())?;
    let digits: String = subject[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
