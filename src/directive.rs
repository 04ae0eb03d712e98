//! Extracted policy statements.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::normalize::normalize_subject;

/// The polarity of a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// "always use X", "must add X"
    Require,
    /// "never use X", "don't add X"
    Forbid,
    /// "avoid X", "disable X"
    Avoid,
    /// "use X", "enable X"
    Use,
    /// "prefer X (over Y)"
    Prefer,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Require => "require",
            Action::Forbid => "forbid",
            Action::Avoid => "avoid",
            Action::Use => "use",
            Action::Prefer => "prefer",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One policy statement found in a source body.
///
/// A `Directive` always carries a normalized subject: construction through
/// [`Directive::from_raw`] returns `None` when the subject does not survive
/// normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Directive {
    pub action: Action,
    /// Normalized subject (lowercase, 2..=60 chars).
    pub subject: String,
    /// The disfavored subject of a comparative ("prefer X over Y").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub over: Option<String>,
    /// Matched by a style template (quotes, indentation, naming, semicolons).
    #[serde(default)]
    pub style: bool,
    /// 1-based line number in the source body.
    pub line: usize,
    /// The raw source line, trimmed.
    pub text: String,
}

impl Directive {
    /// Builds a directive from an unnormalized subject.
    pub fn from_raw(
        action: Action,
        raw_subject: &str,
        line: usize,
        text: impl Into<String>,
    ) -> Option<Self> {
        let subject = normalize_subject(raw_subject)?;
        Some(Self {
            action,
            subject,
            over: None,
            style: false,
            line,
            text: text.into(),
        })
    }

    pub fn with_style(mut self, style: bool) -> Self {
        self.style = style;
        self
    }

    /// Attaches the losing side of a comparative. Dropped if it does not normalize.
    pub fn with_over(mut self, raw_over: &str) -> Self {
        self.over = normalize_subject(raw_over);
        self
    }

    /// "action subject", the form used in messages and dedup keys.
    pub fn render(&self) -> String {
        format!("{} {}", self.action, self.subject)
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.action, self.subject)
    }
}
