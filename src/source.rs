//! Configuration documents under analysis.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::directive::Directive;
use crate::extractor::DirectiveExtractor;

/// The category a source document belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// A per-file rule document (`.cursor/rules/*.mdc`, `.claude/rules/*.md`).
    Rule,
    /// Project-wide instructions (`CLAUDE.md`, `AGENTS.md`).
    Instructions,
    /// A legacy single-file rules document (`.cursorrules`).
    LegacyRules,
    /// An agent persona file.
    Agent,
    /// Synthesized from hook configuration.
    Hook,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Rule => "rule",
            SourceKind::Instructions => "instructions",
            SourceKind::LegacyRules => "legacy_rules",
            SourceKind::Agent => "agent",
            SourceKind::Hook => "hook",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a per-file rule applies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scope {
    #[serde(default)]
    pub globs: Vec<String>,
    #[serde(default)]
    pub always_apply: bool,
}

impl Scope {
    pub fn new(globs: Vec<String>, always_apply: bool) -> Self {
        Self {
            globs,
            always_apply,
        }
    }

    pub fn always() -> Self {
        Self::new(Vec::new(), true)
    }

    pub fn globs<I, S>(globs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(globs.into_iter().map(Into::into).collect(), false)
    }
}

/// One configuration document and the directives extracted from it.
///
/// Directives are computed once at construction; a `Source` is never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Source {
    id: String,
    kind: SourceKind,
    body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<Scope>,
    directives: Vec<Directive>,
}

impl Source {
    /// Builds a source from a body whose metadata block is already stripped.
    pub fn new(id: impl Into<String>, kind: SourceKind, body: impl Into<String>) -> Self {
        Self::with_extractor(id, kind, body, None, &DirectiveExtractor::new())
    }

    /// Builds a per-file rule source. A missing scope means the rule's
    /// metadata was absent or unreadable.
    pub fn rule(id: impl Into<String>, body: impl Into<String>, scope: Option<Scope>) -> Self {
        Self::with_extractor(id, SourceKind::Rule, body, scope, &DirectiveExtractor::new())
    }

    /// Builds a source with an explicit extractor. `scope` is kept only for
    /// [`SourceKind::Rule`].
    pub fn with_extractor(
        id: impl Into<String>,
        kind: SourceKind,
        body: impl Into<String>,
        scope: Option<Scope>,
        extractor: &DirectiveExtractor,
    ) -> Self {
        let body = body.into();
        let directives = extractor.extract(&body);
        Self {
            id: id.into(),
            kind,
            body,
            scope: scope.filter(|_| kind == SourceKind::Rule),
            directives,
        }
    }

    /// A hook-derived source carrying synthesized directives and no body.
    pub fn synthetic(id: impl Into<String>, directives: Vec<Directive>) -> Self {
        Self {
            id: id.into(),
            kind: SourceKind::Hook,
            body: String::new(),
            scope: None,
            directives,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn scope(&self) -> Option<&Scope> {
        self.scope.as_ref()
    }

    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    pub fn is_rule(&self) -> bool {
        self.kind == SourceKind::Rule
    }
}
