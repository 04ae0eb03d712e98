//! Declarative conflict fixtures.
//!
//! A fixture is a TOML file describing a set of sources and what the analysis
//! must (or must not) report about them:
//!
//! ```toml
//! title = "Semicolons across formats"
//!
//! [[sources]]
//! id = "CLAUDE.md"
//! kind = "instructions"
//! body = "Always use semicolons."
//!
//! [[sources]]
//! id = ".cursorrules"
//! kind = "legacy_rules"
//! body = "Never use semicolons."
//!
//! [[expect]]
//! a = "require semicolons"
//! b = "forbid semicolons"
//! ```

use rulecheck::synthetic::synthesize_source;
use rulecheck::{AnalysisConfig, ConflictRecord, Scope, Source, SourceKind};
use serde::{Deserialize, Serialize};

use crate::errors::{SpecError, SpecResult};

/// A parsed fixture file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConflictFixture {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub config: AnalysisConfig,
    #[serde(default)]
    pub sources: Vec<SourceSpec>,
    /// Conflicts that must be reported.
    #[serde(default)]
    pub expect: Vec<PairSpec>,
    /// Directive pairs that must not be reported.
    #[serde(default)]
    pub reject: Vec<PairSpec>,
    /// When set, the report's `clean` flag must equal this.
    #[serde(default)]
    pub clean: Option<bool>,
}

/// One source document in a fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSpec {
    pub id: String,
    pub kind: SourceKind,
    #[serde(default)]
    pub body: String,
    /// Rule scope; absent means the rule applies everywhere.
    #[serde(default)]
    pub scope: Option<Scope>,
    /// Raw JSON `hooks` value, for `kind = "hook"`.
    #[serde(default)]
    pub hooks: Option<String>,
}

/// A conflict between two rendered directives, e.g. `"use tabs indentation"`.
///
/// The pair is unordered. Source ids, when given, must sit on the same side
/// as their directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairSpec {
    pub a: String,
    pub b: String,
    #[serde(default)]
    pub source_a: Option<String>,
    #[serde(default)]
    pub source_b: Option<String>,
}

impl PairSpec {
    pub fn matches(&self, conflict: &ConflictRecord) -> bool {
        let (a, b) = (&conflict.directive_a, &conflict.directive_b);
        let forward = side_matches(&self.a, &self.source_a, &a.text, &conflict.source_a)
            && side_matches(&self.b, &self.source_b, &b.text, &conflict.source_b);
        let backward = side_matches(&self.a, &self.source_a, &b.text, &conflict.source_b)
            && side_matches(&self.b, &self.source_b, &a.text, &conflict.source_a);
        forward || backward
    }
}

fn side_matches(
    directive: &str,
    source: &Option<String>,
    found_directive: &str,
    found_source: &str,
) -> bool {
    directive == found_directive && source.as_deref().map_or(true, |source| source == found_source)
}

impl std::fmt::Display for PairSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.source_a, &self.source_b) {
            (Some(source_a), Some(source_b)) => write!(
                f,
                "{}: '{}' vs {}: '{}'",
                source_a, self.a, source_b, self.b
            ),
            _ => write!(f, "'{}' vs '{}'", self.a, self.b),
        }
    }
}

/// Parses fixture text. `path` is used for error messages only.
pub fn parse_fixture(path: &str, text: &str) -> SpecResult<ConflictFixture> {
    toml::from_str(text).map_err(|e| SpecError::Parse {
        path: path.to_string(),
        message: e.to_string(),
    })
}

impl ConflictFixture {
    /// Builds the engine sources this fixture describes.
    pub fn build_sources(&self, path: &str) -> SpecResult<Vec<Source>> {
        let synthesizer = self.config.hook_synthesizer();

        self.sources
            .iter()
            .map(|entry| match (entry.kind, &entry.hooks) {
                (SourceKind::Hook, Some(hooks)) => {
                    let hooks: serde_json::Value =
                        serde_json::from_str(hooks).map_err(|e| SpecError::Parse {
                            path: format!("{} ({})", path, entry.id),
                            message: e.to_string(),
                        })?;
                    Ok(synthesize_source(&entry.id, &hooks, &synthesizer))
                }
                (SourceKind::Hook, None) => Err(SpecError::Invalid {
                    path: path.to_string(),
                    message: format!("hook source '{}' has no hooks", entry.id),
                }),
                (SourceKind::Rule, _) => Ok(Source::rule(&entry.id, &entry.body, entry.scope.clone())),
                (kind, _) => Ok(Source::new(&entry.id, kind, &entry.body)),
            })
            .collect()
    }
}
