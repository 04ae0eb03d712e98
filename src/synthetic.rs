//! Directives synthesized from hook configuration.
//!
//! Hooks are not prose, but a hook that runs `prettier --write` on every edit
//! is as strong a statement as "always format with prettier". A
//! [`HookSynthesizer`] turns parsed hook configuration into such directives.

use std::collections::HashSet;

use serde_json::Value;

use crate::directive::{Action, Directive};
use crate::source::Source;

/// Tool names recognized in hook commands, with the subject they imply.
pub const KNOWN_TOOLS: &[(&str, &str)] = &[
    ("prettier", "prettier formatting"),
    ("eslint", "eslint linting"),
    ("biome", "biome formatting"),
    ("black", "black formatting"),
    ("ruff", "ruff linting"),
    ("isort", "isort import sorting"),
    ("rustfmt", "rustfmt formatting"),
    ("clippy", "clippy linting"),
    ("gofmt", "gofmt formatting"),
    ("golangci-lint", "golangci-lint linting"),
    ("rubocop", "rubocop linting"),
    ("stylelint", "stylelint linting"),
];

/// Converts hook configuration into directives.
pub trait HookSynthesizer {
    fn synthesize(&self, hooks: &Value) -> Vec<Directive>;
}

/// Emits `require <tool> ...` for every known tool named in a hook command.
#[derive(Debug, Clone, Default)]
pub struct ToolNameSynthesizer {
    extra_tools: Vec<String>,
}

impl ToolNameSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also recognizes these tool names; the subject is the lowercased name.
    pub fn with_extra_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_tools
            .extend(tools.into_iter().map(|tool| tool.into().to_lowercase()));
        self
    }

    fn subjects_for(&self, command: &str) -> Vec<String> {
        let lower = command.to_lowercase();
        let words: HashSet<&str> = lower
            .split(|c: char| !(c.is_alphanumeric() || c == '-' || c == '_'))
            .filter(|word| !word.is_empty())
            .collect();

        let known = KNOWN_TOOLS
            .iter()
            .filter(|(tool, _)| words.contains(tool))
            .map(|(_, subject)| subject.to_string());
        let extra = self
            .extra_tools
            .iter()
            .filter(|tool| words.contains(tool.as_str()))
            .cloned();

        known.chain(extra).collect()
    }
}

impl HookSynthesizer for ToolNameSynthesizer {
    fn synthesize(&self, hooks: &Value) -> Vec<Directive> {
        let mut commands = Vec::new();
        collect_commands(hooks, &mut commands);

        let mut seen = HashSet::new();
        let mut directives = Vec::new();
        for (index, command) in commands.iter().enumerate() {
            for subject in self.subjects_for(command) {
                if !seen.insert(subject.clone()) {
                    continue;
                }
                if let Some(directive) =
                    Directive::from_raw(Action::Require, &subject, index + 1, *command)
                {
                    directives.push(directive);
                }
            }
        }
        directives
    }
}

/// Every string under a `"command"` key, depth first in document order.
///
/// Object keys keep their document order through serde_json's
/// `preserve_order` feature, so a directive's line is the position of its
/// command as written.
fn collect_commands<'v>(value: &'v Value, out: &mut Vec<&'v str>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                match (key.as_str(), child) {
                    ("command", Value::String(command)) => out.push(command),
                    _ => collect_commands(child, out),
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_commands(item, out);
            }
        }
        _ => {}
    }
}

/// Builds a hook source from a settings document's `hooks` value.
pub fn synthesize_source(
    id: impl Into<String>,
    hooks: &Value,
    synthesizer: &dyn HookSynthesizer,
) -> Source {
    Source::synthetic(id, synthesizer.synthesize(hooks))
}
