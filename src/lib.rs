//! Contradiction detection for AI coding assistant rule documents.
//!
//! Projects often carry several overlapping instruction documents: per-file
//! rules, a `CLAUDE.md`, a legacy `.cursorrules`, agent personas and hook
//! configuration. This crate finds statements across them that give opposing
//! guidance, such as one document demanding semicolons while another forbids
//! them.
//!
//! ## Pipeline
//!
//! - [`DirectiveExtractor`] - Scans document bodies with a fixed pattern bank
//! - [`normalize_subject`] - Canonicalizes directive subjects
//! - [`SimilarityMatcher`] - Decides whether two subjects denote one concept
//! - [`ConflictClassifier`] - Decides whether two directives are opposed
//! - [`SourceComparator`] - Compares eligible source pairs ([`PairPolicy`])
//! - [`dedup`] - Collapses repeated conflicts
//! - [`ReportBuilder`] - Groups and summarizes the result
//!
//! [`Analyzer`] runs all of the above.
//!
//! ## Example
//!
//! ```
//! use rulecheck::{analyze, Source, SourceKind};
//!
//! let sources = vec![
//!     Source::new("CLAUDE.md", SourceKind::Instructions, "Always use semicolons."),
//!     Source::new(".cursorrules", SourceKind::LegacyRules, "Never use semicolons."),
//! ];
//! let report = analyze(&sources);
//! assert!(!report.clean);
//! assert_eq!(report.summary, "1 conflict(s) across 2 files in 1 group(s)");
//! ```

mod analyzer;
mod classifier;
mod comparator;
mod config;
mod conflict;
mod directive;
mod error;
mod extractor;
mod normalize;
mod report;
mod similarity;
mod source;

pub mod patterns;
pub mod scope;
pub mod synthetic;

pub use analyzer::{analyze, Analyzer};
pub use classifier::{actions_oppose, ConflictClassifier, ConflictKind, StyleAxis};
pub use comparator::{CrossFormat, PairPolicy, RuleScope, SourceComparator};
pub use config::{AnalysisConfig, CONFIG_FILE};
pub use conflict::{dedup, ConflictRecord, DirectiveRef, Severity};
pub use directive::{Action, Directive};
pub use error::{ConfigError, ConfigResult};
pub use extractor::{extract_directives, DirectiveExtractor, MAX_LINE_LEN, MIN_LINE_LEN};
pub use normalize::{normalize_subject, MAX_SUBJECT_LEN, MIN_SUBJECT_LEN};
pub use report::{Report, ReportBuilder};
pub use similarity::{similar, SimilarityMatcher};
pub use source::{Scope, Source, SourceKind};
pub use synthetic::{HookSynthesizer, ToolNameSynthesizer};

#[cfg(test)]
mod tests {
    mod pipeline;
    mod report;
}
