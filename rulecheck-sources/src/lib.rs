//! Source loading for rulecheck.
//!
//! Reads the rule documents a project keeps for AI coding assistants and turns
//! them into [`rulecheck::Source`] values ready for analysis.
//!
//! ## Modules
//!
//! - [`loader`] - Walks the conventional locations under a project root
//! - [`frontmatter`] - Splits and reads rule metadata blocks
//! - [`hooks`] - Synthesizes a source from hook settings
//! - [`error`] - Error types for loading

pub mod error;
pub mod frontmatter;
pub mod hooks;
pub mod loader;

pub use error::{LoadError, LoadResult};
pub use frontmatter::Frontmatter;
pub use loader::{load_sources, SourceLoader};

#[cfg(test)]
mod tests;
