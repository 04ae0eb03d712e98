//! Error types for the fixture harness.
//!
//! This module defines error types for fixture loading, fixture parsing,
//! and the expected-failures ledger.

use thiserror::Error;

/// Errors that can occur while loading or running fixtures.
#[derive(Debug, Error)]
pub enum SpecError {
    /// A fixture or ledger file is not valid for its schema.
    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    /// A fixture or ledger file could not be read.
    #[error("failed to load fixture: {path}: {message}")]
    Load { path: String, message: String },

    /// A fixture describes something the engine cannot be asked about.
    #[error("invalid fixture {path}: {message}")]
    Invalid { path: String, message: String },
}

/// Result type for fixture operations.
pub type SpecResult<T> = Result<T, SpecError>;
