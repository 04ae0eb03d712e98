//! Error types for source loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading sources from disk.
///
/// Missing files are not errors; they are simply not loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A file or directory exists but could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;
