//! Stop catalog error types.

use std::path::PathBuf;

/// Errors that can occur while loading the stop collection.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The data file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The data file is not a valid stop list
    #[error("invalid stop data: {0}")]
    Json(#[from] serde_json::Error),

    /// A stop has an empty identifier
    #[error("stop at position {index} has an empty id")]
    EmptyId { index: usize },

    /// Two stops share an identifier
    #[error("duplicate stop id: {0}")]
    DuplicateId(String),
}
