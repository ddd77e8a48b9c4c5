//! Error types for the search crate.
//!
//! Searching itself never fails. These errors come from loading the
//! configuration and catalog files that feed the engine.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while preparing a search engine.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Reading a file failed
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that could not be read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML or has wrong field types
    #[error("Invalid configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Catalog is not a valid JSON array of products
    #[error("Invalid catalog: {0}")]
    CatalogParse(#[from] serde_json::Error),
}

impl SearchError {
    /// Wrap an IO error with the path that caused it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
