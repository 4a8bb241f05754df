//! Corpus error types.

use std::path::PathBuf;

/// Error returned when a request path cannot be browsed.
///
/// All variants surface identically at the HTTP boundary. The distinction is
/// kept for logging.
#[derive(Debug, thiserror::Error)]
pub enum BrowseError {
    /// Namespace or path segment absent from the tree.
    #[error("Path not found: {0}")]
    PathNotFound(String),
    /// A leaf's encoded content is not valid hex.
    #[error("Invalid encoded content for '{key}': {source}")]
    Decode {
        /// Key of the offending leaf.
        key: String,
        /// Underlying hex error.
        #[source]
        source: hex::FromHexError,
    },
    /// Render target is not an index node.
    #[error("Not an index node: {0}")]
    MalformedTree(String),
}

impl BrowseError {
    /// Short machine-readable name for structured logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PathNotFound(_) => "path_not_found",
            Self::Decode { .. } => "decode",
            Self::MalformedTree(_) => "malformed_tree",
        }
    }
}

/// Error returned when loading or building a corpus.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    /// Corpus file not found.
    #[error("Corpus file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Markdown source directory not found.
    #[error("Source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON parse error (including tree values that are neither string nor object).
    #[error("Corpus parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Registry validation error.
    #[error("Corpus error: {0}")]
    Validation(String),
}
