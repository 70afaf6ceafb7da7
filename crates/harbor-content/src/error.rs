//! Error types for content discovery.

/// Error type for content discovery operations.
///
/// Variants map directly onto the HTTP status codes the server layer
/// returns: `InvalidPath`, `MissingPath` and `NotADirectory` become 400,
/// `NotFound` becomes 404, `Io` becomes 500.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// Path escapes the content root (e.g., contains `..` segments).
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// A required path parameter was empty.
    #[error("Missing document path")]
    MissingPath,

    /// The resolved entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The path resolved to a file where a directory was expected.
    #[error("Not a directory: {0}")]
    NotADirectory(String),

    /// Unexpected I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
