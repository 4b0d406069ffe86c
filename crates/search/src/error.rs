use thiserror::Error;

/// Result type for search operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur during a search
#[derive(Error, Debug)]
pub enum SearchError {
    /// The resolved root is not an existing directory
    #[error("folder not found: {0}")]
    RootNotFound(String),

    /// The caller's pattern does not compile
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// The external engine exceeded its deadline (recoverable; the caller
    /// falls back to the in-process scanner)
    #[error("external search timed out")]
    ExternalTimeout,

    /// The external engine failed to launch or exited abnormally
    #[error("external search failed: {0}")]
    ExternalFailed(String),

    /// IO error at the search root (per-file errors are skipped, not raised)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
