use thiserror::Error;

/// Result type for sandbox operations
pub type Result<T> = std::result::Result<T, SandboxError>;

/// Errors that can occur while resolving a caller-supplied path
#[derive(Error, Debug)]
pub enum SandboxError {
    /// Absolute or home-relative input, rejected before any filesystem access
    #[error("invalid path '{0}': use a relative path like '.' or 'src'")]
    InvalidPath(String),

    /// Input resolved outside the base directory
    #[error("path '{0}' escapes the sandbox base directory")]
    Escape(String),

    /// IO error during resolution (e.g. permission denied on an ancestor)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
