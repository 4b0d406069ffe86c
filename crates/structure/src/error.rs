use thiserror::Error;

/// Result type for extractor construction
pub type Result<T> = std::result::Result<T, StructureError>;

/// Errors that can occur while setting up structure extraction.
///
/// Extraction itself never fails; parse problems are reported inside
/// [`crate::StructureSummary`] instead.
#[derive(Error, Debug)]
pub enum StructureError {
    /// Tree-sitter rejected the grammar (version mismatch)
    #[error("tree-sitter language error: {0}")]
    Language(String),
}
