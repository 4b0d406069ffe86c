//! Best-effort structural extraction of Python source files.
//!
//! Produces a bounded summary (functions, classes, imports) of a source
//! chunk for repository overviews. Extraction tolerates broken input: a
//! syntax error yields empty lists plus an error message, never a failure
//! propagated to the caller.

mod error;
mod extractor;

pub use error::{Result, StructureError};
pub use extractor::{
    StructureExtractor, StructureSummary, MAX_CLASSES, MAX_FUNCTIONS, MAX_IMPORTS,
};
