//! Dual-engine line search over a sandboxed directory tree.
//!
//! When a `rg` (ripgrep) executable is available on `PATH` the search is
//! delegated to it; otherwise an in-process scanner walks a fixed allow-list
//! of text-like files. Both engines honor the same hit cap and size limits
//! and produce hits in the same shape, so callers can only tell them apart
//! via the reported engine tag.

mod engine;
mod error;
mod external;
mod scanner;
mod types;

pub use engine::search;
pub use error::{Result, SearchError};
pub use types::{Engine, SearchHit, SearchOutcome, SearchRequest};
