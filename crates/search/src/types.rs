use serde::Serialize;

/// Which of the two interchangeable search implementations produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    External,
    Fallback,
}

impl Engine {
    pub fn as_str(self) -> &'static str {
        match self {
            Engine::External => "external",
            Engine::Fallback => "fallback",
        }
    }
}

/// One matching line.
///
/// `path` is relative to the sandbox base directory with forward-slash
/// separators regardless of engine; `line` is 1-based; `text` is the
/// matched line with surrounding whitespace trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub path: String,
    pub line: usize,
    pub text: String,
}

/// Search results in discovery order (file traversal order, then in-file
/// line order), capped at the requested maximum.
#[derive(Debug, Serialize)]
pub struct SearchOutcome {
    pub engine: Engine,
    pub hits: Vec<SearchHit>,
    /// True when the hit cap was reached. Reaching the cap always reports
    /// truncation, even if no further match exists; that conservative
    /// policy is the contract both engines share.
    pub truncated: bool,
}

/// Caller-supplied search parameters
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    /// Treat the query as a regex instead of a literal string
    pub use_regex: bool,
    /// Match case-sensitively (default is case-insensitive)
    pub case_sensitive: bool,
    /// Hit cap shared by both engines
    pub max_hits: usize,
    /// Files larger than this are skipped by both engines
    pub max_file_size_kb: u64,
}
