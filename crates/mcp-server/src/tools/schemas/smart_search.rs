use intel_search::{Engine, SearchHit};
use rmcp::schemars;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SmartSearchRequest {
    /// Text or regex to search for
    #[schemars(description = "Text or regex to search for")]
    pub query: String,

    /// Folder to search, relative to the sandbox base directory
    #[schemars(
        description = "Folder to search, relative to the sandbox base directory (default '.')"
    )]
    pub root: Option<String>,

    /// Treat the query as a regex instead of a literal string (default: false)
    #[schemars(description = "Treat the query as a regex instead of a literal string")]
    pub use_regex: Option<bool>,

    /// Match case-sensitively (default: false)
    #[schemars(description = "Match case-sensitively (default false)")]
    pub case_sensitive: Option<bool>,

    /// Maximum number of matching lines to return (default: 50)
    #[schemars(description = "Maximum number of matching lines to return (default 50)")]
    pub max_hits: Option<usize>,

    /// Skip files larger than this many kilobytes (default: 512)
    #[schemars(description = "Skip files larger than this many kilobytes (default 512)")]
    pub max_file_size_kb: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct SmartSearchResult {
    pub ok: bool,
    /// "external" (ripgrep) or "fallback" (in-process scanner)
    pub engine: Engine,
    pub query: String,
    pub root: String,
    pub hits: Vec<SearchHit>,
    pub truncated: bool,
}
