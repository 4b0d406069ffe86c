use rmcp::schemars;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListFilesRequest {
    /// Folder to list, relative to the sandbox base directory
    #[schemars(description = "Folder to list, relative to the sandbox base directory (default '.')")]
    pub root: Option<String>,

    /// Maximum number of file paths to return (default: 200)
    #[schemars(description = "Maximum number of file paths to return (default 200)")]
    pub max_results: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ListFilesResult {
    pub ok: bool,
    pub base_dir: String,
    pub root: String,
    pub count: usize,
    pub files: Vec<String>,
    /// Set when enumeration stopped at `max_results`
    pub truncated: bool,
}
