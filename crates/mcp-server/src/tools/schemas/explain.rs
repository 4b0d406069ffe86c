use intel_structure::StructureSummary;
use rmcp::schemars;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ExplainRepositoryRequest {
    /// Folder to summarize, relative to the sandbox base directory
    #[schemars(
        description = "Folder to summarize, relative to the sandbox base directory (default '.')"
    )]
    pub root: Option<String>,

    /// Maximum number of Python files to scan (default: 60)
    #[schemars(description = "Maximum number of Python files to scan (default 60)")]
    pub max_files: Option<usize>,

    /// Per-file character budget for reading and extraction (default: 12000)
    #[schemars(description = "Per-file character budget for reading and extraction (default 12000)")]
    pub max_chars_per_file: Option<usize>,
}

/// Immediate child of the summarized root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopLevelEntry {
    pub name: String,
    /// "dir" or "file"
    #[serde(rename = "type")]
    pub kind: String,
}

/// Per-file overview: structure plus a short text preview
#[derive(Debug, Serialize)]
pub struct FileSummary {
    pub path: String,
    pub structure: StructureSummary,
    pub preview: String,
}

#[derive(Debug, Serialize)]
pub struct ExplainRepositoryResult {
    pub ok: bool,
    pub base_dir: String,
    pub root: String,
    pub files_scanned: usize,
    pub entry_point_candidates: Vec<String>,
    pub top_level: Vec<TopLevelEntry>,
    pub file_summaries: Vec<FileSummary>,
}
