use rmcp::schemars;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ReadFileRequest {
    /// File to read, relative to the sandbox base directory
    #[schemars(
        description = "File to read, relative to the sandbox base directory (e.g. 'README.md' or 'src/app.py')"
    )]
    pub path: String,

    /// Maximum number of characters to return (default: 20000)
    #[schemars(description = "Maximum number of characters to return (default 20000)")]
    pub max_chars: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ReadFileResult {
    pub ok: bool,
    pub path: String,
    pub truncated: bool,
    pub content: String,
}
