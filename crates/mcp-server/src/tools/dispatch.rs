use intel_sandbox::Sandbox;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Implementation, ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use std::path::Path;
use std::sync::Arc;

use super::explain::compute_explain_repository;
use super::list_files::compute_list_files;
use super::read_file::compute_read_file;
use super::response::{tool_response, OpError, OpResult};
use super::schemas::{
    ExplainRepositoryRequest, ListFilesRequest, PingResult, ReadFileRequest, SmartSearchRequest,
};
use super::smart_search::compute_smart_search;

const DEFAULT_LIST_MAX_RESULTS: usize = 200;
const DEFAULT_READ_MAX_CHARS: usize = 20_000;
const DEFAULT_EXPLAIN_MAX_FILES: usize = 60;
const DEFAULT_EXPLAIN_MAX_CHARS_PER_FILE: usize = 12_000;
const DEFAULT_SEARCH_MAX_HITS: usize = 50;
const DEFAULT_SEARCH_MAX_FILE_SIZE_KB: u64 = 512;

/// MCP service over a sandboxed project directory. Every tool resolves its
/// paths through the shared [`Sandbox`] and reports failures as structured
/// payloads instead of protocol errors.
#[derive(Clone)]
pub struct IntelFsService {
    sandbox: Arc<Sandbox>,
    tool_router: ToolRouter<Self>,
}

impl IntelFsService {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            sandbox: Arc::new(Sandbox::from_env()?),
            tool_router: Self::tool_router(),
        })
    }

    #[cfg(test)]
    pub fn with_base(base: impl AsRef<Path>) -> anyhow::Result<Self> {
        Ok(Self {
            sandbox: Arc::new(Sandbox::new(base)?),
            tool_router: Self::tool_router(),
        })
    }

    pub fn base_dir(&self) -> &Path {
        self.sandbox.base()
    }

    async fn run_blocking<T, F>(&self, op: F) -> OpResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Sandbox) -> OpResult<T> + Send + 'static,
    {
        let sandbox = self.sandbox.clone();
        tokio::task::spawn_blocking(move || op(&sandbox))
            .await
            .map_err(|err| OpError::uncategorized(format!("worker task failed: {err}")))?
    }
}

#[tool_router]
impl IntelFsService {
    /// Liveness probe.
    #[tool(description = "Health check. Returns a pong payload when the server is reachable.")]
    pub async fn ping(&self) -> Result<CallToolResult, McpError> {
        tool_response(Ok(PingResult::pong()))
    }

    /// Recursive file listing under a sandboxed root.
    #[tool(
        description = "List files recursively under a directory inside the base directory. Paths are returned relative to the base directory; output is sorted and capped by max_results."
    )]
    pub async fn list_files(
        &self,
        Parameters(request): Parameters<ListFilesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let root = request.root.unwrap_or_else(|| ".".to_string());
        let max_results = request.max_results.unwrap_or(DEFAULT_LIST_MAX_RESULTS);
        let result = self
            .run_blocking(move |sandbox| compute_list_files(sandbox, &root, max_results))
            .await;
        tool_response(result)
    }

    /// Bounded UTF-8 file read.
    #[tool(
        description = "Read a text file inside the base directory. Content is decoded permissively as UTF-8 and truncated to max_chars characters."
    )]
    pub async fn read_file(
        &self,
        Parameters(request): Parameters<ReadFileRequest>,
    ) -> Result<CallToolResult, McpError> {
        let max_chars = request.max_chars.unwrap_or(DEFAULT_READ_MAX_CHARS);
        let result = self
            .run_blocking(move |sandbox| compute_read_file(sandbox, &request.path, max_chars))
            .await;
        tool_response(result)
    }

    /// Python-aware repository overview.
    #[tool(
        description = "Summarize a repository: top-level layout, entry-point candidates, and per-file structure (functions, classes, imports) plus a short preview for each Python file."
    )]
    pub async fn explain_repository(
        &self,
        Parameters(request): Parameters<ExplainRepositoryRequest>,
    ) -> Result<CallToolResult, McpError> {
        let root = request.root.unwrap_or_else(|| ".".to_string());
        let max_files = request.max_files.unwrap_or(DEFAULT_EXPLAIN_MAX_FILES);
        let max_chars = request
            .max_chars_per_file
            .unwrap_or(DEFAULT_EXPLAIN_MAX_CHARS_PER_FILE);
        let result = self
            .run_blocking(move |sandbox| {
                compute_explain_repository(sandbox, &root, max_files, max_chars)
            })
            .await;
        tool_response(result)
    }

    /// Text search delegating to ripgrep when available.
    #[tool(
        description = "Search file contents under a directory inside the base directory. Uses ripgrep when installed and falls back to a built-in scanner otherwise; the response names the engine that produced the hits."
    )]
    pub async fn smart_search(
        &self,
        Parameters(request): Parameters<SmartSearchRequest>,
    ) -> Result<CallToolResult, McpError> {
        let root = request.root.unwrap_or_else(|| ".".to_string());
        let use_regex = request.use_regex.unwrap_or(false);
        let case_sensitive = request.case_sensitive.unwrap_or(false);
        let max_hits = request.max_hits.unwrap_or(DEFAULT_SEARCH_MAX_HITS);
        let max_file_size_kb = request
            .max_file_size_kb
            .unwrap_or(DEFAULT_SEARCH_MAX_FILE_SIZE_KB);
        let result = self
            .run_blocking(move |sandbox| {
                compute_smart_search(
                    sandbox,
                    &request.query,
                    &root,
                    use_regex,
                    case_sensitive,
                    max_hits,
                    max_file_size_kb,
                )
            })
            .await;
        tool_response(result)
    }
}

#[tool_handler]
impl ServerHandler for IntelFsService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Sandboxed filesystem access for agents. All paths are relative to a configured \
                 base directory; absolute paths and traversal outside the base are rejected. \
                 Tools: ping, list_files, read_file, explain_repository, smart_search."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }
}
