//! intel-fs MCP Server
//!
//! Sandboxed, read-only filesystem access and text search for AI agents.
//!
//! ## Tools
//!
//! - `ping` - Verify the server is reachable
//! - `list_files` - Enumerate files under a folder inside the sandbox
//! - `read_file` - Read a text file inside the sandbox (size-capped)
//! - `explain_repository` - Structured overview of a Python repository
//! - `smart_search` - Line search (ripgrep when available, scanner fallback)
//!
//! ## Usage
//!
//! Add to your MCP client configuration:
//! ```json
//! {
//!   "mcpServers": {
//!     "intel-fs": {
//!       "command": "intel-fs-mcp",
//!       "env": { "INTEL_FS_BASE_DIR": "/path/to/project" }
//!     }
//!   }
//! }
//! ```

use anyhow::Result;
use rmcp::transport::stdio;
use rmcp::ServiceExt;

mod tools;

use tools::IntelFsService;

#[tokio::main]
async fn main() -> Result<()> {
    // Configure logging to stderr only (stdout is for MCP protocol)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let service = IntelFsService::from_env()?;
    log::info!(
        "Starting intel-fs MCP server (base directory: {})",
        service.base_dir().display()
    );

    let server = service.serve(stdio()).await?;
    server.waiting().await?;

    log::info!("intel-fs MCP server stopped");
    Ok(())
}
