//! Request and response shapes for the tool surface.
//!
//! Requests derive `JsonSchema` so the MCP client sees parameter
//! descriptions; responses serialize to the JSON payloads forwarded
//! verbatim as text content.

mod explain;
mod list_files;
mod ping;
mod read_file;
mod smart_search;

pub(super) use explain::{
    ExplainRepositoryRequest, ExplainRepositoryResult, FileSummary, TopLevelEntry,
};
pub(super) use list_files::{ListFilesRequest, ListFilesResult};
pub(super) use ping::PingResult;
pub(super) use read_file::{ReadFileRequest, ReadFileResult};
pub(super) use smart_search::{SmartSearchRequest, SmartSearchResult};
