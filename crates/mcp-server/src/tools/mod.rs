//! intel-fs MCP tool surface.
//!
//! Split into submodules to keep schemas, dispatch, and per-tool
//! implementations reviewable: `schemas` holds the request/response shapes,
//! `response` the error-kind mapping, and the remaining modules the per-tool
//! compute functions that dispatch calls into.

mod dispatch;
mod explain;
mod list_files;
mod read_file;
mod response;
mod schemas;
mod smart_search;

pub use dispatch::IntelFsService;
