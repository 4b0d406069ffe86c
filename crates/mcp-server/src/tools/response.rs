use intel_sandbox::SandboxError;
use intel_search::SearchError;
use rmcp::model::{CallToolResult, Content};
use rmcp::ErrorData as McpError;
use serde::Serialize;

/// Closed set of error kinds surfaced to callers.
///
/// Every operation failure maps to one of these tags as data; nothing is
/// re-raised past the tool boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(super) enum ErrorKind {
    InvalidPath,
    SecurityError,
    NotFound,
    Uncategorized,
}

/// An operation failure, already categorized for the caller
#[derive(Debug)]
pub(super) struct OpError {
    pub(super) kind: ErrorKind,
    pub(super) message: String,
}

pub(super) type OpResult<T> = Result<T, OpError>;

impl OpError {
    pub(super) fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::NotFound,
            message: message.into(),
        }
    }

    pub(super) fn uncategorized(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Uncategorized,
            message: message.into(),
        }
    }
}

impl From<SandboxError> for OpError {
    fn from(err: SandboxError) -> Self {
        let kind = match err {
            SandboxError::InvalidPath(_) => ErrorKind::InvalidPath,
            SandboxError::Escape(_) => ErrorKind::SecurityError,
            SandboxError::Io(_) => ErrorKind::Uncategorized,
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

impl From<SearchError> for OpError {
    fn from(err: SearchError) -> Self {
        let kind = match err {
            SearchError::RootNotFound(_) => ErrorKind::NotFound,
            _ => ErrorKind::Uncategorized,
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for OpError {
    fn from(err: std::io::Error) -> Self {
        let kind = if err.kind() == std::io::ErrorKind::NotFound {
            ErrorKind::NotFound
        } else {
            ErrorKind::Uncategorized
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorPayload {
    ok: bool,
    error: ErrorKind,
    message: String,
}

/// Render an operation outcome as a structured JSON text response.
///
/// Failures become `{ok: false, error, message}` payloads, never MCP
/// protocol errors: the caller always receives a well-formed response
/// object for any input short of process-level resource exhaustion.
pub(super) fn tool_response<T: Serialize>(result: OpResult<T>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(payload) => render_json(&payload),
        Err(err) => render_json(&ErrorPayload {
            ok: false,
            error: err.kind,
            message: err.message,
        }),
    }
}

fn render_json<T: Serialize>(payload: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(payload)
        .map_err(|err| McpError::internal_error(format!("serialize tool payload: {err}"), None))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}
