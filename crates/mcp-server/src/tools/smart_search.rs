use intel_sandbox::Sandbox;
use intel_search::{search, SearchRequest};

use super::response::{OpError, OpResult};
use super::schemas::SmartSearchResult;

#[allow(clippy::too_many_arguments)]
pub(super) fn compute_smart_search(
    sandbox: &Sandbox,
    query: &str,
    root: &str,
    use_regex: bool,
    case_sensitive: bool,
    max_hits: usize,
    max_file_size_kb: u64,
) -> OpResult<SmartSearchResult> {
    let resolved = sandbox.resolve(root)?;
    if !resolved.path.is_dir() {
        return Err(OpError::not_found(format!("Folder not found: {root}")));
    }

    let request = SearchRequest {
        query: query.to_string(),
        use_regex,
        case_sensitive,
        max_hits,
        max_file_size_kb,
    };
    let outcome = search(sandbox.base(), &resolved.path, &request)?;

    Ok(SmartSearchResult {
        ok: true,
        engine: outcome.engine,
        query: query.to_string(),
        root: root.to_string(),
        hits: outcome.hits,
        truncated: outcome.truncated,
    })
}
