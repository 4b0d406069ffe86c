use intel_sandbox::{relative_display, Sandbox};
use walkdir::WalkDir;

use super::response::{OpError, OpResult};
use super::schemas::ListFilesResult;

pub(super) fn compute_list_files(
    sandbox: &Sandbox,
    root: &str,
    max_results: usize,
) -> OpResult<ListFilesResult> {
    let resolved = sandbox.resolve(root)?;
    if !resolved.path.is_dir() {
        return Err(OpError::not_found(format!("Folder not found: {root}")));
    }

    let mut files = Vec::new();
    let mut truncated = false;
    for entry in WalkDir::new(&resolved.path)
        .follow_links(false)
        .sort_by_file_name()
    {
        let Ok(entry) = entry else { continue };
        if !entry.file_type().is_file() {
            continue;
        }
        if files.len() >= max_results {
            truncated = true;
            break;
        }
        files.push(relative_display(sandbox.base(), entry.path()));
    }

    Ok(ListFilesResult {
        ok: true,
        base_dir: sandbox.base().display().to_string(),
        root: root.to_string(),
        count: files.len(),
        files,
        truncated,
    })
}
