use intel_sandbox::{relative_display, Sandbox};
use intel_structure::StructureExtractor;
use std::path::PathBuf;
use walkdir::WalkDir;

use super::response::{OpError, OpResult};
use super::schemas::{ExplainRepositoryResult, FileSummary, TopLevelEntry};

const PREVIEW_LINES: usize = 30;
const MAX_ENTRY_POINTS: usize = 10;
const MAX_TOP_LEVEL: usize = 200;

/// Names flagged as likely program entry points. Suffix matches catch
/// `main.py` / `__main__.py` anywhere in the tree; exact matches only flag
/// a top-level `app.py` / `server.py`.
const ENTRY_POINT_SUFFIXES: &[&str] = &["main.py", "__main__.py"];
const ENTRY_POINT_NAMES: &[&str] = &["app.py", "server.py"];

pub(super) fn compute_explain_repository(
    sandbox: &Sandbox,
    root: &str,
    max_files: usize,
    max_chars_per_file: usize,
) -> OpResult<ExplainRepositoryResult> {
    let resolved = sandbox.resolve(root)?;
    if !resolved.path.is_dir() {
        return Err(OpError::not_found(format!("Folder not found: {root}")));
    }

    let mut extractor = StructureExtractor::new()
        .map_err(|err| OpError::uncategorized(format!("structure extractor unavailable: {err}")))?;

    // Sorted for determinism, then capped.
    let mut py_files: Vec<PathBuf> = WalkDir::new(&resolved.path)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("py"))
        })
        .collect();
    py_files.sort();
    py_files.truncate(max_files);

    let mut entry_point_candidates = Vec::new();
    let mut file_summaries = Vec::new();

    for path in &py_files {
        let rel = relative_display(sandbox.base(), path);

        let low = rel.to_lowercase();
        if ENTRY_POINT_SUFFIXES.iter().any(|s| low.ends_with(s))
            || ENTRY_POINT_NAMES.contains(&low.as_str())
        {
            entry_point_candidates.push(rel.clone());
        }

        // Unreadable files are skipped, never fatal to the overview.
        let Ok(bytes) = std::fs::read(path) else {
            log::debug!("skipping unreadable file {}", path.display());
            continue;
        };
        let text = String::from_utf8_lossy(&bytes);
        let clipped: String = text.chars().take(max_chars_per_file).collect();

        let structure = extractor.extract(&clipped);
        let preview = clipped
            .lines()
            .take(PREVIEW_LINES)
            .collect::<Vec<_>>()
            .join("\n");

        file_summaries.push(FileSummary {
            path: rel,
            structure,
            preview,
        });
    }
    entry_point_candidates.truncate(MAX_ENTRY_POINTS);

    let mut top_level = Vec::new();
    for entry in std::fs::read_dir(&resolved.path)? {
        let Ok(entry) = entry else { continue };
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        top_level.push(TopLevelEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            kind: if is_dir { "dir" } else { "file" }.to_string(),
        });
    }
    top_level.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.name.cmp(&b.name)));
    top_level.truncate(MAX_TOP_LEVEL);

    Ok(ExplainRepositoryResult {
        ok: true,
        base_dir: sandbox.base().display().to_string(),
        root: root.to_string(),
        files_scanned: py_files.len(),
        entry_point_candidates,
        top_level,
        file_summaries,
    })
}
