use crate::types::{SearchHit, SearchRequest};
use intel_sandbox::relative_display;
use regex::Regex;
use std::path::Path;
use walkdir::WalkDir;

/// Extensions the fallback scanner treats as searchable text
const TEXT_EXTENSIONS: &[&str] = &[
    "py", "md", "txt", "toml", "yaml", "yml", "json", "env", "ini", "cfg",
];

/// In-process fallback scanner.
///
/// Walks every file under `root` in deterministic (file-name) order,
/// filters to the text allow-list and the size ceiling, and tests each line
/// against the compiled pattern. Per-file errors (unreadable entries,
/// failed stats) skip that file; they never abort the scan.
pub(crate) fn run(
    base: &Path,
    root: &Path,
    pattern: &Regex,
    request: &SearchRequest,
) -> (Vec<SearchHit>, bool) {
    // A zero cap is already reached; nothing may be collected.
    if request.max_hits == 0 {
        return (Vec::new(), true);
    }

    let max_bytes = request.max_file_size_kb.saturating_mul(1024);
    let mut hits = Vec::new();

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let Ok(entry) = entry else { continue };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !is_text_candidate(path) {
            continue;
        }
        let Ok(meta) = entry.metadata() else { continue };
        if meta.len() > max_bytes {
            log::debug!("skipping large file {}", path.display());
            continue;
        }
        let Ok(bytes) = std::fs::read(path) else {
            continue;
        };

        // Malformed byte sequences decode permissively, never fatally.
        let text = String::from_utf8_lossy(&bytes);
        for (index, line) in text.lines().enumerate() {
            if !pattern.is_match(line) {
                continue;
            }
            hits.push(SearchHit {
                path: relative_display(base, path),
                line: index + 1,
                text: line.trim().to_string(),
            });
            if hits.len() >= request.max_hits {
                return (hits, true);
            }
        }
    }

    (hits, false)
}

fn is_text_candidate(path: &Path) -> bool {
    // Dotenv files have no extension in the usual case.
    if path.file_name().and_then(|n| n.to_str()) == Some(".env") {
        return true;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            TEXT_EXTENSIONS
                .iter()
                .any(|candidate| ext.eq_ignore_ascii_case(candidate))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use regex::RegexBuilder;

    fn literal(query: &str, case_sensitive: bool) -> Regex {
        RegexBuilder::new(&regex::escape(query))
            .case_insensitive(!case_sensitive)
            .build()
            .unwrap()
    }

    fn request(max_hits: usize) -> SearchRequest {
        SearchRequest {
            query: String::new(),
            use_regex: false,
            case_sensitive: false,
            max_hits,
            max_file_size_kb: 512,
        }
    }

    #[test]
    fn finds_case_insensitive_literal_with_trimmed_text() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("a.py"), "x = 1\n    // todo: fix\n").unwrap();

        let (hits, truncated) = run(tmp.path(), tmp.path(), &literal("TODO", false), &request(50));
        assert!(!truncated);
        assert_eq!(
            hits,
            vec![SearchHit {
                path: "a.py".to_string(),
                line: 2,
                text: "// todo: fix".to_string(),
            }]
        );
    }

    #[test]
    fn respects_hit_cap_and_reports_truncation() {
        let tmp = tempfile::tempdir().unwrap();
        let body = "needle\n".repeat(10);
        std::fs::write(tmp.path().join("a.txt"), &body).unwrap();
        std::fs::write(tmp.path().join("b.txt"), &body).unwrap();

        let (hits, truncated) = run(tmp.path(), tmp.path(), &literal("needle", false), &request(3));
        assert_eq!(hits.len(), 3);
        assert!(truncated);

        // Exactly at the cap also reports truncation; that is the contract.
        let tmp2 = tempfile::tempdir().unwrap();
        std::fs::write(tmp2.path().join("c.txt"), "needle\nneedle\nneedle\n").unwrap();
        let (hits, truncated) =
            run(tmp2.path(), tmp2.path(), &literal("needle", false), &request(3));
        assert_eq!(hits.len(), 3);
        assert!(truncated);
    }

    #[test]
    fn zero_hit_cap_collects_nothing_and_reports_truncation() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("a.txt"), "needle\n").unwrap();

        let (hits, truncated) = run(tmp.path(), tmp.path(), &literal("needle", false), &request(0));
        assert!(hits.is_empty());
        assert!(truncated);
    }

    #[test]
    fn skips_files_outside_the_text_allow_list() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("data.bin"), "needle\n").unwrap();
        std::fs::write(tmp.path().join("image.png"), "needle\n").unwrap();
        std::fs::write(tmp.path().join("notes.md"), "needle\n").unwrap();
        std::fs::write(tmp.path().join(".env"), "needle=1\n").unwrap();

        let (hits, _) = run(tmp.path(), tmp.path(), &literal("needle", false), &request(50));
        let mut paths: Vec<&str> = hits.iter().map(|h| h.path.as_str()).collect();
        paths.sort_unstable();
        assert_eq!(paths, vec![".env", "notes.md"]);
    }

    #[test]
    fn skips_oversized_files() {
        let tmp = tempfile::tempdir().unwrap();
        let large = format!("needle\n{}", "x".repeat(4096));
        std::fs::write(tmp.path().join("large.txt"), large).unwrap();
        std::fs::write(tmp.path().join("small.txt"), "needle\n").unwrap();

        let mut req = request(50);
        req.max_file_size_kb = 1;
        let (hits, _) = run(tmp.path(), tmp.path(), &literal("needle", false), &req);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].path, "small.txt");
    }

    #[test]
    fn case_sensitive_mode_filters_matches() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("a.txt"), "Needle\nneedle\n").unwrap();

        let (hits, _) = run(tmp.path(), tmp.path(), &literal("needle", true), &request(50));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].line, 2);
    }

    #[test]
    fn regex_mode_matches_patterns() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("mod.py"),
            "def alpha(): pass\ndef beta(): pass\nx = 1\n",
        )
        .unwrap();

        let pattern = RegexBuilder::new(r"def \w+\(\)")
            .case_insensitive(true)
            .build()
            .unwrap();
        let (hits, _) = run(tmp.path(), tmp.path(), &pattern, &request(50));
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn paths_are_base_relative_when_root_is_a_subdirectory() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("src/pkg")).unwrap();
        std::fs::write(tmp.path().join("src/pkg/a.py"), "needle\n").unwrap();

        let root = tmp.path().join("src");
        let (hits, _) = run(tmp.path(), &root, &literal("needle", false), &request(50));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].path, "src/pkg/a.py");
    }

    #[test]
    fn invalid_utf8_is_decoded_permissively() {
        let tmp = tempfile::tempdir().unwrap();
        let mut bytes = b"needle ".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe]);
        bytes.extend_from_slice(b" tail\n");
        std::fs::write(tmp.path().join("weird.txt"), bytes).unwrap();

        let (hits, _) = run(tmp.path(), tmp.path(), &literal("needle", false), &request(50));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].line, 1);
    }
}
