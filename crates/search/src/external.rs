use crate::error::{Result, SearchError};
use crate::types::{SearchHit, SearchRequest};
use intel_sandbox::relative_display;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

/// Deadline for one delegated search. Expiry is recoverable: the caller
/// falls back to the in-process scanner.
const EXTERNAL_TIMEOUT: Duration = Duration::from_secs(10);

/// Probe for a usable ripgrep on the standard executable search path.
/// Absence is not an error, only a fallback trigger.
pub(crate) fn ripgrep_available() -> bool {
    Command::new("rg")
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Delegate one search to ripgrep, run from the resolved root directory.
///
/// Stdout is consumed incrementally so the child can be killed as soon as
/// the hit cap is reached instead of buffering an unbounded result set.
pub(crate) fn run(
    base: &Path,
    root: &Path,
    request: &SearchRequest,
) -> Result<(Vec<SearchHit>, bool)> {
    // A zero cap is already reached; do not spawn anything.
    if request.max_hits == 0 {
        return Ok((Vec::new(), true));
    }

    let mut cmd = Command::new("rg");
    cmd.arg("--line-number")
        .arg("--no-heading")
        .arg("--color=never")
        .arg(format!("--max-filesize={}K", request.max_file_size_kb));
    if !request.case_sensitive {
        cmd.arg("--ignore-case");
    }
    if !request.use_regex {
        cmd.arg("--fixed-strings");
    }
    cmd.arg("--")
        .arg(&request.query)
        .current_dir(root)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null());

    let mut child = cmd
        .spawn()
        .map_err(|err| SearchError::ExternalFailed(format!("failed to launch ripgrep: {err}")))?;
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| SearchError::ExternalFailed("missing ripgrep stdout".to_string()))?;

    let (tx, rx) = mpsc::channel::<String>();
    let reader = std::thread::spawn(move || {
        for line in BufReader::new(stdout).lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    // Hits are rejoined through the root's base-relative prefix so both
    // engines report paths against the same reference.
    let rel_root = root.strip_prefix(base).unwrap_or_else(|_| Path::new(""));
    let deadline = Instant::now() + EXTERNAL_TIMEOUT;
    let mut hits = Vec::new();

    loop {
        let Some(remaining) = deadline.checked_duration_since(Instant::now()) else {
            kill_and_reap(&mut child, reader);
            return Err(SearchError::ExternalTimeout);
        };

        match rx.recv_timeout(remaining) {
            Ok(line) => {
                let Some(hit) = parse_output_line(rel_root, &line) else {
                    continue;
                };
                hits.push(hit);
                if hits.len() >= request.max_hits {
                    drop(rx);
                    kill_and_reap(&mut child, reader);
                    return Ok((hits, true));
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {
                drop(rx);
                kill_and_reap(&mut child, reader);
                return Err(SearchError::ExternalTimeout);
            }
        }
    }

    let status = child.wait()?;
    let _ = reader.join();

    // ripgrep exits 0 on matches and 1 on "no matches"; 2 signals a real
    // failure (the pattern was pre-validated, so this is unexpected).
    if status.code() == Some(2) {
        return Err(SearchError::ExternalFailed(
            "ripgrep exited with an error".to_string(),
        ));
    }

    Ok((hits, false))
}

fn kill_and_reap(child: &mut std::process::Child, reader: std::thread::JoinHandle<()>) {
    let _ = child.kill();
    let _ = child.wait();
    let _ = reader.join();
}

/// Parse one `path:line:text` output line, splitting on the first two
/// colons only since the matched text may itself contain colons.
fn parse_output_line(rel_root: &Path, line: &str) -> Option<SearchHit> {
    let mut parts = line.splitn(3, ':');
    let raw_path = parts.next()?;
    let line_no: usize = parts.next()?.trim().parse().ok()?;
    let text = parts.next()?;

    let reported = raw_path.trim_start_matches("./");
    if reported.is_empty() {
        return None;
    }
    let joined = rel_root.join(reported);

    Some(SearchHit {
        path: relative_display(Path::new(""), &joined),
        line: line_no,
        text: text.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_path_line_text_splitting_on_first_two_colons_only() {
        let hit = parse_output_line(Path::new("src"), "pkg/a.py:12:  url = \"http://x\"  ").unwrap();
        assert_eq!(hit.path, "src/pkg/a.py");
        assert_eq!(hit.line, 12);
        assert_eq!(hit.text, "url = \"http://x\"");
    }

    #[test]
    fn parse_rejects_malformed_lines() {
        assert!(parse_output_line(Path::new(""), "").is_none());
        assert!(parse_output_line(Path::new(""), "no-colons-here").is_none());
        assert!(parse_output_line(Path::new(""), "a.py:notanumber:text").is_none());
    }

    #[test]
    fn zero_hit_cap_returns_empty_truncated_without_spawning() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("a.txt"), "needle\n").unwrap();

        let request = SearchRequest {
            query: "needle".to_string(),
            use_regex: false,
            case_sensitive: false,
            max_hits: 0,
            max_file_size_kb: 512,
        };
        let (hits, truncated) = run(tmp.path(), tmp.path(), &request).unwrap();
        assert!(hits.is_empty());
        assert!(truncated);
    }

    #[test]
    fn parse_handles_root_equal_to_base() {
        let hit = parse_output_line(Path::new(""), "./a.py:3:x = 1").unwrap();
        assert_eq!(hit.path, "a.py");
        assert_eq!(hit.line, 3);
    }

    // The delegation tests only run where ripgrep is actually installed;
    // its absence is the fallback path, not a test failure.

    #[test]
    fn delegation_matches_scanner_semantics_when_available() {
        if !ripgrep_available() {
            eprintln!("ripgrep not installed; skipping delegation test");
            return;
        }

        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("src")).unwrap();
        std::fs::write(tmp.path().join("src/a.py"), "x = 1\n# todo: fix\n").unwrap();

        let request = SearchRequest {
            query: "TODO".to_string(),
            use_regex: false,
            case_sensitive: false,
            max_hits: 50,
            max_file_size_kb: 512,
        };
        let (hits, truncated) = run(tmp.path(), tmp.path(), &request).unwrap();
        assert!(!truncated);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].path, "src/a.py");
        assert_eq!(hits[0].line, 2);
        assert_eq!(hits[0].text, "# todo: fix");
    }

    #[test]
    fn delegation_reports_base_relative_paths_from_subdirectory_roots() {
        if !ripgrep_available() {
            eprintln!("ripgrep not installed; skipping delegation test");
            return;
        }

        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("src/pkg")).unwrap();
        std::fs::write(tmp.path().join("src/pkg/a.py"), "needle\n").unwrap();

        let request = SearchRequest {
            query: "needle".to_string(),
            use_regex: false,
            case_sensitive: false,
            max_hits: 50,
            max_file_size_kb: 512,
        };
        let root = tmp.path().join("src");
        let (hits, _) = run(tmp.path(), &root, &request).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].path, "src/pkg/a.py");
    }

    #[test]
    fn delegation_respects_hit_cap() {
        if !ripgrep_available() {
            eprintln!("ripgrep not installed; skipping delegation test");
            return;
        }

        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("a.txt"), "needle\n".repeat(20)).unwrap();

        let request = SearchRequest {
            query: "needle".to_string(),
            use_regex: false,
            case_sensitive: false,
            max_hits: 5,
            max_file_size_kb: 512,
        };
        let (hits, truncated) = run(tmp.path(), tmp.path(), &request).unwrap();
        assert_eq!(hits.len(), 5);
        assert!(truncated);
    }
}
