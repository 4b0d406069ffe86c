use crate::error::{Result, SearchError};
use crate::types::{Engine, SearchOutcome, SearchRequest};
use crate::{external, scanner};
use regex::{Regex, RegexBuilder};
use std::path::Path;

/// Search `root` (a sandbox-resolved directory under `base`) for lines
/// matching the request.
///
/// Delegates to ripgrep when available; any delegation failure (missing
/// executable, spawn error, timeout, abnormal exit) degrades to the
/// in-process scanner instead of failing the call. Only root-level problems
/// (missing root, invalid pattern) abort the search.
pub fn search(base: &Path, root: &Path, request: &SearchRequest) -> Result<SearchOutcome> {
    if !root.is_dir() {
        return Err(SearchError::RootNotFound(root.display().to_string()));
    }

    // Compile up front so an invalid user regex fails identically no matter
    // which engine would have run.
    let pattern = compile_pattern(request)?;

    if external::ripgrep_available() {
        match external::run(base, root, request) {
            Ok((hits, truncated)) => {
                return Ok(SearchOutcome {
                    engine: Engine::External,
                    hits,
                    truncated,
                })
            }
            Err(err) => {
                log::warn!("ripgrep delegation failed, using fallback scanner: {err}");
            }
        }
    }

    let (hits, truncated) = scanner::run(base, root, &pattern, request);
    Ok(SearchOutcome {
        engine: Engine::Fallback,
        hits,
        truncated,
    })
}

fn compile_pattern(request: &SearchRequest) -> Result<Regex> {
    let source = if request.use_regex {
        request.query.clone()
    } else {
        regex::escape(&request.query)
    };
    Ok(RegexBuilder::new(&source)
        .case_insensitive(!request.case_sensitive)
        .build()?)
}
