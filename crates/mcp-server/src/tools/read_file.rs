use intel_sandbox::{relative_display, Sandbox};

use super::response::{OpError, OpResult};
use super::schemas::ReadFileResult;

pub(super) fn compute_read_file(
    sandbox: &Sandbox,
    path: &str,
    max_chars: usize,
) -> OpResult<ReadFileResult> {
    let resolved = sandbox.resolve(path)?;
    if !resolved.path.is_file() {
        return Err(OpError::not_found(format!("File not found: {path}")));
    }

    let bytes = std::fs::read(&resolved.path)?;
    let text = String::from_utf8_lossy(&bytes);

    let total_chars = text.chars().count();
    let truncated = total_chars > max_chars;
    let content = if truncated {
        text.chars().take(max_chars).collect()
    } else {
        text.into_owned()
    };

    Ok(ReadFileResult {
        ok: true,
        path: relative_display(sandbox.base(), &resolved.path),
        truncated,
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::response::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn round_trips_content_under_the_char_cap() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("a.txt"), "hello world\n").unwrap();
        let sandbox = Sandbox::new(tmp.path()).unwrap();

        let result = compute_read_file(&sandbox, "a.txt", 20_000).unwrap();
        assert!(result.ok);
        assert_eq!(result.path, "a.txt");
        assert_eq!(result.content, "hello world\n");
        assert!(!result.truncated);
    }

    #[test]
    fn truncates_to_a_prefix_of_max_chars() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("a.txt"), "abcdefghij").unwrap();
        let sandbox = Sandbox::new(tmp.path()).unwrap();

        let result = compute_read_file(&sandbox, "a.txt", 4).unwrap();
        assert!(result.truncated);
        assert_eq!(result.content, "abcd");

        // An exact fit is not truncation.
        let result = compute_read_file(&sandbox, "a.txt", 10).unwrap();
        assert!(!result.truncated);
        assert_eq!(result.content, "abcdefghij");
    }

    #[test]
    fn char_cap_counts_characters_not_bytes() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("a.txt"), "héllo").unwrap();
        let sandbox = Sandbox::new(tmp.path()).unwrap();

        let result = compute_read_file(&sandbox, "a.txt", 3).unwrap();
        assert!(result.truncated);
        assert_eq!(result.content, "hél");
    }

    #[test]
    fn decodes_invalid_utf8_permissively() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("a.txt"), [b'o', b'k', 0xff, b'!']).unwrap();
        let sandbox = Sandbox::new(tmp.path()).unwrap();

        let result = compute_read_file(&sandbox, "a.txt", 20_000).unwrap();
        assert!(result.ok);
        assert!(result.content.starts_with("ok"));
        assert!(result.content.ends_with('!'));
    }

    #[test]
    fn missing_files_and_directories_are_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("src")).unwrap();
        let sandbox = Sandbox::new(tmp.path()).unwrap();

        let err = compute_read_file(&sandbox, "nope.txt", 100).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err = compute_read_file(&sandbox, "src", 100).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[test]
    fn sandbox_violations_surface_before_reading() {
        let tmp = tempfile::tempdir().unwrap();
        let sandbox = Sandbox::new(tmp.path()).unwrap();

        let err = compute_read_file(&sandbox, "/etc/passwd", 100).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidPath);

        let err = compute_read_file(&sandbox, "../../etc/passwd", 100).unwrap_err();
        assert_eq!(err.kind, ErrorKind::SecurityError);
    }
}
