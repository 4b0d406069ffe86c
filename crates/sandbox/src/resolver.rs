use crate::error::{Result, SandboxError};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Environment variable selecting the base directory at startup.
pub const BASE_DIR_ENV: &str = "INTEL_FS_BASE_DIR";

/// The fixed root beyond which no operation may read or enumerate.
///
/// Constructed once at process start and immutable afterwards. Cheap to share
/// behind an `Arc`; carries no other state, so concurrent resolutions from
/// multiple tool calls need no locking.
#[derive(Debug, Clone)]
pub struct Sandbox {
    base: PathBuf,
}

/// A successfully resolved path: absolute, inside the base directory, paired
/// with the original relative input for reporting.
#[derive(Debug, Clone)]
pub struct ResolvedPath {
    pub path: PathBuf,
    pub input: String,
}

impl Sandbox {
    /// Create a sandbox rooted at `base`. The base must exist; it is
    /// canonicalized so later containment checks compare resolved paths.
    pub fn new(base: impl AsRef<Path>) -> Result<Self> {
        let base = base.as_ref().canonicalize()?;
        Ok(Self { base })
    }

    /// Create a sandbox from `INTEL_FS_BASE_DIR`, falling back to the
    /// process working directory when unset or empty.
    pub fn from_env() -> Result<Self> {
        let base = std::env::var(BASE_DIR_ENV)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        match base {
            Some(dir) => Self::new(dir),
            None => Self::new(std::env::current_dir()?),
        }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Resolve a caller-supplied relative path against the base directory.
    ///
    /// Rejects absolute and home-relative inputs before any filesystem
    /// access, then fully resolves the joined path (following symlinks and
    /// normalizing `..` segments) and verifies component-wise containment in
    /// the base. The target itself does not have to exist; existence and
    /// type checks are the caller's responsibility.
    pub fn resolve(&self, relative: &str) -> Result<ResolvedPath> {
        let trimmed = relative.trim();
        if trimmed.starts_with('~') || Path::new(trimmed).is_absolute() {
            return Err(SandboxError::InvalidPath(relative.to_string()));
        }

        let resolved = resolve_unchecked(&self.base.join(trimmed))?;

        // Component-wise containment, never string-prefix comparison: a
        // sibling directory such as `/base-evil` must not pass for `/base`.
        if resolved != self.base && !resolved.starts_with(&self.base) {
            log::warn!(
                "rejected sandbox escape: {relative:?} resolved to {}",
                resolved.display()
            );
            return Err(SandboxError::Escape(relative.to_string()));
        }

        Ok(ResolvedPath {
            path: resolved,
            input: trimmed.to_string(),
        })
    }
}

/// Resolve a path without containment checks.
///
/// Walks the path left to right, canonicalizing the longest existing prefix
/// so symlinks in existing components are followed, while `.` and `..`
/// segments under missing components are normalized lexically. `..` pops are
/// safe here because the accumulated prefix is already symlink-free.
fn resolve_unchecked(joined: &Path) -> Result<PathBuf> {
    let mut resolved = PathBuf::new();
    let mut missing = false;
    for component in joined.components() {
        match component {
            Component::Prefix(prefix) => resolved.push(prefix.as_os_str()),
            Component::RootDir => resolved.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
                // A pop can land back on existing territory; recheck so
                // symlinks in later components are still resolved.
                missing = !resolved.exists();
            }
            Component::Normal(name) => {
                resolved.push(name);
                if !missing {
                    match resolved.canonicalize() {
                        Ok(canonical) => resolved = canonical,
                        Err(err) if err.kind() == ErrorKind::NotFound => missing = true,
                        Err(err) => return Err(err.into()),
                    }
                }
            }
        }
    }
    Ok(resolved)
}

/// Render `path` relative to `base` with forward-slash separators.
///
/// Falls back to the full path when `path` is not under `base`. Callers only
/// pass sandbox-resolved paths here; this is display logic, not a security
/// boundary.
pub fn relative_display(base: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(base).unwrap_or(path);
    let display = rel.to_string_lossy().replace('\\', "/");
    if display.is_empty() {
        ".".to_string()
    } else {
        display
    }
}
