//! Sandbox-enforcing path resolution.
//!
//! Every caller-facing operation in intel-fs accepts relative paths only and
//! resolves them through [`Sandbox::resolve`], which guarantees the result is
//! the configured base directory or a descendant of it. Absolute paths,
//! home-relative paths, and any escape through `..` segments or symlinks are
//! rejected before the caller touches the filesystem.

mod error;
mod resolver;

pub use error::{Result, SandboxError};
pub use resolver::{relative_display, ResolvedPath, Sandbox, BASE_DIR_ENV};
