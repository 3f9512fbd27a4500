//! Node path algebra.
//!
//! Node paths are absolute, `/`-rooted strings identifying a location in the
//! container tree (`"/"`, `"/g1"`, `"/g1/d2"`). They never carry a trailing
//! slash except for the root itself. All functions here are pure string
//! manipulation; no container I/O happens at this level.

use crate::error::{HaloclineError, Result};

/// The root path.
pub const ROOT: &str = "/";

/// Check whether a path is the container root.
pub fn is_root(path: &str) -> bool {
    path == ROOT
}

/// Strip the last segment of a path, returning the parent path.
///
/// Returns [`HaloclineError::AtRoot`] when the path is already the root.
pub fn parent_of(path: &str) -> Result<String> {
    if is_root(path) {
        return Err(HaloclineError::AtRoot);
    }

    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) | None => Ok(ROOT.to_string()),
        Some(idx) => Ok(trimmed[..idx].to_string()),
    }
}

/// Append a child name to a path.
///
/// A trailing `/` on `name` (group entries are often displayed as `name/`)
/// is stripped before joining.
pub fn child_of(path: &str, name: &str) -> String {
    let name = name.trim_end_matches('/');
    if is_root(path) {
        format!("/{}", name)
    } else {
        format!("{}/{}", path.trim_end_matches('/'), name)
    }
}

/// Return the last segment of a path, or `None` at the root.
pub fn leaf_name(path: &str) -> Option<&str> {
    if is_root(path) {
        return None;
    }
    path.trim_end_matches('/').rsplit('/').next()
}
