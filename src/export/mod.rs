//! Export engines: subtree copy and dataset-to-table flattening.

pub mod subtree;
pub mod table;

use std::path::PathBuf;

/// Extensions accepted as container files for export destinations.
pub const CONTAINER_EXTENSIONS: &[&str] = &["nc", "nc4", "netcdf", "h5", "hdf5"];
/// Default extension for container export destinations.
pub const DEFAULT_CONTAINER_EXTENSION: &str = "nc";
/// Extensions accepted as table files for export destinations.
pub const TABLE_EXTENSIONS: &[&str] = &["csv"];
/// Default extension for table export destinations.
pub const DEFAULT_TABLE_EXTENSION: &str = "csv";

/// Append `default_ext` when `path` lacks one of the recognized extensions.
///
/// A recognized extension supplied by the user is preserved as-is; anything
/// else (including no extension at all) gets the default appended.
pub fn ensure_extension(path: PathBuf, recognized: &[&str], default_ext: &str) -> PathBuf {
    let has_recognized = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| recognized.iter().any(|r| r.eq_ignore_ascii_case(e)))
        .unwrap_or(false);

    if has_recognized {
        path
    } else {
        let mut raw = path.into_os_string();
        raw.push(".");
        raw.push(default_ext);
        PathBuf::from(raw)
    }
}
