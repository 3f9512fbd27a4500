//! Error types for Halocline.
//!
//! This module provides a unified error handling approach using `thiserror`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Halocline operations.
pub type Result<T> = std::result::Result<T, HaloclineError>;

/// Errors that can occur in Halocline.
#[derive(Debug, Error)]
pub enum HaloclineError {
    /// File does not exist on disk.
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Path exists but is not a regular file.
    #[error("Path is not a file: {path}")]
    NotAFile { path: PathBuf },

    /// File exists but cannot be parsed as a container.
    #[error("Not a valid container file: {path} ({reason})")]
    FormatInvalid { path: PathBuf, reason: String },

    /// Filesystem refused access.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Node path not found in the container tree.
    #[error("Path not found in container: {path}")]
    PathNotFound { path: String },

    /// No usable selection for the requested operation.
    #[error("{0}")]
    NoSelection(String),

    /// Selection exists but is the wrong kind of node.
    #[error("Please select a {expected} (selected: {actual})")]
    WrongKind {
        expected: &'static str,
        actual: String,
    },

    /// Export destination could not be created or written.
    #[error("Export failed: cannot write {path} ({reason})")]
    WriteFailed { path: PathBuf, reason: String },

    /// Export source could not be read back.
    #[error("Export failed: cannot read {path} ({reason})")]
    SourceUnreadable { path: String, reason: String },

    /// Requested a parent move while already at the root.
    #[error("Already at the container root")]
    AtRoot,

    /// No file is currently open.
    #[error("No file opened")]
    NoFileOpen,

    /// Container backend error.
    #[error("Container error: {0}")]
    Container(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal error.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl HaloclineError {
    /// Create a FormatInvalid error.
    pub fn format_invalid(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FormatInvalid {
            path,
            reason: reason.into(),
        }
    }

    /// Create a PathNotFound error.
    pub fn path_not_found(path: impl Into<String>) -> Self {
        Self::PathNotFound { path: path.into() }
    }

    /// Create a WriteFailed error.
    pub fn write_failed(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::WriteFailed {
            path,
            reason: reason.into(),
        }
    }

    /// Create a SourceUnreadable error.
    pub fn source_unreadable(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SourceUnreadable {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl From<netcdf::Error> for HaloclineError {
    fn from(err: netcdf::Error) -> Self {
        Self::Container(err.to_string())
    }
}
