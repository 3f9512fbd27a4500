//! Directory-style listing of one level of the container tree.
//!
//! Unlike an expand/collapse tree view, the browser shows a single level at
//! a time: a `../` pseudo-entry (when not at the root) followed by the
//! children of the current group in the container's enumeration order. The
//! listing is rebuilt in full on every navigation event.

use crate::container::{ContainerHandle, NodeKind};
use crate::error::Result;
use crate::path as node_path;

/// One navigable item at the current level.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// The `../` pseudo-entry; present iff the current path is not the root.
    Parent,
    /// A child group.
    Group {
        /// Group name.
        name: String,
    },
    /// A child dataset.
    Dataset {
        /// Dataset name.
        name: String,
        /// Dataset shape.
        shape: Vec<usize>,
        /// Element type.
        dtype: String,
    },
}

impl Entry {
    /// Name of the underlying node; `None` for the parent pseudo-entry.
    pub fn name(&self) -> Option<&str> {
        match self {
            Entry::Parent => None,
            Entry::Group { name } => Some(name),
            Entry::Dataset { name, .. } => Some(name),
        }
    }

    /// Kind of the underlying node; `None` for the parent pseudo-entry.
    pub fn kind(&self) -> Option<NodeKind> {
        match self {
            Entry::Parent => None,
            Entry::Group { .. } => Some(NodeKind::Group),
            Entry::Dataset { .. } => Some(NodeKind::Dataset),
        }
    }

    /// Display string with icon and dataset metadata suffix.
    pub fn display_name(&self) -> String {
        match self {
            Entry::Parent => "📁 ../".to_string(),
            Entry::Group { name } => format!("📁 {}/", name),
            Entry::Dataset { name, shape, dtype } => {
                format!("📄 {} (Shape: {:?}, Type: {})", name, shape, dtype)
            }
        }
    }
}

/// Build the entry list for the group at `path`.
///
/// Pure function of the handle's tree and the path; propagates a lookup
/// error when the path no longer exists (stale path after external file
/// mutation).
pub fn build(handle: &ContainerHandle, path: &str) -> Result<Vec<Entry>> {
    let children = handle.children_of(path)?;

    let mut entries = Vec::with_capacity(children.len() + 1);
    if !node_path::is_root(path) {
        entries.push(Entry::Parent);
    }

    for child in children {
        match child.kind {
            NodeKind::Group => entries.push(Entry::Group { name: child.name }),
            NodeKind::Dataset => entries.push(Entry::Dataset {
                name: child.name,
                shape: child.shape.unwrap_or_default(),
                dtype: child.dtype.unwrap_or_default(),
            }),
        }
    }

    Ok(entries)
}
