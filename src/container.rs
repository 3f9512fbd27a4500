//! Read-only container access.
//!
//! A [`ContainerHandle`] owns one open `netcdf::File` and exposes the
//! container tree to the rest of the application as plain data: node lookup
//! by path, ordered child enumeration, and full dataset reads. Only the
//! netCDF-4/HDF5 flavor is accepted; classic netCDF-3 files have no group
//! tree and are rejected at open time.

use crate::error::{HaloclineError, Result};
use crate::path as node_path;
use ndarray::{ArrayD, IxDyn};
use netcdf::types::{FloatType, IntType, NcVariableType};
use std::path::{Path, PathBuf};

/// Kind of node in the container tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A group (directory analogue).
    Group,
    /// A dataset (leaf holding shaped, typed array data).
    Dataset,
}

impl NodeKind {
    /// Human-readable kind name.
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Group => "group",
            NodeKind::Dataset => "dataset",
        }
    }
}

/// One child of a group, in the container's enumeration order.
#[derive(Debug, Clone)]
pub struct ChildInfo {
    /// Child name (single path segment).
    pub name: String,
    /// Group or dataset.
    pub kind: NodeKind,
    /// Shape, present for datasets.
    pub shape: Option<Vec<usize>>,
    /// Element type, present for datasets.
    pub dtype: Option<String>,
}

/// Metadata snapshot of a resolved node.
///
/// Holds no live references into the file, so it can outlive navigation
/// state changes (it backs the info overlay).
#[derive(Debug, Clone)]
pub struct NodeInfo {
    /// Node name (last path segment, or the file name for the root).
    pub name: String,
    /// Group or dataset.
    pub kind: NodeKind,
    /// Shape, present for datasets.
    pub shape: Option<Vec<usize>>,
    /// Element type, present for datasets.
    pub dtype: Option<String>,
    /// Total element count, present for datasets.
    pub size: Option<usize>,
    /// Attributes attached to the node, in enumeration order.
    pub attributes: Vec<(String, String)>,
}

/// Expand `~` and `~/...` and make the path absolute.
///
/// Relative paths are resolved against the current working directory. The
/// result is not required to exist; callers decide how to treat missing
/// targets.
pub fn expand_user(raw: &str) -> PathBuf {
    let expanded = if raw == "~" {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from(raw))
    } else if let Some(rest) = raw.strip_prefix("~/") {
        match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => PathBuf::from(raw),
        }
    } else {
        PathBuf::from(raw)
    };

    if expanded.is_absolute() {
        expanded
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    }
}

/// A read-only handle to one open container file.
///
/// The underlying file resource is released when the handle is dropped;
/// the Navigator holds at most one handle at a time.
#[derive(Debug)]
pub struct ContainerHandle {
    file: netcdf::File,
    fs_path: PathBuf,
}

impl ContainerHandle {
    /// Open a container file.
    ///
    /// The path is expanded (`~` shorthand) and resolved to an absolute path
    /// before opening.
    pub fn open(raw_path: &str) -> Result<Self> {
        let expanded = expand_user(raw_path);

        if !expanded.exists() {
            return Err(HaloclineError::FileNotFound { path: expanded });
        }
        if !expanded.is_file() {
            return Err(HaloclineError::NotAFile { path: expanded });
        }

        let fs_path = std::fs::canonicalize(&expanded).map_err(|e| match e.kind() {
            std::io::ErrorKind::PermissionDenied => HaloclineError::PermissionDenied {
                path: expanded.clone(),
            },
            _ => HaloclineError::Io(e),
        })?;

        let file = netcdf::open(&fs_path)
            .map_err(|e| HaloclineError::format_invalid(fs_path.clone(), e.to_string()))?;

        // Classic netCDF-3 has no group tree; only the HDF5-based flavor fits
        // the hierarchical browsing model.
        if file.root().is_none() {
            return Err(HaloclineError::format_invalid(
                fs_path,
                "classic netCDF without group support",
            ));
        }

        tracing::info!("Opened container {}", fs_path.display());
        Ok(Self { file, fs_path })
    }

    /// Filesystem path of the open file.
    pub fn fs_path(&self) -> &Path {
        &self.fs_path
    }

    /// File name of the open file, for display.
    pub fn file_name(&self) -> String {
        self.fs_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.fs_path.display().to_string())
    }

    pub(crate) fn file(&self) -> &netcdf::File {
        &self.file
    }

    /// Resolve a node path to a metadata snapshot.
    ///
    /// The root path resolves to the top-level group.
    pub fn resolve(&self, path: &str) -> Result<NodeInfo> {
        let segments = split_segments(path);
        let root = self.root_group()?;

        let Some((leaf, parents)) = segments.split_last() else {
            // Root node: the top-level group.
            return Ok(NodeInfo {
                name: self.file_name(),
                kind: NodeKind::Group,
                shape: None,
                dtype: None,
                size: None,
                attributes: collect_attributes(self.file.attributes()),
            });
        };

        descend(&root, parents, path, &mut |group| {
            if let Some(var) = group.variables().find(|v| v.name() == *leaf) {
                let shape = variable_shape(&var);
                let size = shape.iter().product::<usize>();
                return Ok(NodeInfo {
                    name: leaf.to_string(),
                    kind: NodeKind::Dataset,
                    dtype: Some(dtype_string(&var.vartype())),
                    shape: Some(shape),
                    size: Some(size),
                    attributes: collect_attributes(var.attributes()),
                });
            }
            if let Some(sub) = group.groups().find(|g| g.name() == *leaf) {
                return Ok(NodeInfo {
                    name: leaf.to_string(),
                    kind: NodeKind::Group,
                    shape: None,
                    dtype: None,
                    size: None,
                    attributes: collect_attributes(sub.attributes()),
                });
            }
            Err(HaloclineError::path_not_found(path))
        })
    }

    /// Enumerate the children of the group at `path`.
    ///
    /// Order is the container's native enumeration: child groups in file
    /// order, then datasets in file order.
    pub fn children_of(&self, path: &str) -> Result<Vec<ChildInfo>> {
        let segments = split_segments(path);
        let root = self.root_group()?;

        descend(&root, &segments, path, &mut |group| {
            let mut children = Vec::new();
            for sub in group.groups() {
                children.push(ChildInfo {
                    name: sub.name(),
                    kind: NodeKind::Group,
                    shape: None,
                    dtype: None,
                });
            }
            for var in group.variables() {
                children.push(ChildInfo {
                    name: var.name(),
                    kind: NodeKind::Dataset,
                    shape: Some(variable_shape(&var)),
                    dtype: Some(dtype_string(&var.vartype())),
                });
            }
            Ok(children)
        })
    }

    /// Read the full contents of the dataset at `path` as `f64`.
    ///
    /// All numeric element types are widened to `f64`; character and string
    /// datasets are reported as unreadable.
    pub fn read_dataset(&self, path: &str) -> Result<ArrayD<f64>> {
        let segments = split_segments(path);
        let root = self.root_group()?;

        let Some((leaf, parents)) = segments.split_last() else {
            return Err(HaloclineError::WrongKind {
                expected: "dataset",
                actual: "group".to_string(),
            });
        };

        descend(&root, parents, path, &mut |group| {
            let var = group
                .variables()
                .find(|v| v.name() == *leaf)
                .ok_or_else(|| HaloclineError::path_not_found(path))?;
            read_values(&var, path)
        })
    }

    fn root_group(&self) -> Result<netcdf::Group<'_>> {
        // Checked at open time; a missing root here means the file changed
        // underneath us.
        self.file
            .root()
            .ok_or_else(|| HaloclineError::Container("container has no root group".to_string()))
    }
}

/// Split a node path into its segments; the root yields no segments.
fn split_segments(path: &str) -> Vec<&str> {
    if node_path::is_root(path) {
        Vec::new()
    } else {
        path.split('/').filter(|s| !s.is_empty()).collect()
    }
}

/// Walk down `segments` from `group` and apply `f` to the target group.
///
/// `netcdf::Group` borrows its parent, so the walk recurses instead of
/// returning the resolved group to the caller.
fn descend<T>(
    group: &netcdf::Group<'_>,
    segments: &[&str],
    full_path: &str,
    f: &mut dyn FnMut(&netcdf::Group<'_>) -> Result<T>,
) -> Result<T> {
    match segments.split_first() {
        None => f(group),
        Some((head, rest)) => {
            let child = group
                .groups()
                .find(|g| g.name() == *head)
                .ok_or_else(|| HaloclineError::path_not_found(full_path))?;
            descend(&child, rest, full_path, f)
        }
    }
}

pub(crate) fn variable_shape(var: &netcdf::Variable<'_>) -> Vec<usize> {
    var.dimensions()
        .iter()
        .map(|d: &netcdf::Dimension<'_>| d.len())
        .collect()
}

/// Short element-type name for display (`f64`, `i32`, ...).
pub(crate) fn dtype_string(vartype: &NcVariableType) -> String {
    match vartype {
        NcVariableType::Float(FloatType::F32) => "f32".to_string(),
        NcVariableType::Float(FloatType::F64) => "f64".to_string(),
        NcVariableType::Int(IntType::I8) => "i8".to_string(),
        NcVariableType::Int(IntType::I16) => "i16".to_string(),
        NcVariableType::Int(IntType::I32) => "i32".to_string(),
        NcVariableType::Int(IntType::I64) => "i64".to_string(),
        NcVariableType::Int(IntType::U8) => "u8".to_string(),
        NcVariableType::Int(IntType::U16) => "u16".to_string(),
        NcVariableType::Int(IntType::U32) => "u32".to_string(),
        NcVariableType::Int(IntType::U64) => "u64".to_string(),
        NcVariableType::Char => "char".to_string(),
        NcVariableType::String => "string".to_string(),
        other => format!("{:?}", other)
            .replace("NcVariableType::", "")
            .to_lowercase(),
    }
}

pub(crate) fn collect_attributes<'a>(
    attrs: impl Iterator<Item = netcdf::Attribute<'a>>,
) -> Vec<(String, String)> {
    attrs
        .map(|attr| (attr.name().to_string(), attr_value_to_string(&attr)))
        .collect()
}

pub(crate) fn attr_value_to_string(attr: &netcdf::Attribute<'_>) -> String {
    use netcdf::AttributeValue;

    match attr.value() {
        Ok(AttributeValue::Uchar(v)) => format!("{}", v),
        Ok(AttributeValue::Schar(v)) => format!("{}", v),
        Ok(AttributeValue::Ushort(v)) => format!("{}", v),
        Ok(AttributeValue::Short(v)) => format!("{}", v),
        Ok(AttributeValue::Uint(v)) => format!("{}", v),
        Ok(AttributeValue::Int(v)) => format!("{}", v),
        Ok(AttributeValue::Ulonglong(v)) => format!("{}", v),
        Ok(AttributeValue::Longlong(v)) => format!("{}", v),
        Ok(AttributeValue::Float(v)) => format!("{}", v),
        Ok(AttributeValue::Double(v)) => format!("{}", v),
        Ok(AttributeValue::Str(v)) => v,
        Ok(AttributeValue::Uchars(v)) => format!("{:?}", v),
        Ok(AttributeValue::Schars(v)) => format!("{:?}", v),
        Ok(AttributeValue::Ushorts(v)) => format!("{:?}", v),
        Ok(AttributeValue::Shorts(v)) => format!("{:?}", v),
        Ok(AttributeValue::Uints(v)) => format!("{:?}", v),
        Ok(AttributeValue::Ints(v)) => format!("{:?}", v),
        Ok(AttributeValue::Ulonglongs(v)) => format!("{:?}", v),
        Ok(AttributeValue::Longlongs(v)) => format!("{:?}", v),
        Ok(AttributeValue::Floats(v)) => format!("{:?}", v),
        Ok(AttributeValue::Doubles(v)) => format!("{:?}", v),
        Ok(AttributeValue::Strs(v)) => v.join(", "),
        Err(_) => format!("{:?}", attr),
    }
}

/// Read a variable's full contents into an `f64` array.
fn read_values(var: &netcdf::Variable<'_>, path: &str) -> Result<ArrayD<f64>> {
    let shape = variable_shape(var);
    let vartype = var.vartype();

    let from_vec = |v: Vec<f64>| -> Result<ArrayD<f64>> {
        ArrayD::from_shape_vec(IxDyn(&shape), v)
            .map_err(|e| HaloclineError::source_unreadable(path, e.to_string()))
    };

    match vartype {
        NcVariableType::Float(FloatType::F64) => {
            let values: Vec<f64> = var
                .get_values(..)
                .map_err(|e| HaloclineError::source_unreadable(path, e.to_string()))?;
            from_vec(values)
        }
        NcVariableType::Float(FloatType::F32) => {
            let values: Vec<f32> = var
                .get_values(..)
                .map_err(|e| HaloclineError::source_unreadable(path, e.to_string()))?;
            from_vec(values.into_iter().map(|x| x as f64).collect())
        }
        NcVariableType::Int(IntType::I64) => {
            let values: Vec<i64> = var
                .get_values(..)
                .map_err(|e| HaloclineError::source_unreadable(path, e.to_string()))?;
            from_vec(values.into_iter().map(|x| x as f64).collect())
        }
        NcVariableType::Int(IntType::I32) => {
            let values: Vec<i32> = var
                .get_values(..)
                .map_err(|e| HaloclineError::source_unreadable(path, e.to_string()))?;
            from_vec(values.into_iter().map(|x| x as f64).collect())
        }
        NcVariableType::Int(IntType::I16) => {
            let values: Vec<i16> = var
                .get_values(..)
                .map_err(|e| HaloclineError::source_unreadable(path, e.to_string()))?;
            from_vec(values.into_iter().map(|x| x as f64).collect())
        }
        NcVariableType::Int(IntType::I8) => {
            let values: Vec<i8> = var
                .get_values(..)
                .map_err(|e| HaloclineError::source_unreadable(path, e.to_string()))?;
            from_vec(values.into_iter().map(|x| x as f64).collect())
        }
        NcVariableType::Int(IntType::U64) => {
            let values: Vec<u64> = var
                .get_values(..)
                .map_err(|e| HaloclineError::source_unreadable(path, e.to_string()))?;
            from_vec(values.into_iter().map(|x| x as f64).collect())
        }
        NcVariableType::Int(IntType::U32) => {
            let values: Vec<u32> = var
                .get_values(..)
                .map_err(|e| HaloclineError::source_unreadable(path, e.to_string()))?;
            from_vec(values.into_iter().map(|x| x as f64).collect())
        }
        NcVariableType::Int(IntType::U16) => {
            let values: Vec<u16> = var
                .get_values(..)
                .map_err(|e| HaloclineError::source_unreadable(path, e.to_string()))?;
            from_vec(values.into_iter().map(|x| x as f64).collect())
        }
        NcVariableType::Int(IntType::U8) => {
            let values: Vec<u8> = var
                .get_values(..)
                .map_err(|e| HaloclineError::source_unreadable(path, e.to_string()))?;
            from_vec(values.into_iter().map(|x| x as f64).collect())
        }
        NcVariableType::Char | NcVariableType::String => Err(HaloclineError::source_unreadable(
            path,
            "character/string datasets cannot be exported as a numeric table",
        )),
        other => Err(HaloclineError::source_unreadable(
            path,
            format!("unsupported element type: {:?}", other),
        )),
    }
}
