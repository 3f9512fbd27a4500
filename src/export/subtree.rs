//! Subtree export: recursive copy of a group into a new container file.
//!
//! Every child of the source group (dimensions, nested groups, datasets with
//! their values, and attributes at each level) is copied into the root of a
//! freshly created file, preserving names, structure and enumeration order.
//! The copy is all-or-nothing from the caller's perspective; a mid-copy
//! failure leaves the partially written destination in place.

use std::collections::HashMap;
use std::path::PathBuf;

use netcdf::types::{FloatType, IntType, NcVariableType};

use crate::container::{expand_user, ContainerHandle};
use crate::error::{HaloclineError, Result};

use super::{ensure_extension, CONTAINER_EXTENSIONS, DEFAULT_CONTAINER_EXTENSION};

/// Copy the group at `source_group_path` into a new container file.
///
/// Returns the destination path actually written (after extension
/// defaulting).
pub fn export(
    handle: &ContainerHandle,
    source_group_path: &str,
    dest_raw: &str,
) -> Result<PathBuf> {
    let dest = ensure_extension(
        expand_user(dest_raw),
        CONTAINER_EXTENSIONS,
        DEFAULT_CONTAINER_EXTENSION,
    );

    let source_root = handle
        .file()
        .root()
        .ok_or_else(|| HaloclineError::Container("container has no root group".to_string()))?;

    let segments: Vec<&str> = source_group_path
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    let mut out = netcdf::create(&dest)
        .map_err(|e| HaloclineError::write_failed(dest.clone(), e.to_string()))?;

    copy_from(&source_root, &segments, source_group_path, &mut out)?;

    tracing::info!(
        "Exported subtree {} to {}",
        source_group_path,
        dest.display()
    );
    Ok(dest)
}

/// Walk down to the source group and copy its children into the destination
/// root. `netcdf::Group` borrows its parent, so the walk recurses.
fn copy_from(
    group: &netcdf::Group<'_>,
    segments: &[&str],
    full_path: &str,
    out: &mut netcdf::FileMut,
) -> Result<()> {
    match segments.split_first() {
        None => {
            let mut dest_root = out.root_mut().ok_or_else(|| {
                HaloclineError::Container("destination has no root group".to_string())
            })?;
            let mut dims_in_scope = HashMap::new();
            copy_children(group, &mut dest_root, &mut dims_in_scope)
        }
        Some((head, rest)) => {
            let child = group
                .groups()
                .find(|g| g.name() == *head)
                .ok_or_else(|| HaloclineError::path_not_found(full_path))?;
            copy_from(&child, rest, full_path, out)
        }
    }
}

/// Copy dimensions, datasets and nested groups of `src` into `dest`.
///
/// `dims_in_scope` maps dimension names already materialized along the
/// destination chain to their lengths. Dimensions a dataset inherits from an
/// ancestor outside the exported subtree are created at the level where they
/// are first needed, and a subgroup dimension shadowing an ancestor's name
/// with a different length is created in the subgroup so its variables bind
/// to the right extent.
fn copy_children(
    src: &netcdf::Group<'_>,
    dest: &mut netcdf::GroupMut<'_>,
    dims_in_scope: &mut HashMap<String, usize>,
) -> Result<()> {
    for dim in src.dimensions() {
        materialize_dim(dest, dims_in_scope, &dim.name(), dim.len())?;
    }

    for var in src.variables() {
        for dim in var.dimensions() {
            materialize_dim(dest, dims_in_scope, &dim.name(), dim.len())?;
        }
        copy_variable(&var, dest)?;
    }

    // Destination groups are created before their children; each nested
    // scope gets its own view of the dimensions materialized so far.
    for sub in src.groups() {
        let sub_name = sub.name().to_string();
        let mut dest_sub = dest.add_group(&sub_name)?;
        for (name, value) in attribute_values(sub.attributes())? {
            dest_sub.add_attribute(&name, value)?;
        }
        let mut nested_scope = dims_in_scope.clone();
        copy_children(&sub, &mut dest_sub, &mut nested_scope)?;
    }

    Ok(())
}

/// Create `name` in `dest` unless a dimension of that name and length is
/// already in scope.
fn materialize_dim(
    dest: &mut netcdf::GroupMut<'_>,
    dims_in_scope: &mut HashMap<String, usize>,
    name: &str,
    len: usize,
) -> Result<()> {
    match dims_in_scope.get(name) {
        Some(&in_scope) if in_scope == len => Ok(()),
        _ => {
            dest.add_dimension(name, len)?;
            dims_in_scope.insert(name.to_string(), len);
            Ok(())
        }
    }
}

fn copy_variable(src: &netcdf::Variable<'_>, dest: &mut netcdf::GroupMut<'_>) -> Result<()> {
    let name = src.name().to_string();
    let dim_names: Vec<String> = src
        .dimensions()
        .iter()
        .map(|d: &netcdf::Dimension<'_>| d.name().to_string())
        .collect();
    let dims: Vec<&str> = dim_names.iter().map(String::as_str).collect();

    match src.vartype() {
        NcVariableType::Float(FloatType::F64) => copy_values::<f64>(src, dest, &name, &dims),
        NcVariableType::Float(FloatType::F32) => copy_values::<f32>(src, dest, &name, &dims),
        NcVariableType::Int(IntType::I64) => copy_values::<i64>(src, dest, &name, &dims),
        NcVariableType::Int(IntType::I32) => copy_values::<i32>(src, dest, &name, &dims),
        NcVariableType::Int(IntType::I16) => copy_values::<i16>(src, dest, &name, &dims),
        NcVariableType::Int(IntType::I8) => copy_values::<i8>(src, dest, &name, &dims),
        NcVariableType::Int(IntType::U64) => copy_values::<u64>(src, dest, &name, &dims),
        NcVariableType::Int(IntType::U32) => copy_values::<u32>(src, dest, &name, &dims),
        NcVariableType::Int(IntType::U16) => copy_values::<u16>(src, dest, &name, &dims),
        NcVariableType::Int(IntType::U8) => copy_values::<u8>(src, dest, &name, &dims),
        other => Err(HaloclineError::source_unreadable(
            name,
            format!("unsupported element type for copy: {:?}", other),
        )),
    }
}

fn copy_values<T: netcdf::NcTypeDescriptor + Copy>(
    src: &netcdf::Variable<'_>,
    dest: &mut netcdf::GroupMut<'_>,
    name: &str,
    dims: &[&str],
) -> Result<()> {
    let mut var = dest.add_variable::<T>(name, dims)?;

    let values: Vec<T> = src
        .get_values(..)
        .map_err(|e| HaloclineError::source_unreadable(name, e.to_string()))?;
    var.put_values(&values, ..)?;

    for (attr_name, value) in attribute_values(src.attributes())? {
        var.put_attribute(&attr_name, value)?;
    }
    Ok(())
}

fn attribute_values<'a>(
    attrs: impl Iterator<Item = netcdf::Attribute<'a>>,
) -> Result<Vec<(String, netcdf::AttributeValue)>> {
    let mut out = Vec::new();
    for attr in attrs {
        let value = attr.value()?;
        out.push((attr.name().to_string(), value));
    }
    Ok(out)
}
