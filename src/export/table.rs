//! Table export: flatten a dataset into a 2-D delimited table.
//!
//! The flattening policy is a closed table keyed by rank, each arm a pure
//! reshape: rank-1 data becomes a single named column, rank-2 data is
//! written as stored, and higher ranks collapse all leading dimensions into
//! rows while the last dimension stays as columns. This is a deterministic
//! simplification, not a general N-D serializer.

use std::path::PathBuf;

use crate::container::ContainerHandle;
use crate::container::expand_user;
use crate::error::{HaloclineError, Result};
use crate::path as node_path;

use super::{ensure_extension, DEFAULT_TABLE_EXTENSION, TABLE_EXTENSIONS};

/// Flattened row/column counts for a dataset shape, keyed by rank.
pub fn flattened_dims(shape: &[usize]) -> (usize, usize) {
    match shape.len() {
        0 => (1, 1),
        1 => (shape[0], 1),
        2 => (shape[0], shape[1]),
        n => (shape[..n - 1].iter().product(), shape[n - 1]),
    }
}

/// Header labels for the flattened table.
///
/// The single column of rank-0/1 data is named after the dataset; wider
/// tables get 0-based integer labels.
pub fn header_labels(dataset_name: &str, shape: &[usize]) -> Vec<String> {
    if shape.len() <= 1 {
        vec![dataset_name.to_string()]
    } else {
        let (_, cols) = flattened_dims(shape);
        (0..cols).map(|c| c.to_string()).collect()
    }
}

/// Read the dataset at `dataset_path` in full and write it as a delimited
/// table (header row, one record per flattened row, no index column).
///
/// Returns the destination path actually written (after extension
/// defaulting).
pub fn export(handle: &ContainerHandle, dataset_path: &str, dest_raw: &str) -> Result<PathBuf> {
    let dest = ensure_extension(
        expand_user(dest_raw),
        TABLE_EXTENSIONS,
        DEFAULT_TABLE_EXTENSION,
    );

    let data = handle.read_dataset(dataset_path)?;
    let name = node_path::leaf_name(dataset_path).unwrap_or("data");
    let shape = data.shape().to_vec();
    let (rows, cols) = flattened_dims(&shape);

    let mut writer = csv::Writer::from_path(&dest)
        .map_err(|e| HaloclineError::write_failed(dest.clone(), e.to_string()))?;

    writer
        .write_record(header_labels(name, &shape))
        .map_err(|e| HaloclineError::write_failed(dest.clone(), e.to_string()))?;

    // `ArrayD` from the container layer is in standard (row-major) layout,
    // so a flat iteration walks the collapsed rows in order.
    let flat: Vec<f64> = data.iter().copied().collect();
    for row in 0..rows {
        let record: Vec<String> = (0..cols)
            .map(|col| format_value(flat[row * cols + col]))
            .collect();
        writer
            .write_record(&record)
            .map_err(|e| HaloclineError::write_failed(dest.clone(), e.to_string()))?;
    }

    writer
        .flush()
        .map_err(|e| HaloclineError::write_failed(dest.clone(), e.to_string()))?;

    tracing::info!("Exported dataset {} to {}", dataset_path, dest.display());
    Ok(dest)
}

fn format_value(value: f64) -> String {
    format!("{}", value)
}
