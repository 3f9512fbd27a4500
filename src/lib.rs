//! Halocline - a terminal-based browser for hierarchical scientific data
//! containers.
//!
//! Halocline provides an interactive terminal interface for exploring the
//! group/dataset tree of netCDF-4/HDF5 container files one level at a time,
//! inspecting dataset metadata, and exporting a subtree to a new container
//! file or a dataset to a delimited table.
//!
//! # Features
//!
//! - Directory-style navigation of the container tree
//! - Dataset metadata and attribute inspection
//! - Subtree export to a new container file
//! - Dataset flattening to CSV
//! - Vim-style keyboard shortcuts
//! - Gruvbox color themes
//!
//! # Example
//!
//! ```ignore
//! use halocline::navigator::Navigator;
//!
//! let mut nav = Navigator::new();
//! nav.open_file("data.nc")?;
//! println!("{} entries under {}", nav.entries().len(), nav.path());
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod app;
pub mod container;
pub mod error;
pub mod export;
pub mod listing;
pub mod navigator;
pub mod path;
pub mod prompt;
pub mod ui;

pub use error::{HaloclineError, Result};
