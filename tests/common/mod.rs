//! Shared fixtures: small container files written with the netcdf crate.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create `sample.nc` inside `dir`:
///
/// ```text
/// /
/// ├── g1/            (attribute station = "alpha")
/// │   ├── sub/       (attribute level = 2)
/// │   │   └── d3     shape (2,), f64
/// │   └── d2         shape (4,), f64, attribute units = "m"
/// └── d1             shape (10,), f64
/// ```
pub fn sample_container(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("sample.nc");
    write_sample(&path).expect("failed to write sample container");
    path
}

fn write_sample(path: &Path) -> Result<(), netcdf::Error> {
    let mut file = netcdf::create(path)?;
    file.add_attribute("title", "halocline test fixture")?;

    {
        let mut g1 = file.add_group("g1")?;
        g1.add_attribute("station", "alpha")?;
        g1.add_dimension("y", 4)?;

        let mut d2 = g1.add_variable::<f64>("d2", &["y"])?;
        d2.put_values(&[1.0, 2.0, 3.0, 4.0], ..)?;
        d2.put_attribute("units", "m")?;

        let mut sub = g1.add_group("sub")?;
        sub.add_attribute("level", 2i32)?;
        sub.add_dimension("z", 2)?;
        let mut d3 = sub.add_variable::<f64>("d3", &["z"])?;
        d3.put_values(&[5.0, 6.0], ..)?;
    }

    file.add_dimension("x", 10)?;
    let mut d1 = file.add_variable::<f64>("d1", &["x"])?;
    let values: Vec<f64> = (0..10).map(f64::from).collect();
    d1.put_values(&values, ..)?;

    Ok(())
}

/// Create `cube.nc` inside `dir`, holding one dataset `cube` of shape
/// (3, 4, 5) with values 0..59 in row-major order.
pub fn cube_container(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("cube.nc");
    write_cube(&path).expect("failed to write cube container");
    path
}

fn write_cube(path: &Path) -> Result<(), netcdf::Error> {
    let mut file = netcdf::create(path)?;
    file.add_dimension("a", 3)?;
    file.add_dimension("b", 4)?;
    file.add_dimension("c", 5)?;

    let mut cube = file.add_variable::<f64>("cube", &["a", "b", "c"])?;
    let values: Vec<f64> = (0..60).map(f64::from).collect();
    cube.put_values(&values, ..)?;

    Ok(())
}
