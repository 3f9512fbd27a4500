//! Subtree and table export against real container files.

mod common;

use halocline::navigator::Navigator;
use halocline::HaloclineError;
use tempfile::TempDir;

fn open_fixture(path: &std::path::Path) -> Navigator {
    let mut nav = Navigator::new();
    nav.open_file(path.to_str().unwrap()).expect("open fixture");
    nav
}

#[test]
fn rank_1_dataset_becomes_a_single_named_column() {
    let dir = TempDir::new().unwrap();
    let sample = common::sample_container(&dir);
    let mut nav = open_fixture(&sample);

    nav.jump_bottom(); // d1, shape (10,)
    let source = nav.table_source().unwrap();
    assert_eq!(source, "/d1");

    let dest_raw = dir.path().join("flat").to_str().unwrap().to_string();
    let written = nav.export_table(&source, &dest_raw).unwrap();
    assert_eq!(written.extension().and_then(|e| e.to_str()), Some("csv"));

    let text = std::fs::read_to_string(&written).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 11); // header + 10 rows
    assert_eq!(lines[0], "d1");
    assert_eq!(lines[1], "0");
    assert_eq!(lines[10], "9");
    // No index column: every record is a single field.
    assert!(lines.iter().all(|l| !l.contains(',')));
}

#[test]
fn rank_3_dataset_collapses_leading_dims_into_rows() {
    let dir = TempDir::new().unwrap();
    let cube = common::cube_container(&dir);
    let nav = open_fixture(&cube);

    let dest_raw = dir.path().join("cube_table.csv").to_str().unwrap().to_string();
    let written = nav.export_table("/cube", &dest_raw).unwrap();

    let text = std::fs::read_to_string(&written).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 13); // header + 3*4 rows
    assert_eq!(lines[0], "0,1,2,3,4");
    assert_eq!(lines[1], "0,1,2,3,4");
    assert_eq!(lines[2], "5,6,7,8,9");
    assert_eq!(lines[12], "55,56,57,58,59");
}

#[test]
fn table_export_of_a_group_is_a_kind_error() {
    let dir = TempDir::new().unwrap();
    let sample = common::sample_container(&dir);
    let nav = open_fixture(&sample);

    // Selection 0 is the group g1.
    let err = nav.table_source().unwrap_err();
    assert!(matches!(err, HaloclineError::WrongKind { .. }));
}

#[test]
fn subtree_export_at_root_with_a_dataset_selected_fails() {
    let dir = TempDir::new().unwrap();
    let sample = common::sample_container(&dir);
    let mut nav = open_fixture(&sample);

    nav.jump_bottom(); // d1 at the root
    let err = nav.subtree_source().unwrap_err();
    assert!(matches!(err, HaloclineError::NoSelection(_)));

    // State unchanged.
    assert_eq!(nav.path(), "/");
    assert_eq!(nav.selected(), 1);
}

#[test]
fn subtree_source_prefers_the_selected_group() {
    let dir = TempDir::new().unwrap();
    let sample = common::sample_container(&dir);
    let nav = open_fixture(&sample);

    assert_eq!(nav.subtree_source().unwrap(), "/g1");
}

#[test]
fn subtree_source_falls_back_to_the_browsed_group() {
    let dir = TempDir::new().unwrap();
    let sample = common::sample_container(&dir);
    let mut nav = open_fixture(&sample);

    nav.activate_selected().unwrap(); // into /g1
    nav.jump_bottom(); // d2, not a group
    assert_eq!(nav.subtree_source().unwrap(), "/g1");
}

#[test]
fn subtree_export_copies_structure_values_and_attributes() {
    let dir = TempDir::new().unwrap();
    let sample = common::sample_container(&dir);
    let nav = open_fixture(&sample);

    let dest_raw = dir.path().join("exported").to_str().unwrap().to_string();
    let written = nav.export_subtree("/g1", &dest_raw).unwrap();
    assert_eq!(written.extension().and_then(|e| e.to_str()), Some("nc"));

    // Re-open the exported file through the browsing stack.
    let out = open_fixture(&written);
    let children = out.handle().unwrap().children_of("/").unwrap();
    let names: Vec<&str> = children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["sub", "d2"]);

    // Values survive the copy.
    let d2 = out.handle().unwrap().read_dataset("/d2").unwrap();
    assert_eq!(d2.shape(), &[4]);
    let values: Vec<f64> = d2.iter().copied().collect();
    assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0]);

    // Dataset attributes survive.
    let d2_info = out.handle().unwrap().resolve("/d2").unwrap();
    assert!(d2_info
        .attributes
        .iter()
        .any(|(k, v)| k == "units" && v == "m"));

    // Nested group and its attribute survive.
    let sub_info = out.handle().unwrap().resolve("/sub").unwrap();
    assert!(sub_info
        .attributes
        .iter()
        .any(|(k, v)| k == "level" && v == "2"));
    let d3 = out.handle().unwrap().read_dataset("/sub/d3").unwrap();
    let values: Vec<f64> = d3.iter().copied().collect();
    assert_eq!(values, vec![5.0, 6.0]);
}

#[test]
fn export_of_a_nested_group_copies_only_that_subtree() {
    let dir = TempDir::new().unwrap();
    let sample = common::sample_container(&dir);
    let nav = open_fixture(&sample);

    let dest_raw = dir.path().join("sub_only.h5").to_str().unwrap().to_string();
    let written = nav.export_subtree("/g1/sub", &dest_raw).unwrap();
    // A recognized container extension is preserved as-is.
    assert_eq!(written.extension().and_then(|e| e.to_str()), Some("h5"));

    let out = open_fixture(&written);
    let children = out.handle().unwrap().children_of("/").unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].name, "d3");
}

#[test]
fn a_shadowing_dimension_keeps_its_own_length_through_export() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shadow.nc");
    {
        let mut file = netcdf::create(&path).unwrap();
        let mut g = file.add_group("g").unwrap();
        g.add_dimension("x", 10).unwrap();
        let mut outer = g.add_variable::<f64>("outer", &["x"]).unwrap();
        let values: Vec<f64> = (0..10).map(f64::from).collect();
        outer.put_values(&values, ..).unwrap();

        // A subgroup may redefine "x" with a different length; its variables
        // bind to the nearer definition.
        let mut sub = g.add_group("sub").unwrap();
        sub.add_dimension("x", 5).unwrap();
        let mut inner = sub.add_variable::<f64>("inner", &["x"]).unwrap();
        inner.put_values(&[1.0, 2.0, 3.0, 4.0, 5.0], ..).unwrap();
    }
    let nav = open_fixture(&path);

    let dest_raw = dir.path().join("shadow_out").to_str().unwrap().to_string();
    let written = nav.export_subtree("/g", &dest_raw).unwrap();

    let out = open_fixture(&written);
    let outer = out.handle().unwrap().resolve("/outer").unwrap();
    assert_eq!(outer.shape, Some(vec![10]));
    let inner = out.handle().unwrap().resolve("/sub/inner").unwrap();
    assert_eq!(inner.shape, Some(vec![5]));
    let values: Vec<f64> = out
        .handle()
        .unwrap()
        .read_dataset("/sub/inner")
        .unwrap()
        .iter()
        .copied()
        .collect();
    assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
}

#[test]
fn a_string_dataset_is_refused_instead_of_written_mangled() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("text.nc");
    {
        let mut file = netcdf::create(&path).unwrap();
        file.add_dimension("n", 2).unwrap();
        file.add_string_variable("labels", &["n"]).unwrap();
    }
    let nav = open_fixture(&path);

    let dest = dir.path().join("labels.csv");
    let err = nav
        .export_table("/labels", dest.to_str().unwrap())
        .unwrap_err();
    assert!(matches!(err, HaloclineError::SourceUnreadable { .. }));
    // The source is rejected before the destination is created.
    assert!(!dest.exists());
}

#[test]
fn export_destination_in_a_missing_directory_fails_with_write_error() {
    let dir = TempDir::new().unwrap();
    let sample = common::sample_container(&dir);
    let nav = open_fixture(&sample);

    let dest = dir
        .path()
        .join("no/such/dir/out.nc")
        .to_str()
        .unwrap()
        .to_string();
    let err = nav.export_subtree("/g1", &dest).unwrap_err();
    assert!(matches!(err, HaloclineError::WriteFailed { .. }));
}
