//! Command-line behavior, exercised through the built binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn halocline() -> Command {
    Command::cargo_bin("halocline").expect("binary builds")
}

#[test]
fn check_deps_reports_the_container_library_and_exits_cleanly() {
    halocline()
        .arg("--check-deps")
        .assert()
        .success()
        .stdout(predicate::str::contains("netcdf"));
}

#[test]
fn a_missing_startup_file_fails_before_the_ui_starts() {
    halocline()
        .arg("/definitely/not/here.nc")
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn the_file_flag_is_validated_like_the_positional_argument() {
    halocline()
        .args(["--file", "/definitely/not/here.nc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn a_non_container_startup_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let junk = dir.path().join("junk.nc");
    std::fs::write(&junk, b"plain text, not a container").unwrap();

    halocline()
        .arg(junk.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a valid container file"));
}

#[test]
fn help_lists_the_startup_options() {
    halocline()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--check-deps"))
        .stdout(predicate::str::contains("--log"));
}
