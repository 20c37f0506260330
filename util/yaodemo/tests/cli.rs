#![allow(unused_crate_dependencies)]

use std::io::Write;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

/// Helper to create an input file
fn input_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn demo_circuits() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("circuits/demo.json")
}

fn yaodemo_cmd() -> Command {
    Command::cargo_bin("yaodemo").unwrap()
}

#[test]
fn test_help_command() {
    yaodemo_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Garbler side"));
}

#[test]
fn test_table() {
    yaodemo_cmd()
        .arg("table")
        .arg(demo_circuits())
        .assert()
        .success()
        .stdout(predicate::str::contains("======== and ========"))
        .stdout(predicate::str::contains(
            "  Alice[0] = 1 Bob[1] = 1  Outputs[2] = 1",
        ))
        .stdout(predicate::str::contains("======== mux ========"))
        .stdout(predicate::str::contains(
            "  Alice[0, 1] = 1 0 Bob[2] = 0  Outputs[6] = 0",
        ))
        .stdout(predicate::str::contains(
            "  Alice[0, 1] = 1 0 Bob[2] = 1  Outputs[6] = 1",
        ));
}

#[test]
fn test_table_enumeration_limit() {
    yaodemo_cmd()
        .arg("table")
        .arg(demo_circuits())
        .args(["--max-inputs", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceed the enumeration limit of 2"));
}

#[test]
fn test_compute_from_file_skipping_failures() {
    let input = input_file("1\n");

    yaodemo_cmd()
        .arg("compute")
        .arg(demo_circuits())
        .arg("--input-file")
        .arg(input.path())
        .args(["--bob-input", "1", "--skip-failures"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Function result is 1"))
        .stderr(predicate::str::contains("circuit failed"));
}

#[test]
fn test_compute_aborts_on_width_mismatch_before_evaluating() {
    let input = input_file("1");

    yaodemo_cmd()
        .arg("compute")
        .arg(demo_circuits())
        .arg("--input-file")
        .arg(input.path())
        .args(["--bob-input", "1"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Function result").not())
        .stderr(predicate::str::contains("private input has 1 bits, expected 2"));
}

#[test]
fn test_compute_file_wider_than_bit_width() {
    let input = input_file("10110");

    yaodemo_cmd()
        .arg("compute")
        .arg(demo_circuits())
        .arg("--input-file")
        .arg(input.path())
        .args(["--bit-width", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("private input has 5 bits, expected 3"));
}

#[test]
fn test_missing_circuit_file() {
    yaodemo_cmd()
        .arg("table")
        .arg("does-not-exist.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open circuit file"));
}
