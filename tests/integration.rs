// Integration tests for the planit CLI surface.
//
// These invoke the binary with assert_cmd and check argument handling
// and exit codes without touching a real dataset.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn planit() -> Command {
    Command::cargo_bin("planit").expect("binary should exist")
}

#[test]
fn cli_version_flag() {
    planit()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("planit"));
}

#[test]
fn cli_help_flag() {
    planit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scoring"));
}

#[test]
fn rank_requires_path() {
    planit()
        .arg("rank")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn score_requires_product_id() {
    planit()
        .arg("score")
        .arg(".")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--id"));
}

#[test]
fn rank_rejects_asc_with_desc() {
    planit()
        .arg("rank")
        .arg(".")
        .arg("--asc")
        .arg("--desc")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn rank_rejects_unknown_sort_field() {
    planit()
        .arg("rank")
        .arg(".")
        .arg("--sort")
        .arg("calories")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn stats_file_conflicts_with_explicit_bounds() {
    planit()
        .arg("rank")
        .arg(".")
        .arg("--bounds")
        .arg("default")
        .arg("--stats-file")
        .arg("stats.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn missing_dataset_dir_exits_with_code_3() {
    let root = TempDir::new().expect("temp dir should be created");
    planit()
        .env("HOME", root.path())
        .arg("rank")
        .arg(root.path().join("missing"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("dataset directory does not exist"));
}

#[test]
fn missing_csv_file_exits_with_code_3() {
    let root = TempDir::new().expect("temp dir should be created");
    planit()
        .env("HOME", root.path())
        .arg("validate")
        .arg(root.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("products.csv"));
}
