//! CLI smoke tests for the fatal batch conditions.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_runs() {
    Command::cargo_bin("stex")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("batch"));
}

#[test]
fn batch_missing_folder_is_fatal() {
    Command::cargo_bin("stex")
        .unwrap()
        .args(["batch", "no/such/folder"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input folder not found"));
}

#[test]
fn batch_folder_without_pdfs_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("notes.txt"), "not a statement").unwrap();

    Command::cargo_bin("stex")
        .unwrap()
        .arg("batch")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No PDF files found"));
}

#[test]
fn process_missing_file_is_fatal() {
    Command::cargo_bin("stex")
        .unwrap()
        .args(["process", "no/such/statement.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}
