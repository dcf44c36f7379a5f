use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn prints_code_to_stdout() {
    Command::cargo_bin("plzero")
        .unwrap()
        .arg("tests/programs/scenario1.pl0")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("7 0 0 2\n").and(predicate::str::ends_with("11 0 0 3\n")));
}

#[test]
fn writes_json_file() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("code.json");

    Command::cargo_bin("plzero")
        .unwrap()
        .args(["tests/programs/scenario1.lex", "--lexemes", "--format", "json", "-o"])
        .arg(&out)
        .assert()
        .success();

    let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(doc["instructions"].as_array().unwrap().len(), 11);
}

#[test]
fn generator_error_sets_exit_status() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("code.txt");

    Command::cargo_bin("plzero")
        .unwrap()
        .arg("tests/programs/missing_semicolon.pl0")
        .arg("-o")
        .arg(&out)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("CODE GENERATOR ERROR[4]"));

    assert!(!out.exists());
}

#[test]
fn capacity_overflow_terminates() {
    Command::cargo_bin("plzero")
        .unwrap()
        .args(["tests/programs/loops.pl0", "--max-code", "5"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("MAX_CODE_LENGTH(5) reached"));
}

#[test]
fn missing_input_is_reported() {
    Command::cargo_bin("plzero")
        .unwrap()
        .arg("tests/programs/does_not_exist.pl0")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Reading"));
}
