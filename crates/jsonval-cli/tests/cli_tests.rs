//! Integration tests for the `jsonval` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the fmt, check,
//! read, and stats subcommands through the actual binary, including
//! stdin/stdout piping, file I/O, error rendering, and the log file sink.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the sample.json fixture.
fn sample_json_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sample.json")
}

fn jsonval() -> Command {
    let mut cmd = Command::cargo_bin("jsonval").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// fmt subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn fmt_stdin_to_stdout_is_compact() {
    jsonval()
        .arg("fmt")
        .write_stdin(r#"{ "a" : "Hello", "c" : 25, "d" : [ 1, 2, 3 ] }"#)
        .assert()
        .success()
        .stdout(r#"{"a":"Hello","c":25,"d":[1,2,3]}"#.to_string() + "\n");
}

#[test]
fn fmt_keeps_big_unsigned_and_key_order() {
    jsonval()
        .args(["fmt", "-i", sample_json_path()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(r#"{"name":"Alice","active":true"#))
        .stdout(predicate::str::contains(r#""id":18446744073709550615"#));
}

#[test]
fn fmt_pretty_file_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("out.json");

    jsonval()
        .args(["fmt", "--pretty", "-i", sample_json_path(), "-o"])
        .arg(&output_path)
        .assert()
        .success()
        .stdout("");

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    assert!(content.starts_with("{\n  \"name\": \"Alice\",\n"));
    assert!(content.contains("\"city\": \"Portland\""));
}

#[test]
fn fmt_rpc_result_wraps_document() {
    jsonval()
        .args(["fmt", "--rpc-result"])
        .write_stdin("[1,2]")
        .assert()
        .success()
        .stdout("{\"result\":[1,2]}\n");
}

#[test]
fn fmt_invalid_json_fails() {
    jsonval()
        .arg("fmt")
        .write_stdin("this is not valid json {{{")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid JSON in <stdin>"));
}

// ─────────────────────────────────────────────────────────────────────────────
// check subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_valid_file() {
    jsonval()
        .args(["check", "-i", sample_json_path()])
        .assert()
        .success()
        .stdout("ok: object\n");
}

#[test]
fn check_reports_position_and_reason() {
    jsonval()
        .arg("check")
        .write_stdin("{\"a\": [1, 2,]}")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "JSON parse error at line 1, column 13 (offset 12): unexpected character ']'",
        ));
}

#[test]
fn check_missing_file_fails() {
    jsonval()
        .args(["check", "-i", "/nonexistent/input.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn check_invalid_utf8() {
    jsonval()
        .arg("check")
        .write_stdin(b"[\"\xff\"]".to_vec())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid UTF-8"));
}

// ─────────────────────────────────────────────────────────────────────────────
// read subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn read_typed_fields() {
    jsonval()
        .args(["read", "-i", sample_json_path()])
        .args(["name:string", "age:i32", "id:u64", "balance:f64", "scores:array"])
        .assert()
        .success()
        .stdout(
            "name = \"Alice\"\nage = 30\nid = 18446744073709550615\nbalance = 1250.75\nscores = [95,87,92]\n",
        );
}

#[test]
fn read_mismatch_names_field_and_types() {
    jsonval()
        .arg("read")
        .args(["a:i32", "b:bool"])
        .write_stdin(r#"{"a":1,"b":"yes"}"#)
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("field 'b': expected boolean, got string"));
}

#[test]
fn read_big_unsigned_into_i32_fails() {
    jsonval()
        .args(["read", "-i", sample_json_path(), "id:i32"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("field 'id': expected i32, got integer"));
}

#[test]
fn read_missing_field() {
    jsonval()
        .args(["read", "-i", sample_json_path(), "email:string"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing field 'email'"));
}

#[test]
fn read_requires_object() {
    jsonval()
        .args(["read", "a:any"])
        .write_stdin("[1]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected object, got array"));
}

#[test]
fn read_rejects_unknown_type() {
    jsonval()
        .args(["read", "a:float"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown type 'float'"));
}

// ─────────────────────────────────────────────────────────────────────────────
// stats subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn stats_from_file() {
    jsonval()
        .args(["stats", "-i", sample_json_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("integer:   5"))
        .stdout(predicate::str::contains("object:    2"))
        .stdout(predicate::str::contains("max depth: 2"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Logging
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn log_dir_receives_diagnostics() {
    let dir = tempfile::tempdir().unwrap();

    jsonval()
        .env("RUST_LOG", "debug")
        .arg("--log-dir")
        .arg(dir.path())
        .arg("check")
        .write_stdin("[1,")
        .assert()
        .failure()
        .stderr(predicate::str::contains("parse failed").not());

    let log = std::fs::read_to_string(dir.path().join("jsonval.log")).expect("log file must exist");
    assert!(log.contains("parse failed"), "log was: {log}");
}

#[test]
fn help_lists_subcommands() {
    jsonval()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fmt"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("read"))
        .stdout(predicate::str::contains("stats"));
}
