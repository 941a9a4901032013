//! Integration tests for the Styleview CLI
//!
//! These tests run the actual binary. `--demo` serves the built-in sample
//! document so no backend is needed.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get the binary to test
fn styleview_cmd() -> Command {
    let mut cmd = Command::cargo_bin("styleview").unwrap();
    // Keep the host environment out of config resolution
    cmd.env_remove("STYLEVIEW_API_BASE")
        .env_remove("STYLEVIEW_TIMEOUT_SECS")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_flag() {
    styleview_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("computed styles"))
        .stdout(predicate::str::contains("view"))
        .stdout(predicate::str::contains("dump"));
}

#[test]
fn test_dump_help() {
    styleview_cmd()
        .args(["dump", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--styles"));
}

// ============================================================================
// dump
// ============================================================================

#[test]
fn test_dump_demo_tree() {
    styleview_cmd()
        .args(["--demo", "dump", "sample.html"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<html>\n"))
        .stdout(predicate::str::contains("  <head>\n"))
        .stdout(predicate::str::contains(r#"    <h1 id="title">"#))
        .stdout(predicate::str::contains(
            r#"    <p class="intro" data-role="lead">"#,
        ))
        .stdout(predicate::str::contains(r#"      TEXT: "Styled trees""#))
        .stdout(predicate::str::contains("TEXT: (whitespace)"))
        .stdout(predicate::str::contains("color: navy;").not())
        .stderr(predicate::str::contains("nodes from sample.html"));
}

#[test]
fn test_dump_truncates_long_text() {
    styleview_cmd()
        .args(["--demo", "dump", "sample.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"TEXT: "Each node carries the values the cascade settle...""#,
        ));
}

#[test]
fn test_dump_with_styles_sorted() {
    styleview_cmd()
        .args(["--demo", "dump", "sample.html", "--styles"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "    <h1 id=\"title\">\n        color: navy;\n        display: block;\n        font-family: serif;\n        font-size: 32px;\n",
        ))
        .stdout(predicate::str::contains("(no styles)"));
}

#[test]
fn test_dump_unreachable_backend_fails() {
    styleview_cmd()
        .args(["--api-base", "http://127.0.0.1:9/api", "--timeout", "2"])
        .args(["dump", "sample.html"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("Fix:"));
}

#[test]
fn test_invalid_api_base_is_config_error() {
    styleview_cmd()
        .args(["--api-base", "ftp://example.com", "dump", "sample.html"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_invalid_env_timeout_is_config_error() {
    styleview_cmd()
        .env("STYLEVIEW_TIMEOUT_SECS", "soon")
        .args(["--demo", "dump", "sample.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("STYLEVIEW_TIMEOUT_SECS"));
}

#[test]
fn test_log_file_receives_logs() {
    let temp_dir = TempDir::new().unwrap();
    let log = temp_dir.path().join("styleview.log");

    styleview_cmd()
        .arg("--log-file")
        .arg(&log)
        .args(["--demo", "dump", "sample.html"])
        .assert()
        .success();

    let written = fs::read_to_string(&log).unwrap();
    assert!(written.contains("demo document source"));
}
