//! CLI surface tests
//!
//! These exercise argument validation and the fatal-error exit contract.
//! They never reach the mutation path: every invocation fails at the
//! boundary or at user resolution, before any file is touched.

use assert_cmd::Command;
use predicates::prelude::*;

fn kh() -> Command {
    Command::cargo_bin("kh").unwrap()
}

#[test]
fn help_lists_the_parameter_surface() {
    kh().arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--state"))
        .stdout(predicate::str::contains("--manage-dir"))
        .stdout(predicate::str::contains("--check"));
}

#[test]
fn missing_positional_arguments_are_a_usage_error() {
    kh().assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn invalid_state_fails_before_touching_anything() {
    kh().args(["root", "github.com", "--state", "latest"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid state"));
}

#[test]
fn invalid_mode_fails_before_touching_anything() {
    kh().args(["root", "github.com", "--mode", "rw-------"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid mode"));
}

#[test]
fn invalid_manage_dir_fails_before_touching_anything() {
    kh().args(["root", "github.com", "--manage-dir", "maybe"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid boolean"));
}

#[test]
fn unknown_user_is_a_fatal_error() {
    kh().args(["kh-no-such-account-0xdead", "github.com"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("User not found"));
}

#[test]
fn unreadable_settings_file_is_a_fatal_error() {
    kh().args([
        "root",
        "github.com",
        "--settings",
        "/nonexistent/settings.toml",
    ])
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("settings"));
}

#[test]
fn valid_settings_file_is_accepted() {
    // Settings load before user resolution, so an unknown user proves the
    // file passed the boundary without touching anything.
    let dir = tempfile::tempdir().unwrap();
    let settings = dir.path().join("settings.toml");
    std::fs::write(&settings, "timeout_secs = 10\nhash_hosts = true\n").unwrap();

    kh().args(["kh-no-such-account-0xdead", "github.com"])
        .arg("--settings")
        .arg(&settings)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("User not found"));
}

#[test]
fn malformed_settings_file_is_a_fatal_error() {
    let dir = tempfile::tempdir().unwrap();
    let settings = dir.path().join("settings.toml");
    std::fs::write(&settings, "tiemout_secs = 10\n").unwrap();

    kh().args(["root", "github.com"])
        .arg("--settings")
        .arg(&settings)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to load settings"));
}
