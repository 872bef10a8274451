//! Tests for error messages, suggestions and exit codes.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn hexgen(dir: &std::path::Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("hexgen");
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn missing_spec_directory_is_not_found() {
    let tmp = TempDir::new().unwrap();
    hexgen(tmp.path())
        .args(["generate", "--specs", "nowhere"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("nowhere"))
        .stderr(predicate::str::contains("--specs"));
    assert!(!tmp.path().join("projects").exists());
}

#[test]
fn invalid_base_package_is_user_error() {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir_all(tmp.path().join("specs")).unwrap();
    hexgen(tmp.path())
        .args(["generate", "--base-package", "com..example"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("com..example"));
}

#[test]
fn missing_config_file_is_configuration_error() {
    let tmp = TempDir::new().unwrap();
    hexgen(tmp.path())
        .args(["--config", "absent.toml", "entities"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("configuration"));
}

#[test]
fn unknown_subcommand_is_usage_error() {
    let tmp = TempDir::new().unwrap();
    hexgen(tmp.path()).arg("frobnicate").assert().code(2);
}

#[test]
fn verbose_error_shows_cause() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("hexgen.toml"), "[database]\nport = \"many\"\n").unwrap();
    hexgen(tmp.path())
        .args(["-v", "entities"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Caused by"));
}
