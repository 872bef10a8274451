//! Integration tests for the hexgen binary.

use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

const USER_SPEC: &str = r#"
openapi: 3.0.1
paths:
  /users:
    post:
      operationId: CreateUser
    get:
      operationId: ListUsers
  /users/{userId}:
    get:
      operationId: GetUser
    put:
      operationId: UpdateUser
    delete:
      operationId: DeleteUser
components:
  schemas:
    GetUserResponseContent:
      type: object
      required: [username]
      properties:
        userId:
          type: string
        username:
          type: string
        email:
          type: string
"#;

fn workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("specs")).unwrap();
    fs::write(tmp.path().join("specs/user.yaml"), USER_SPEC).unwrap();
    tmp
}

fn hexgen(dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("hexgen");
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn help_lists_commands() {
    let tmp = TempDir::new().unwrap();
    hexgen(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("entities"));
}

#[test]
fn version_flag() {
    let tmp = TempDir::new().unwrap();
    hexgen(tmp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn init_writes_manifest_once() {
    let tmp = TempDir::new().unwrap();
    hexgen(tmp.path()).arg("init").assert().success();

    let manifest = fs::read_to_string(tmp.path().join("hexgen.toml")).unwrap();
    assert!(manifest.contains("[project]"));
    assert!(manifest.contains("[paths]"));

    hexgen(tmp.path())
        .arg("init")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--force"));

    hexgen(tmp.path()).args(["init", "--force"]).assert().success();
}

#[test]
fn generate_writes_project() {
    let tmp = workspace();
    hexgen(tmp.path())
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated generated-service"))
        .stdout(predicate::str::contains("wired: User"));

    let root = tmp.path().join("projects/generated-service");
    assert!(root.join("pom.xml").is_file());
    assert!(
        root.join("src/main/java/com/example/service/domain/model/User.java")
            .is_file()
    );
}

#[test]
fn manifest_and_flags_shape_the_output() {
    let tmp = workspace();
    fs::write(
        tmp.path().join("hexgen.toml"),
        "[project]\nname = \"back-ms-users\"\n\n[paths]\noutput_dir = \"build\"\n",
    )
    .unwrap();

    hexgen(tmp.path())
        .args(["generate", "--base-package", "com.acme.users"])
        .assert()
        .success();

    let root = tmp.path().join("build/back-ms-users");
    assert!(
        root.join("src/main/java/com/acme/users/domain/model/User.java")
            .is_file()
    );
}

#[test]
fn environment_overrides_manifest() {
    let tmp = workspace();
    hexgen(tmp.path())
        .env("HEXGEN__PROJECT__NAME", "from-env")
        .arg("generate")
        .assert()
        .success();
    assert!(tmp.path().join("projects/from-env/pom.xml").is_file());
}

#[test]
fn dry_run_writes_nothing() {
    let tmp = workspace();
    hexgen(tmp.path())
        .args(["generate", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("User"))
        .stdout(predicate::str::contains("UserController.java"));
    assert!(!tmp.path().join("projects").exists());
}

#[test]
fn entities_as_json() {
    let tmp = workspace();
    let out = hexgen(tmp.path())
        .args(["entities", "--output-format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let listing: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(listing["entities"][0]["name"], "User");
    assert_eq!(listing["entities"][0]["crud"].as_array().unwrap().len(), 5);
}

#[test]
fn generate_report_as_json() {
    let tmp = workspace();
    let out = hexgen(tmp.path())
        .args(["generate", "--output-format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(report["entity_count"], 1);
    assert_eq!(report["wired_entities"][0], "User");
}

#[test]
fn completions_for_bash() {
    let tmp = TempDir::new().unwrap();
    hexgen(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hexgen"));
}
