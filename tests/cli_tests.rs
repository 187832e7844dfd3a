//! Binary behavior for runs that fail before any network access.

mod common;

use assert_cmd::Command;
use common::Project;
use predicates::prelude::*;

fn publisher_cmd() -> Command {
    let mut cmd = Command::cargo_bin("firmware_publisher").unwrap();
    cmd.env_remove("FIRMWARE_PUBLISH_BUCKET")
        .env_remove("FIRMWARE_PUBLISH_PREFIX")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn help_lists_options() {
    publisher_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--build-info"))
        .stdout(predicate::str::contains("--profile"))
        .stdout(predicate::str::contains("--region"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn source_root_is_required() {
    publisher_cmd().assert().failure().code(2);
}

#[test]
fn missing_firmware_image_fails_with_path() {
    // default config expects ESPRelayBoard.bin, which this fixture does not have
    let project = Project::with_version("2.3.0");

    publisher_cmd()
        .arg(project.root())
        .arg("--dry-run")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("ESPRelayBoard.bin"))
        .stderr(predicate::str::contains("required file not found"));
}

#[test]
fn missing_storage_image_fails_with_path() {
    let project = Project::with_version("2.3.0");
    project.write_build_file("ESPRelayBoard.bin", b"\xe9image");
    project.remove_build_file("storage.bin");

    publisher_cmd()
        .arg(project.root())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("storage.bin"));
}

#[test]
fn malformed_build_info_fails() {
    let project = Project::with_version("2.3.0");
    project.write_build_file("ESPRelayBoard.bin", b"\xe9image");
    project.write_build_file("build_info.json", b"DEVICE_SW_VERSION_NUM=2.3.0");

    publisher_cmd()
        .arg(project.root())
        .arg("--dry-run")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid JSON"));
}

#[test]
fn missing_version_field_fails() {
    let project = Project::with_version("2.3.0");
    project.write_build_file("ESPRelayBoard.bin", b"\xe9image");
    project.write_build_file("build_info.json", br#"{"PROJECT": "ESPRelayBoard"}"#);

    publisher_cmd()
        .arg(project.root())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("DEVICE_SW_VERSION_NUM"));
}

#[test]
fn build_info_override_must_exist() {
    let project = Project::with_version("2.3.0");
    project.write_build_file("ESPRelayBoard.bin", b"\xe9image");

    publisher_cmd()
        .arg(project.root())
        .arg("--build-info")
        .arg(project.root().join("missing.json"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("missing.json"));
}
