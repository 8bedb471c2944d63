//! Tests for error reporting, suggestions and exit codes.

mod common;

use predicates::prelude::*;
use tempfile::TempDir;

use common::{AUTH_DESCRIPTOR, registry_fixture, shipkit, write_tree};

#[test]
fn missing_features_dir_exits_not_found() {
    let temp = TempDir::new().unwrap();

    shipkit(temp.path())
        .args(["build", "--features-dir", "nowhere"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Features directory not found"))
        .stderr(predicate::str::contains("Suggestions:"));
}

#[test]
fn missing_required_fields_are_reported_together() {
    let temp = TempDir::new().unwrap();
    write_tree(
        &temp.path().join("features"),
        &[("broken/feature.json", r#"{"name":"broken","type":"registry:lib"}"#)],
    );

    shipkit(temp.path())
        .arg("build")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Feature 'broken' failed"))
        .stderr(predicate::str::contains("title, description"));

    assert!(!temp.path().join("public/r/broken.json").exists());
}

#[test]
fn malformed_descriptor_exits_user_error() {
    let temp = TempDir::new().unwrap();
    write_tree(
        &temp.path().join("features"),
        &[("bad/feature.json", "{ not json")],
    );

    shipkit(temp.path())
        .arg("build")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to parse descriptor"));
}

#[test]
fn duplicate_names_abort_before_writing() {
    let temp = registry_fixture();
    write_tree(
        &temp.path().join("features"),
        &[("auth-copy/feature.json", AUTH_DESCRIPTOR)],
    );

    shipkit(temp.path())
        .arg("build")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Duplicate feature name 'auth-otp'"));

    assert!(!temp.path().join("public").exists());
}

#[test]
fn feature_name_with_path_segments_is_rejected() {
    let temp = TempDir::new().unwrap();
    write_tree(
        &temp.path().join("features"),
        &[
            (
                "escaper/feature.json",
                r#"{"name":"../../escaped","type":"registry:lib","title":"E","description":"E"}"#,
            ),
            ("escaper/x.ts", "export {};"),
        ],
    );

    shipkit(temp.path())
        .arg("build")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid feature name '../../escaped'"));

    assert!(!temp.path().join("escaped.json").exists());
    assert!(!temp.path().join("public").exists());
}

#[test]
fn feature_named_index_is_reserved() {
    let temp = TempDir::new().unwrap();
    write_tree(
        &temp.path().join("features"),
        &[(
            "index/feature.json",
            r#"{"name":"index","type":"registry:lib","title":"I","description":"I"}"#,
        )],
    );

    shipkit(temp.path())
        .arg("build")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("is reserved"))
        .stderr(predicate::str::contains("--no-index"));

    shipkit(temp.path())
        .args(["build", "--no-index"])
        .assert()
        .success();
    assert!(temp.path().join("public/r/index.json").exists());
}

#[test]
fn invalid_capability_is_rejected() {
    let temp = TempDir::new().unwrap();
    write_tree(
        &temp.path().join("features"),
        &[(
            "auth-x/feature.json",
            r#"{"name":"auth-x","type":"registry:lib","title":"X","description":"X",
               "capabilities":{"orm":"sequelize"}}"#,
        )],
    );

    shipkit(temp.path())
        .arg("check")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("sequelize"));
}

#[test]
fn missing_config_file_exits_configuration_error() {
    let temp = TempDir::new().unwrap();

    shipkit(temp.path())
        .args(["--config", "absent.toml", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn empty_base_url_exits_configuration_error() {
    let temp = registry_fixture();

    shipkit(temp.path())
        .args(["build", "--base-url", ""])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("registry.base_url must not be empty"));

    assert!(!temp.path().join("public").exists());
}

#[test]
fn unknown_config_key_lists_known_keys() {
    let temp = TempDir::new().unwrap();

    shipkit(temp.path())
        .args(["config", "get", "nope"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown configuration key 'nope'"))
        .stderr(predicate::str::contains("registry.base_url"));
}

#[test]
fn verbose_errors_drop_the_hint() {
    let temp = TempDir::new().unwrap();

    shipkit(temp.path())
        .args(["-v", "build", "--features-dir", "nowhere"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Use -v / --verbose").not());
}

#[test]
fn usage_errors_exit_two() {
    let temp = TempDir::new().unwrap();

    shipkit(temp.path())
        .args(["list", "--format", "csv"])
        .assert()
        .code(2);
}

#[test]
fn help_exits_successfully() {
    let temp = TempDir::new().unwrap();

    shipkit(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("shipkit"));
}
