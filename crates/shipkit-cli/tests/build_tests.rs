//! End-to-end tests for `shipkit build`, `check` and `list`.

mod common;

use std::fs;

use predicates::prelude::*;

use common::{read_json, registry_fixture, shipkit, write_tree};

#[test]
fn build_writes_manifests_and_index() {
    let temp = registry_fixture();

    shipkit(temp.path())
        .args(["build", "--base-url", "https://r.example/r/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("auth-otp (nextjs-auth): 4 file(s)"))
        .stdout(predicate::str::contains("ui-kit (generic): 1 file(s)"))
        .stdout(predicate::str::contains("Built 2 feature(s)"));

    let out = temp.path().join("public/r");
    let item = read_json(&out.join("auth-otp.json"));
    assert_eq!(item["$schema"], "https://ui.shadcn.com/schema/registry-item.json");
    assert_eq!(item["name"], "auth-otp");
    assert_eq!(item["type"], "registry:lib");

    let placed: Vec<(&str, &str)> = item["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| (f["path"].as_str().unwrap(), f["target"].as_str().unwrap()))
        .collect();
    assert_eq!(
        placed,
        vec![
            ("api/login.ts", "app/api/login.ts"),
            ("components/form.tsx", "components/form.tsx"),
            ("db.ts", "lib/server/db.ts"),
            ("server/session.ts", "lib/server/auth/session.ts"),
        ]
    );
    assert_eq!(item["files"][0]["content"], "export const login = 1;\n");
    assert_eq!(item["dependencies"][0], "zod");
    assert_eq!(
        item["registryDependencies"],
        serde_json::json!(["https://r.example/r/ui-kit.json", "button"])
    );
    assert!(item.get("devDependencies").is_none());

    let ui_kit = read_json(&out.join("ui-kit.json"));
    assert_eq!(ui_kit["files"][0]["target"], "lib/ui-kit/button.tsx");
    assert_eq!(ui_kit["files"][0]["type"], "registry:lib");

    let index = read_json(&out.join("index.json"));
    assert_eq!(index["items"][0]["name"], "auth-otp");
    assert_eq!(index["items"][0]["url"], "https://r.example/r/auth-otp.json");
    assert_eq!(index["items"][1]["name"], "ui-kit");
}

#[test]
fn no_subcommand_runs_build() {
    let temp = registry_fixture();

    shipkit(temp.path()).assert().success();

    assert!(temp.path().join("public/r/auth-otp.json").is_file());
    assert!(temp.path().join("public/r/index.json").is_file());
}

#[test]
fn rebuilding_is_byte_identical() {
    let temp = registry_fixture();
    let manifest = temp.path().join("public/r/auth-otp.json");

    shipkit(temp.path()).arg("build").assert().success();
    let first = fs::read(&manifest).unwrap();
    shipkit(temp.path()).arg("build").assert().success();

    assert_eq!(fs::read(&manifest).unwrap(), first);
}

#[test]
fn no_index_flag_skips_index() {
    let temp = registry_fixture();

    shipkit(temp.path())
        .args(["build", "--no-index", "--out", "dist"])
        .assert()
        .success();

    assert!(temp.path().join("dist/auth-otp.json").is_file());
    assert!(!temp.path().join("dist/index.json").exists());
}

#[test]
fn explicit_framework_selects_tanstack_builder() {
    let temp = tempfile::TempDir::new().unwrap();
    write_tree(
        &temp.path().join("registry"),
        &[
            (
                "auth-magic/feature.json",
                r#"{"name":"auth-magic","type":"registry:lib","title":"Magic","description":"Magic links",
                   "capabilities":{"framework":"tanstack-start"}}"#,
            ),
            ("auth-magic/api/login.ts", "export {};\n"),
        ],
    );

    shipkit(temp.path())
        .args(["build", "--features-dir", "registry"])
        .assert()
        .success()
        .stdout(predicate::str::contains("auth-magic (tanstack-auth)"));

    let item = read_json(&temp.path().join("public/r/auth-magic.json"));
    assert_eq!(item["files"][0]["target"], "src/routes/api/auth/login.ts");
}

#[test]
fn config_file_and_env_supply_settings() {
    let temp = registry_fixture();
    fs::write(
        temp.path().join("shipkit.toml"),
        "[registry]\noutput_dir = \"site/registry\"\nbase_url = \"https://file.example\"\n",
    )
    .unwrap();

    shipkit(temp.path())
        .env("SHIPKIT_REGISTRY__BASE_URL", "https://env.example")
        .arg("build")
        .assert()
        .success();

    let index = read_json(&temp.path().join("site/registry/index.json"));
    assert_eq!(index["items"][0]["url"], "https://env.example/auth-otp.json");
}

#[test]
fn json_output_is_machine_readable() {
    let temp = registry_fixture();

    let assert = shipkit(temp.path())
        .args(["--output-format", "json", "build"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["features"][0]["builder"], "nextjs-auth");
    assert_eq!(report["features"][1]["files"], 1);
    assert!(report["index"].as_str().unwrap().ends_with("index.json"));
}

#[test]
fn check_reports_targets_without_writing() {
    let temp = registry_fixture();

    shipkit(temp.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("auth-otp (nextjs-auth)"))
        .stdout(predicate::str::contains("server/session.ts -> lib/server/auth/session.ts"))
        .stdout(predicate::str::contains("2 feature(s) OK"));

    assert!(!temp.path().join("public").exists());
}

#[test]
fn list_prints_builders_in_precedence_order() {
    let temp = tempfile::TempDir::new().unwrap();

    shipkit(temp.path())
        .args(["list", "--format", "list"])
        .assert()
        .success()
        .stdout("tanstack-auth\nnextjs-auth\nnextjs-i18n\npayments\ngeneric\n");
}

#[test]
fn list_json_is_an_array() {
    let temp = tempfile::TempDir::new().unwrap();

    let assert = shipkit(temp.path())
        .args(["list", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let builders: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(builders.as_array().unwrap().len(), 5);
    assert_eq!(builders[0]["name"], "tanstack-auth");
    assert_eq!(builders[4]["feature"], serde_json::Value::Null);
}

#[test]
fn completions_are_generated() {
    let temp = tempfile::TempDir::new().unwrap();

    shipkit(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("shipkit"));
}

#[test]
fn config_get_reads_merged_value() {
    let temp = tempfile::TempDir::new().unwrap();

    shipkit(temp.path())
        .env("SHIPKIT_REGISTRY__FEATURES_DIR", "bundles")
        .args(["config", "get", "registry.features_dir"])
        .assert()
        .success()
        .stdout("bundles\n");
}
