//! Shared fixtures for binary-level tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

/// `shipkit` running inside `dir`, isolated from the caller's environment.
pub fn shipkit(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("shipkit").unwrap();
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"));
    for (key, _) in std::env::vars() {
        if key.starts_with("SHIPKIT_") {
            cmd.env_remove(key);
        }
    }
    cmd
}

/// Write `files` (relative path, content) under `root`.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let path = root.join(path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

pub const AUTH_DESCRIPTOR: &str = r#"{
  "$schema": "https://ui.shadcn.com/schema/registry-item.json",
  "name": "auth-otp",
  "type": "registry:lib",
  "title": "OTP authentication",
  "description": "Email one-time password login",
  "dependencies": ["zod"],
  "registryDependencies": ["ui-kit", "button"]
}"#;

pub const UI_KIT_DESCRIPTOR: &str = r#"{
  "name": "ui-kit",
  "type": "registry:ui",
  "title": "UI kit",
  "description": "Shared primitives"
}"#;

/// A workspace with `features/auth-otp` and `features/ui-kit`.
pub fn registry_fixture() -> TempDir {
    let temp = TempDir::new().unwrap();
    write_tree(
        &temp.path().join("features"),
        &[
            ("auth-otp/feature.json", AUTH_DESCRIPTOR),
            ("auth-otp/api/login.ts", "export const login = 1;\n"),
            ("auth-otp/components/form.tsx", "export const Form = () => null;\n"),
            ("auth-otp/server/session.ts", "export const session = {};\n"),
            ("auth-otp/db.ts", "export const db = {};\n"),
            ("auth-otp/notes.bin", "not shipped\n"),
            ("ui-kit/feature.json", UI_KIT_DESCRIPTOR),
            ("ui-kit/button.tsx", "export const Button = () => null;\n"),
        ],
    );
    temp
}

pub fn read_json(path: &Path) -> serde_json::Value {
    let text = fs::read_to_string(path).unwrap();
    serde_json::from_str(&text).unwrap()
}
