//! JSON manifest writer.
//!
//! Writes each item as pretty-printed `{name}.json` and the registry index as
//! `index.json`, all directly under the output directory. Every document ends
//! with a newline. Existing files are overwritten.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, instrument};

use shipkit_core::{
    application::{
        ApplicationError,
        ports::{Filesystem, ManifestSink},
    },
    domain::{RegistryIndex, RegistryItem},
    error::ShipkitResult,
};

/// File name of the registry index.
pub const INDEX_FILE: &str = "index.json";

/// Writes manifests through a [`Filesystem`].
pub struct JsonManifestWriter {
    output_dir: PathBuf,
    filesystem: Box<dyn Filesystem>,
}

impl JsonManifestWriter {
    pub fn new(output_dir: impl Into<PathBuf>, filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            output_dir: output_dir.into(),
            filesystem,
        }
    }

    fn write_json<T: Serialize>(&self, file_name: &str, value: &T) -> ShipkitResult<PathBuf> {
        let mut json =
            serde_json::to_string_pretty(value).map_err(|e| ApplicationError::SerializationFailed {
                what: file_name.to_owned(),
                reason: e.to_string(),
            })?;
        json.push('\n');

        self.filesystem.create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(file_name);
        self.filesystem.write_file(&path, &json)?;
        debug!(path = %path.display(), bytes = json.len(), "wrote manifest");
        Ok(path)
    }
}

impl ManifestSink for JsonManifestWriter {
    #[instrument(skip_all, fields(item = %item.name))]
    fn write_item(&self, item: &RegistryItem) -> ShipkitResult<PathBuf> {
        self.write_json(&item.file_name(), item)
    }

    #[instrument(skip_all, fields(items = index.len()))]
    fn write_index(&self, index: &RegistryIndex) -> ShipkitResult<PathBuf> {
        self.write_json(INDEX_FILE, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use crate::{LocalFilesystem, MemoryFilesystem};
    use shipkit_core::domain::{
        DEFAULT_INDEX_SCHEMA, DEFAULT_ITEM_SCHEMA, DependencyLinker, FileRole, INDEX_NAME,
        RegistryFile,
    };
    use tempfile::TempDir;

    fn item() -> RegistryItem {
        RegistryItem {
            schema: DEFAULT_ITEM_SCHEMA.into(),
            name: "auth-otp".into(),
            kind: "registry:lib".into(),
            title: "OTP".into(),
            description: "One-time password login".into(),
            files: vec![RegistryFile {
                path: "api/login.ts".into(),
                content: "export {};\n".into(),
                role: FileRole::Library,
                target: "app/api/login.ts".into(),
            }],
            dependencies: vec!["zod".into()],
            dev_dependencies: Vec::new(),
            registry_dependencies: Vec::new(),
        }
    }

    #[test]
    fn writes_pretty_json_with_trailing_newline() {
        let fs = MemoryFilesystem::new();
        let writer = JsonManifestWriter::new("public/r", Box::new(fs.clone()));

        let path = writer.write_item(&item()).unwrap();
        assert_eq!(path, Path::new("public/r/auth-otp.json"));

        let json = fs.read_file(&path).unwrap();
        assert!(json.ends_with("}\n"));
        assert!(json.starts_with("{\n  \"$schema\""));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["files"][0]["type"], "registry:lib");
        assert_eq!(value["dependencies"][0], "zod");
        assert!(value.get("devDependencies").is_none());
        assert!(value.get("registryDependencies").is_none());
    }

    #[test]
    fn writes_index_next_to_items() {
        let fs = MemoryFilesystem::new();
        let writer = JsonManifestWriter::new("out", Box::new(fs.clone()));
        let mut index = RegistryIndex::new(DEFAULT_INDEX_SCHEMA);
        index.push(&item(), &DependencyLinker::new("https://r.example", ["auth-otp"]));

        let path = writer.write_index(&index).unwrap();
        assert_eq!(path, Path::new("out/index.json"));

        let value: serde_json::Value =
            serde_json::from_str(&fs.read_file(&path).unwrap()).unwrap();
        assert_eq!(value["items"][0]["url"], "https://r.example/auth-otp.json");
        assert_eq!(value["items"][0]["type"], "registry:lib");
    }

    #[test]
    fn index_file_uses_the_reserved_name() {
        assert_eq!(INDEX_FILE, format!("{INDEX_NAME}.json"));
    }

    #[test]
    fn rewriting_produces_identical_bytes() {
        let temp = TempDir::new().unwrap();
        let writer = JsonManifestWriter::new(temp.path().join("r"), Box::new(LocalFilesystem));

        let path = writer.write_item(&item()).unwrap();
        let first = std::fs::read(&path).unwrap();
        writer.write_item(&item()).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), first);
    }
}
