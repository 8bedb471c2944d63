//! Feature directories and the source files they contain.

use std::path::{Path, PathBuf};

use super::common::RelativePath;

/// Default descriptor file name inside a feature directory.
pub const DESCRIPTOR_FILE: &str = "feature.json";

/// Files whose name starts with this are always shipped (example env files).
pub const ENV_EXAMPLE_PREFIX: &str = ".env.example";

/// Extensions treated as text/source payload.
const SOURCE_EXTENSIONS: &[&str] = &[
    "ts", "tsx", "js", "jsx", "mjs", "cjs", "json", "md", "mdx", "css", "scss", "sql", "prisma",
    "yaml", "yml", "toml", "txt", "html", "svg",
];

/// JSON stems reserved for registry bookkeeping, never shipped.
const RESERVED_JSON_STEMS: &[&str] = &["index", "manifest", "schema"];

/// One discovered feature directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureDir {
    /// Directory holding the feature's source tree.
    pub root: PathBuf,
    /// Descriptor file inside `root`.
    pub descriptor: PathBuf,
}

impl FeatureDir {
    pub fn new(root: impl Into<PathBuf>, descriptor_file: &str) -> Self {
        let root = root.into();
        let descriptor = root.join(descriptor_file);
        Self { root, descriptor }
    }

    /// Directory name, used in messages before the descriptor is parsed.
    pub fn label(&self) -> String {
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.root.display().to_string())
    }

    /// Descriptor file name (for eligibility filtering).
    pub fn descriptor_file_name(&self) -> &str {
        self.descriptor
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(DESCRIPTOR_FILE)
    }
}

/// A payload file read verbatim from a feature directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub absolute: PathBuf,
    pub relative: RelativePath,
    pub content: String,
}

impl SourceFile {
    pub fn new(absolute: impl Into<PathBuf>, relative: RelativePath, content: String) -> Self {
        Self {
            absolute: absolute.into(),
            relative,
            content,
        }
    }

    /// Build a file whose absolute path is `root/relative`.
    pub fn under(root: &Path, relative: &str, content: impl Into<String>) -> Self {
        let relative = RelativePath::new(relative);
        Self {
            absolute: root.join(relative.as_str()),
            relative,
            content: content.into(),
        }
    }

    pub fn path(&self) -> &str {
        self.relative.as_str()
    }
}

/// Whether a feature-relative file should be shipped in the manifest.
pub fn is_eligible(relative: &RelativePath, descriptor_file: &str) -> bool {
    let name = relative.file_name();
    if relative.as_str() == descriptor_file {
        return false;
    }
    if name.starts_with(ENV_EXAMPLE_PREFIX) {
        return true;
    }
    let Some(ext) = relative.extension() else {
        return false;
    };
    if ext == "json" {
        let stem = &name[..name.len() - ".json".len()];
        if RESERVED_JSON_STEMS.contains(&stem) {
            return false;
        }
    }
    SOURCE_EXTENSIONS.contains(&ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eligible(path: &str) -> bool {
        is_eligible(&RelativePath::new(path), DESCRIPTOR_FILE)
    }

    #[test]
    fn source_files_are_eligible() {
        assert!(eligible("api/login.ts"));
        assert!(eligible("components/form.tsx"));
        assert!(eligible("db/schema.prisma"));
        assert!(eligible("messages/en.json"));
    }

    #[test]
    fn env_examples_are_eligible() {
        assert!(eligible(".env.example"));
        assert!(eligible(".env.example.drizzle"));
        assert!(!eligible(".env"));
    }

    #[test]
    fn bookkeeping_files_are_excluded() {
        assert!(!eligible("feature.json"));
        assert!(!eligible("index.json"));
        assert!(!eligible("nested/manifest.json"));
        assert!(!eligible("schema.json"));
    }

    #[test]
    fn binary_and_unknown_files_are_excluded() {
        assert!(!eligible("logo.png"));
        assert!(!eligible("Makefile"));
    }

    #[test]
    fn nested_descriptor_name_is_still_shipped() {
        // Only the root descriptor is bookkeeping.
        assert!(eligible("fixtures/feature.json"));
    }

    #[test]
    fn feature_dir_label_is_directory_name() {
        let dir = FeatureDir::new("features/auth-otp", DESCRIPTOR_FILE);
        assert_eq!(dir.label(), "auth-otp");
        assert_eq!(dir.descriptor_file_name(), "feature.json");
    }
}
