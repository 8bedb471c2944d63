//! Output manifests and their assembly.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::domain::{
    entities::{builder::Builder, descriptor::FeatureDescriptor, source::SourceFile},
    linker::DependencyLinker,
    value_objects::FileRole,
};

/// Schema URL stamped on every item manifest unless configured otherwise.
pub const DEFAULT_ITEM_SCHEMA: &str = "https://ui.shadcn.com/schema/registry-item.json";

/// Schema URL stamped on the registry index.
pub const DEFAULT_INDEX_SCHEMA: &str = "https://ui.shadcn.com/schema/registry.json";

/// File stem of the registry index, written next to the item manifests.
pub const INDEX_NAME: &str = "index";

/// One shipped file inside a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryFile {
    pub path: String,
    pub content: String,
    #[serde(rename = "type")]
    pub role: FileRole,
    pub target: String,
}

/// The manifest written as `{name}.json`.
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryItem {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub files: Vec<RegistryFile>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dev_dependencies: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub registry_dependencies: Vec<String>,
}

impl RegistryItem {
    /// File name the manifest is written under.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.name)
    }
}

/// Entry of `index.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub url: String,
}

/// The registry index listing every item built in a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryIndex {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub items: Vec<IndexEntry>,
}

impl RegistryIndex {
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            items: Vec::new(),
        }
    }

    /// Append `item`, addressed through the linker's base URL.
    pub fn push(&mut self, item: &RegistryItem, linker: &DependencyLinker) {
        self.items.push(IndexEntry {
            name: item.name.clone(),
            kind: item.kind.clone(),
            title: item.title.clone(),
            description: item.description.clone(),
            url: linker.url_for(&item.name),
        });
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Turns a validated descriptor and its files into a [`RegistryItem`].
#[derive(Debug, Clone)]
pub struct RegistryItemAssembler {
    schema_url: String,
}

impl Default for RegistryItemAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_ITEM_SCHEMA)
    }
}

impl RegistryItemAssembler {
    pub fn new(schema_url: impl Into<String>) -> Self {
        Self {
            schema_url: schema_url.into(),
        }
    }

    pub fn schema_url(&self) -> &str {
        &self.schema_url
    }

    /// Classify and place every file, then attach descriptor metadata.
    ///
    /// File order follows `files`; callers pass them in walk order.
    #[instrument(skip_all, fields(feature = %descriptor.name, builder = builder.name()))]
    pub fn assemble(
        &self,
        descriptor: &FeatureDescriptor,
        builder: &Builder,
        files: &[SourceFile],
        linker: &DependencyLinker,
    ) -> RegistryItem {
        let files = files
            .iter()
            .map(|file| {
                let target = builder.target_path(file, descriptor);
                let role = FileRole::from_relative_path(file.path());
                debug!(path = file.path(), %target, %role, "placed file");
                RegistryFile {
                    path: file.path().to_owned(),
                    content: file.content.clone(),
                    role,
                    target,
                }
            })
            .collect();

        RegistryItem {
            schema: self.schema_url.clone(),
            name: descriptor.name.clone(),
            kind: descriptor.kind.clone(),
            title: descriptor.title.clone(),
            description: descriptor.description.clone(),
            files,
            dependencies: descriptor.dependencies.clone(),
            dev_dependencies: descriptor.dev_dependencies.clone(),
            registry_dependencies: linker.link(&descriptor.registry_dependencies),
        }
    }
}
