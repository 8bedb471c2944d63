//! Feature descriptors: the raw `feature.json` shape and its validated form.
//!
//! A descriptor is read in two stages. [`RawDescriptor`] accepts anything
//! that is syntactically valid JSON for the shape, so that every missing or
//! invalid field can be reported in one go. [`DescriptorValidator`] then turns
//! it into a [`FeatureDescriptor`] whose invariants hold for the rest of the
//! build.
//!
//! [`DescriptorValidator`]: crate::domain::DescriptorValidator

use serde::Deserialize;

use crate::domain::{
    entities::pattern::{MappingTable, TargetMappings},
    value_objects::{Capability, Framework, Orm},
};

/// A capability list as written: a single string or an array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn values(&self) -> &[String] {
        match self {
            Self::One(value) => std::slice::from_ref(value),
            Self::Many(values) => values,
        }
    }
}

/// `capabilities` section before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawCapabilities {
    pub orm: Option<OneOrMany>,
    pub framework: Option<OneOrMany>,
}

/// `requires` section before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawRequires {
    pub orm: Option<String>,
    pub framework: Option<String>,
}

/// Descriptor exactly as deserialized from JSON.
///
/// Unknown keys (such as `$schema`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDescriptor {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub dev_dependencies: Vec<String>,
    #[serde(default)]
    pub registry_dependencies: Vec<String>,
    #[serde(default)]
    pub capabilities: RawCapabilities,
    #[serde(default)]
    pub requires: RawRequires,
    #[serde(default)]
    pub target_mappings: TargetMappings,
}

impl RawDescriptor {
    /// The declared name, if present and non-blank. Pass 1 only needs this.
    pub fn declared_name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }
}

/// Validated capabilities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub orm: Option<Capability<Orm>>,
    pub framework: Option<Capability<Framework>>,
}

/// Validated single-value constraints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Requirements {
    pub orm: Option<Orm>,
    pub framework: Option<Framework>,
}

/// A validated feature descriptor.
///
/// Invariant: `name`, `kind`, `title` and `description` are non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureDescriptor {
    pub name: String,
    pub kind: String,
    pub title: String,
    pub description: String,
    pub dependencies: Vec<String>,
    pub dev_dependencies: Vec<String>,
    pub registry_dependencies: Vec<String>,
    pub capabilities: Capabilities,
    pub requires: Requirements,
    pub target_mappings: TargetMappings,
}

impl FeatureDescriptor {
    /// Minimal descriptor; mostly useful for tests and programmatic builds.
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            title: title.into(),
            description: description.into(),
            dependencies: Vec::new(),
            dev_dependencies: Vec::new(),
            registry_dependencies: Vec::new(),
            capabilities: Capabilities::default(),
            requires: Requirements::default(),
            target_mappings: TargetMappings::default(),
        }
    }

    pub fn with_frameworks(mut self, frameworks: Capability<Framework>) -> Self {
        self.capabilities.framework = Some(frameworks);
        self
    }

    pub fn with_registry_dependencies(mut self, deps: Vec<String>) -> Self {
        self.registry_dependencies = deps;
        self
    }

    pub fn with_target_mappings(mut self, mappings: TargetMappings) -> Self {
        self.target_mappings = mappings;
        self
    }

    /// Frameworks declared explicitly (the wildcard does not count).
    pub fn declared_frameworks(&self) -> Option<&[Framework]> {
        self.capabilities
            .framework
            .as_ref()
            .and_then(Capability::explicit)
    }

    /// Key into `targetMappings`: the first declared framework, or the
    /// default framework when none is declared.
    pub fn framework_key(&self) -> &'static str {
        self.declared_frameworks()
            .and_then(|fws| fws.first())
            .copied()
            .unwrap_or(Framework::DEFAULT)
            .as_str()
    }

    /// Descriptor-supplied override table for this descriptor's framework.
    pub fn override_table(&self) -> Option<&MappingTable> {
        self.target_mappings.get(self.framework_key())
    }
}
