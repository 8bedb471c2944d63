//! Builders: per-framework strategies that place a feature's files.
//!
//! A [`Builder`] owns a base [`MappingTable`] and decides, through
//! [`Builder::can_handle`], which feature descriptors it is responsible for.
//! The [`BuilderRegistry`] keeps builders in an explicit precedence order and
//! hands out the first one that accepts a descriptor.
//!
//! ## Selection rules
//!
//! 1. A descriptor that declares concrete frameworks is authoritative: a
//!    builder accepts it only if it targets one of those frameworks and the
//!    feature name belongs to the builder's family. The naming marker is not
//!    consulted.
//! 2. Otherwise the builder's [`NameConvention`] decides.
//!
//! A `requires.framework` constraint applies on top of both: builders that
//! target specific frameworks must target the required one.
//!
//! Specific builders are registered before generic ones so that a generic
//! convention cannot capture a feature meant for a narrower builder.

use tracing::{debug, instrument};

use crate::domain::{
    builders::{BUILDER_REGISTRY, BuilderDef},
    entities::{descriptor::FeatureDescriptor, pattern::MappingTable, source::SourceFile},
    error::DomainError,
    value_objects::Framework,
};

/// Naming convention a builder falls back to when no framework is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameConvention {
    /// Required name prefix; empty admits every name.
    pub family: &'static str,
    /// Substring that must also appear in the name, if any.
    pub marker: Option<&'static str>,
}

impl NameConvention {
    pub const ANY: Self = Self {
        family: "",
        marker: None,
    };

    pub const fn family(family: &'static str) -> Self {
        Self {
            family,
            marker: None,
        }
    }

    pub const fn marked(family: &'static str, marker: &'static str) -> Self {
        Self {
            family,
            marker: Some(marker),
        }
    }

    pub fn admits_family(&self, name: &str) -> bool {
        name.starts_with(self.family)
    }

    pub fn matches(&self, name: &str) -> bool {
        self.admits_family(name) && self.marker.is_none_or(|marker| name.contains(marker))
    }
}

/// Feature name a builder substitutes for `{feature}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureName {
    /// A fixed name shared by every feature the builder handles.
    Fixed(&'static str),
    /// The descriptor's own name.
    FromDescriptor,
}

/// A framework-specific file placement strategy.
#[derive(Debug, Clone)]
pub struct Builder {
    name: &'static str,
    feature: FeatureName,
    /// Frameworks this builder targets; empty means any.
    frameworks: &'static [Framework],
    convention: NameConvention,
    mappings: MappingTable,
}

impl Builder {
    pub fn new(
        name: &'static str,
        feature: FeatureName,
        frameworks: &'static [Framework],
        convention: NameConvention,
        mappings: MappingTable,
    ) -> Self {
        Self {
            name,
            feature,
            frameworks,
            convention,
            mappings,
        }
    }

    /// Compile a static builder definition.
    pub fn from_def(def: &BuilderDef) -> Result<Self, DomainError> {
        Ok(Self::new(
            def.name,
            def.feature,
            def.frameworks,
            def.convention,
            MappingTable::from_pairs(def.mappings.iter().copied())?,
        ))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn frameworks(&self) -> &'static [Framework] {
        self.frameworks
    }

    pub fn convention(&self) -> NameConvention {
        self.convention
    }

    pub fn mappings(&self) -> &MappingTable {
        &self.mappings
    }

    /// Feature name substituted for `{feature}` when building `descriptor_name`.
    pub fn feature_name<'a>(&self, descriptor_name: &'a str) -> &'a str {
        match self.feature {
            FeatureName::Fixed(name) => name,
            FeatureName::FromDescriptor => descriptor_name,
        }
    }

    pub fn feature(&self) -> FeatureName {
        self.feature
    }

    fn targets(&self, framework: &Framework) -> bool {
        self.frameworks.is_empty() || self.frameworks.contains(framework)
    }

    /// Whether this builder owns the feature `name` described by `descriptor`.
    pub fn can_handle(&self, name: &str, descriptor: &FeatureDescriptor) -> bool {
        if !descriptor
            .requires
            .framework
            .is_none_or(|required| self.targets(&required))
        {
            return false;
        }
        if let Some(declared) = descriptor.declared_frameworks() {
            return declared.iter().any(|fw| self.targets(fw))
                && self.convention.admits_family(name);
        }
        self.convention.matches(name)
    }

    /// Table in effect for `descriptor`: its override for the detected
    /// framework when present, this builder's base table otherwise.
    pub fn table_for<'a>(&'a self, descriptor: &'a FeatureDescriptor) -> &'a MappingTable {
        descriptor.override_table().unwrap_or(&self.mappings)
    }

    /// Installed path of `file` for the feature `descriptor`.
    ///
    /// Files no rule matches keep their relative path.
    pub fn target_path(&self, file: &SourceFile, descriptor: &FeatureDescriptor) -> String {
        let feature = self.feature_name(&descriptor.name);
        let path = file.path();
        match self.table_for(descriptor).resolve(path, feature) {
            Some(target) => target,
            None => {
                debug!(builder = self.name, path, "no mapping matched; keeping relative path");
                path.to_owned()
            }
        }
    }
}

/// Ordered set of builders; declaration order is precedence order.
#[derive(Debug, Clone)]
pub struct BuilderRegistry {
    builders: Vec<Builder>,
}

impl BuilderRegistry {
    pub fn new(builders: Vec<Builder>) -> Self {
        Self { builders }
    }

    /// Every built-in builder, in the precedence order of [`BUILDER_REGISTRY`].
    pub fn builtin() -> Result<Self, DomainError> {
        BUILDER_REGISTRY
            .iter()
            .map(Builder::from_def)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    /// First builder whose predicate accepts the descriptor.
    #[instrument(skip(self, descriptor))]
    pub fn select(
        &self,
        name: &str,
        descriptor: &FeatureDescriptor,
    ) -> Result<&Builder, DomainError> {
        let builder = self
            .builders
            .iter()
            .find(|b| b.can_handle(name, descriptor))
            .ok_or_else(|| DomainError::NoMatchingBuilder {
                feature: name.to_owned(),
                builders: self.names().map(str::to_owned).collect(),
            })?;
        debug!(builder = builder.name(), "builder selected");
        Ok(builder)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.builders.iter().map(Builder::name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Builder> {
        self.builders.iter()
    }

    pub fn len(&self) -> usize {
        self.builders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }
}
