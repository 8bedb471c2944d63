//! Builder Catalog - read-only view of the registered builders.

use crate::domain::{Builder, BuilderRegistry, FeatureName, NameConvention};

/// Information about a builder for display purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderInfo {
    pub name: String,
    /// Name substituted for `{feature}`; `None` when the descriptor's own
    /// name is used.
    pub feature: Option<String>,
    /// Target frameworks; empty means any.
    pub frameworks: Vec<String>,
    /// Human-readable naming convention, e.g. `auth* (contains "tanstack")`.
    pub convention: String,
}

impl From<&Builder> for BuilderInfo {
    fn from(builder: &Builder) -> Self {
        Self {
            name: builder.name().to_owned(),
            feature: match builder.feature() {
                FeatureName::Fixed(name) => Some(name.to_owned()),
                FeatureName::FromDescriptor => None,
            },
            frameworks: builder
                .frameworks()
                .iter()
                .map(|fw| fw.to_string())
                .collect(),
            convention: describe(builder.convention()),
        }
    }
}

fn describe(convention: NameConvention) -> String {
    let family = if convention.family.is_empty() {
        "*".to_owned()
    } else {
        format!("{}*", convention.family)
    };
    match convention.marker {
        Some(marker) => format!("{family} (contains \"{marker}\")"),
        None => family,
    }
}

/// Service for builder metadata queries.
pub struct BuilderCatalog {
    registry: BuilderRegistry,
}

impl BuilderCatalog {
    pub fn new(registry: BuilderRegistry) -> Self {
        Self { registry }
    }

    /// Every builder, in precedence order.
    pub fn list(&self) -> Vec<BuilderInfo> {
        self.registry.iter().map(BuilderInfo::from).collect()
    }

    /// Look up one builder by name.
    pub fn get(&self, name: &str) -> Option<BuilderInfo> {
        self.registry
            .iter()
            .find(|b| b.name() == name)
            .map(BuilderInfo::from)
    }

    pub fn registry(&self) -> &BuilderRegistry {
        &self.registry
    }
}
