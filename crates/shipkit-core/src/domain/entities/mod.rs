pub mod builder;
pub mod common;
pub mod descriptor;
pub mod pattern;
pub mod registry_item;
pub mod source;

pub use crate::domain::DomainError;
pub use builder::{Builder, BuilderRegistry};
pub use descriptor::{FeatureDescriptor, RawDescriptor};
pub use pattern::{MappingTable, TargetMappings};
pub use registry_item::{RegistryFile, RegistryIndex, RegistryItem};
pub use source::{FeatureDir, SourceFile};
