//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "build the registry" or "list builders".

pub mod build_service;
pub mod builder_catalog;

pub use build_service::{
    AssembledFeature, BuildOptions, BuildReport, BuiltFeature, DEFAULT_BASE_URL,
    RegistryBuildService,
};
pub use builder_catalog::{BuilderCatalog, BuilderInfo};
