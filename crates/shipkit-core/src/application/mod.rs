//! Application layer for Shipkit.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (RegistryBuildService, BuilderCatalog)
//! - **Ports**: Interface definitions (traits) for reading features and
//!   writing manifests
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    AssembledFeature, BuildOptions, BuildReport, BuilderCatalog, BuilderInfo, BuiltFeature,
    RegistryBuildService,
};

// Re-export port traits (for adapter implementation)
pub use ports::{FeatureSource, Filesystem, ManifestSink};

pub use error::ApplicationError;
