//! Shipkit Core - registry assembly pipeline.
//!
//! This crate provides the domain and application layers for the Shipkit
//! registry builder, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           shipkit-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (RegistryBuildService, BuilderCatalog)  │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (FeatureSource, ManifestSink, Filesystem)│
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     shipkit-adapters (Infrastructure)   │
//! │ (FsFeatureSource, JsonManifestWriter)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Descriptor, Builder, MappingTable,     │
//! │  RegistryItem, DependencyLinker)        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shipkit_core::{
//!     application::{BuildOptions, RegistryBuildService},
//!     domain::BuilderRegistry,
//! };
//!
//! let builders = BuilderRegistry::builtin().unwrap();
//! let service = RegistryBuildService::new(source, sink, builders, BuildOptions::default());
//! let report = service.build().unwrap();
//! println!("{} manifests written", report.len());
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        BuildOptions, BuildReport, BuilderCatalog, RegistryBuildService,
        ports::{FeatureSource, Filesystem, ManifestSink},
    };
    pub use crate::domain::{
        Builder, BuilderRegistry, DependencyLinker, FeatureDescriptor, FeatureDir, FileRole,
        Framework, MappingTable, Orm, RawDescriptor, RegistryFile, RegistryIndex, RegistryItem,
        SourceFile,
    };
    pub use crate::error::{ShipkitError, ShipkitResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
