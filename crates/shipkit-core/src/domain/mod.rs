// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Shipkit.
//!
//! Pure registry-assembly logic: descriptors and their validation, path
//! patterns, builders, dependency linking and manifest assembly. All reading
//! and writing happens behind the ports of the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No I/O**: descriptors and files arrive already read
//! - **Synchronous**: one feature at a time, in discovery order
//! - **Immutable entities**: domain objects are Clone + PartialEq
//! - **Static builders**: the builder set is declared once in [`builders`]
//!
// Public API - what the world sees
pub mod builders;
pub mod entities;
pub mod error;
pub mod linker;
pub mod value_objects;

mod validation;

// Re-exports for convenience
pub use entities::{
    builder::{Builder, BuilderRegistry, FeatureName, NameConvention},
    common::RelativePath,
    descriptor::{Capabilities, FeatureDescriptor, RawDescriptor, Requirements},
    pattern::{MappingTable, PathPattern, PatternKind, PatternMapping, TargetMappings},
    registry_item::{
        DEFAULT_INDEX_SCHEMA, DEFAULT_ITEM_SCHEMA, INDEX_NAME, IndexEntry, RegistryFile,
        RegistryIndex, RegistryItem, RegistryItemAssembler,
    },
    source::{DESCRIPTOR_FILE, FeatureDir, SourceFile, is_eligible},
};

pub use error::{DomainError, ErrorCategory};
pub use linker::DependencyLinker;
pub use validation::DescriptorValidator;
pub use value_objects::{Capability, FileRole, Framework, Orm, WILDCARD};
