//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `shipkit-adapters` implement
//! these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `FeatureSource`: Feature discovery and reading
//!   - `ManifestSink`: Manifest and index output
//!   - `Filesystem`: File operations used by sinks

use std::path::{Path, PathBuf};

use crate::domain::{FeatureDir, RawDescriptor, RegistryIndex, RegistryItem, SourceFile};
use crate::error::ShipkitResult;

/// Port for reading feature directories.
///
/// Implemented by:
/// - `shipkit_adapters::source::FsFeatureSource` (production)
/// - `shipkit_adapters::source::MemoryFeatureSource` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait FeatureSource: Send + Sync {
    /// Every feature directory, in a stable order.
    fn discover(&self) -> ShipkitResult<Vec<FeatureDir>>;

    /// Parse the descriptor of `dir` without validating it.
    fn read_descriptor(&self, dir: &FeatureDir) -> ShipkitResult<RawDescriptor>;

    /// Every eligible source file of `dir`, in sorted walk order.
    fn read_sources(&self, dir: &FeatureDir) -> ShipkitResult<Vec<SourceFile>>;
}

/// Port for persisting assembled manifests.
///
/// Implemented by:
/// - `shipkit_adapters::writer::JsonManifestWriter`
#[cfg_attr(test, mockall::automock)]
pub trait ManifestSink: Send + Sync {
    /// Write one item manifest, returning where it went.
    fn write_item(&self, item: &RegistryItem) -> ShipkitResult<PathBuf>;

    /// Write the registry index, returning where it went.
    fn write_index(&self, index: &RegistryIndex) -> ShipkitResult<PathBuf>;
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `shipkit_adapters::filesystem::LocalFilesystem` (production)
/// - `shipkit_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ShipkitResult<()>;

    /// Write content to a file, replacing any previous content.
    fn write_file(&self, path: &Path, content: &str) -> ShipkitResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}
