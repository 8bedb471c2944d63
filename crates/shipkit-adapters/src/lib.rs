//! Infrastructure adapters for Shipkit.
//!
//! This crate implements the ports defined in `shipkit-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod source;
pub mod writer;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use source::{FsFeatureSource, MemoryFeatureSource};
pub use writer::JsonManifestWriter;
