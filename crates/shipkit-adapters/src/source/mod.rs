//! Feature source adapters.

mod fs;
mod memory;

use std::path::Path;

use shipkit_core::{
    domain::{DomainError, RawDescriptor},
    error::ShipkitResult,
};

pub use fs::FsFeatureSource;
pub use memory::MemoryFeatureSource;

/// Parse descriptor JSON read from `path`.
pub(crate) fn parse_descriptor(path: &Path, text: &str) -> ShipkitResult<RawDescriptor> {
    serde_json::from_str(text).map_err(|e| {
        DomainError::DescriptorParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
        .into()
    })
}
