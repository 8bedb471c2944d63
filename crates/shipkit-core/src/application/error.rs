//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not business
//! logic. Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::{ErrorCategory, ShipkitError};

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The configured features directory does not exist.
    #[error("Features directory not found: {}", path.display())]
    FeaturesDirNotFound { path: PathBuf },

    /// Reading a feature directory failed.
    #[error("Failed to read {}: {reason}", path.display())]
    SourceRead { path: PathBuf, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {}: {reason}", path.display())]
    FilesystemError { path: PathBuf, reason: String },

    /// A manifest could not be serialized.
    #[error("Failed to serialize {what}: {reason}")]
    SerializationFailed { what: String, reason: String },

    /// Processing one feature failed; the run stops here.
    #[error("Feature '{feature}' failed: {source}")]
    FeatureFailed {
        feature: String,
        source: Box<ShipkitError>,
    },
}

impl ApplicationError {
    /// Wrap an error raised while processing `feature`.
    pub fn feature_failed(feature: impl Into<String>, source: ShipkitError) -> Self {
        Self::FeatureFailed {
            feature: feature.into(),
            source: Box::new(source),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FeaturesDirNotFound { path } => vec![
                format!("Create {} or point at another directory", path.display()),
                "Use --features-dir or set registry.features_dir in shipkit.toml".into(),
            ],
            Self::SourceRead { path, .. } => vec![
                format!("Failed to read: {}", path.display()),
                "Check that the file exists and is readable".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the output directory is not a file".into(),
            ],
            Self::FeatureFailed { source, .. } => source.suggestions(),
            Self::SerializationFailed { .. } => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FeaturesDirNotFound { .. } => ErrorCategory::NotFound,
            Self::SourceRead { .. }
            | Self::FilesystemError { .. }
            | Self::SerializationFailed { .. } => ErrorCategory::Internal,
            Self::FeatureFailed { source, .. } => source.category(),
        }
    }
}
