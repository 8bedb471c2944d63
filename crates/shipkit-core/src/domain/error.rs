// ============================================================================
// domain/error.rs - DESCRIPTOR, BUILDER AND PATTERN ERRORS
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::value_objects::{Framework, Orm};

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports can be re-rendered)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Descriptor errors
    // ========================================================================
    #[error("Failed to parse descriptor {}: {reason}", path.display())]
    DescriptorParse { path: PathBuf, reason: String },

    #[error("Descriptor is missing required fields: {}", fields.join(", "))]
    MissingRequiredFields { fields: Vec<&'static str> },

    #[error(
        "Invalid capability values: {}. Valid orm values: {}. Valid framework values: {}",
        invalid.join(", "),
        Orm::valid_values().join(", "),
        Framework::valid_values().join(", ")
    )]
    InvalidCapabilities { invalid: Vec<String> },

    #[error(
        "Duplicate feature name '{name}' declared in {} and {}",
        first.display(),
        second.display()
    )]
    DuplicateFeature {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Invalid feature name '{name}': {reason}")]
    InvalidFeatureName { name: String, reason: &'static str },

    #[error("Feature name '{name}' is reserved: its manifest would overwrite {file}")]
    ReservedFeatureName { name: String, file: String },

    // ========================================================================
    // Builder errors
    // ========================================================================
    #[error(
        "No builder can handle feature '{feature}'. Registered builders: {}",
        builders.join(", ")
    )]
    NoMatchingBuilder {
        feature: String,
        builders: Vec<String>,
    },

    #[error("Invalid path pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    // ========================================================================
    // Path errors
    // ========================================================================
    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::DescriptorParse { path, .. } => vec![
                format!("Fix the JSON syntax in {}", path.display()),
                "Run: shipkit check to validate every descriptor without writing".into(),
            ],
            Self::MissingRequiredFields { fields } => vec![
                format!("Add the missing fields: {}", fields.join(", ")),
                "Every descriptor needs non-empty name, type, title and description".into(),
            ],
            Self::InvalidCapabilities { .. } => vec![
                format!("orm accepts: {}", Orm::valid_values().join(", ")),
                format!("framework accepts: {}", Framework::valid_values().join(", ")),
            ],
            Self::DuplicateFeature { name, .. } => vec![
                format!("Rename one of the features called '{}'", name),
                "Feature names must be unique across the features directory".into(),
            ],
            Self::InvalidFeatureName { name, .. } => vec![
                format!("Rename '{}' so it is a single path segment", name),
                "Names become manifest file names: no '/', '\\', '..' or leading '.'".into(),
            ],
            Self::ReservedFeatureName { name, file } => vec![
                format!("Rename the feature called '{}'", name),
                format!("Or skip {} with: shipkit build --no-index", file),
            ],
            Self::NoMatchingBuilder { feature, builders } => vec![
                format!("No builder accepted '{}'", feature),
                format!("Known builders: {}", builders.join(", ")),
                "Declare capabilities.framework or follow a builder's naming convention".into(),
                "Try: shipkit list".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DescriptorParse { .. }
            | Self::MissingRequiredFields { .. }
            | Self::InvalidCapabilities { .. }
            | Self::DuplicateFeature { .. }
            | Self::InvalidFeatureName { .. }
            | Self::ReservedFeatureName { .. }
            | Self::InvalidPattern { .. }
            | Self::AbsolutePathNotAllowed { .. } => ErrorCategory::Validation,
            Self::NoMatchingBuilder { .. } => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
