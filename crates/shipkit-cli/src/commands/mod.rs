//! Command handlers, one module per subcommand.

use std::path::Path;

use shipkit_adapters::{FsFeatureSource, JsonManifestWriter, LocalFilesystem};
use shipkit_core::{
    application::{BuildOptions, RegistryBuildService},
    domain::BuilderRegistry,
    error::ShipkitError,
};

use crate::{config::AppConfig, error::CliResult};

pub mod build;
pub mod check;
pub mod completions;
pub mod config;
pub mod list;

/// The built-in builders; a load failure is reported as internal.
fn builtin_builders() -> CliResult<BuilderRegistry> {
    BuilderRegistry::builtin().map_err(|e| {
        ShipkitError::Internal {
            message: format!("built-in builder table is invalid: {e}"),
        }
        .into()
    })
}

/// Merge the configured registry settings with per-command overrides.
fn build_options(config: &AppConfig, base_url: Option<String>, write_index: bool) -> BuildOptions {
    BuildOptions {
        base_url: base_url.unwrap_or_else(|| config.registry.base_url.clone()),
        schema_url: config.registry.schema_url.clone(),
        index_schema_url: config.registry.index_schema_url.clone(),
        write_index,
    }
}

/// Wire the filesystem adapters into a build service.
fn registry_service(
    features_dir: &Path,
    output_dir: &Path,
    options: BuildOptions,
    config: &AppConfig,
) -> CliResult<RegistryBuildService> {
    let source = FsFeatureSource::new(features_dir)
        .with_descriptor_file(config.registry.descriptor_file.clone());
    let sink = JsonManifestWriter::new(output_dir, Box::new(LocalFilesystem::new()));
    let builders = builtin_builders()?;

    Ok(RegistryBuildService::new(
        Box::new(source),
        Box::new(sink),
        builders,
        options,
    ))
}
