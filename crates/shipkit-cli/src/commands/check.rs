//! Implementation of the `shipkit check` command.
//!
//! Runs discovery, validation, builder selection and placement exactly as
//! `build` does, then reports the result instead of writing manifests.

use serde_json::json;

use shipkit_core::application::AssembledFeature;

use super::{build_options, registry_service};
use crate::{
    cli::{CheckArgs, OutputFormat},
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

pub fn execute(args: CheckArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let features_dir = args
        .source
        .features_dir
        .unwrap_or_else(|| config.registry.features_dir.clone());
    let options = build_options(&config, args.base_url, false);

    // The sink is never called by `check`.
    let service = registry_service(
        &features_dir,
        &config.registry.output_dir,
        options,
        &config,
    )?;
    let features = service
        .check()
        .with_cli_context(|| format!("checking {}", features_dir.display()))?;

    if output.format() == OutputFormat::Json {
        let rendered: Vec<_> = features.iter().map(feature_json).collect();
        output.json(&rendered)?;
        return Ok(());
    }

    for feature in &features {
        output.success(&format!("{} ({})", feature.item.name, feature.builder))?;
        for file in &feature.item.files {
            output.print(&format!("    {} -> {}", file.path, file.target))?;
        }
    }

    if features.is_empty() {
        output.warning(&format!("No features found in {}", features_dir.display()))?;
    } else {
        output.print(&format!("{} feature(s) OK", features.len()))?;
    }

    Ok(())
}

fn feature_json(feature: &AssembledFeature) -> serde_json::Value {
    let files: Vec<_> = feature
        .item
        .files
        .iter()
        .map(|f| json!({ "path": f.path, "target": f.target, "type": f.role }))
        .collect();

    json!({
        "name": feature.item.name,
        "builder": feature.builder,
        "directory": feature.dir.root.display().to_string(),
        "files": files,
        "registryDependencies": feature.item.registry_dependencies,
    })
}
