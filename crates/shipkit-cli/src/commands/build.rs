//! Implementation of the `shipkit build` command.

use serde_json::json;
use tracing::info;

use shipkit_core::application::BuildReport;

use super::{build_options, registry_service};
use crate::{
    cli::{BuildArgs, OutputFormat},
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

pub fn execute(args: BuildArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let features_dir = args
        .source
        .features_dir
        .unwrap_or_else(|| config.registry.features_dir.clone());
    let output_dir = args
        .out
        .unwrap_or_else(|| config.registry.output_dir.clone());
    let options = build_options(&config, args.base_url, !args.no_index);

    info!(
        features_dir = %features_dir.display(),
        output_dir = %output_dir.display(),
        base_url = %options.base_url,
        "Building registry"
    );

    let service = registry_service(&features_dir, &output_dir, options, &config)?;

    let spinner = output.spinner(&format!("Building {}", features_dir.display()));
    let result = service.build();
    spinner.finish_and_clear();
    let report = result.with_cli_context(|| format!("building {}", features_dir.display()))?;

    if output.format() == OutputFormat::Json {
        output.json(&report_json(&report))?;
        return Ok(());
    }

    for feature in report.iter() {
        output.success(&format!(
            "{} ({}): {} file(s) -> {}",
            feature.name,
            feature.builder,
            feature.files,
            feature.output.display()
        ))?;
    }
    if let Some(index) = &report.index {
        output.info(&format!("index -> {}", index.display()))?;
    }

    if report.is_empty() {
        output.warning(&format!("No features found in {}", features_dir.display()))?;
    } else {
        output.print(&format!("Built {} feature(s)", report.len()))?;
    }

    Ok(())
}

fn report_json(report: &BuildReport) -> serde_json::Value {
    let features: Vec<_> = report
        .iter()
        .map(|f| {
            json!({
                "name": f.name,
                "builder": f.builder,
                "files": f.files,
                "output": f.output.display().to_string(),
            })
        })
        .collect();

    json!({
        "features": features,
        "index": report.index.as_ref().map(|p| p.display().to_string()),
    })
}
