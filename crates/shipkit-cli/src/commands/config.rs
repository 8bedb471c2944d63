//! `shipkit config`: inspect configuration values.

use std::path::PathBuf;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Keys accepted by `shipkit config get`.
const KEYS: &[&str] = &[
    "registry.base_url",
    "registry.schema_url",
    "registry.index_schema_url",
    "registry.features_dir",
    "registry.output_dir",
    "registry.descriptor_file",
    "output.no_color",
    "output.format",
];

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    config_file: Option<&PathBuf>,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&value)?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.print(serialised.trim_end())?;
        }

        ConfigCommands::Path => {
            output.print(&AppConfig::active_path(config_file).display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let registry = &config.registry;
    match key {
        "registry.base_url" => Ok(registry.base_url.clone()),
        "registry.schema_url" => Ok(registry.schema_url.clone()),
        "registry.index_schema_url" => Ok(registry.index_schema_url.clone()),
        "registry.features_dir" => Ok(registry.features_dir.display().to_string()),
        "registry.output_dir" => Ok(registry.output_dir.display().to_string()),
        "registry.descriptor_file" => Ok(registry.descriptor_file.clone()),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(config.output.format.clone()),
        _ => Err(CliError::UnknownConfigKey {
            key: key.to_owned(),
            known: KEYS,
        }),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
