//! Application configuration.
//!
//! Layered with the `config` crate, lowest to highest precedence:
//!
//! 1. Built-in defaults ([`AppConfig::default`])
//! 2. A TOML file: `--config FILE`, or the platform config file plus
//!    `./shipkit.toml` when no file is given
//! 3. `SHIPKIT_`-prefixed environment variables, `__` separating sections
//!    (`SHIPKIT_REGISTRY__BASE_URL=https://example.com/r`)
//!
//! Command-line flags override the merged result at the call site.

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use shipkit_core::{
    application::services::DEFAULT_BASE_URL,
    domain::{DEFAULT_INDEX_SCHEMA, DEFAULT_ITEM_SCHEMA, DESCRIPTOR_FILE},
};

/// Name of the per-project configuration file.
pub const LOCAL_CONFIG_FILE: &str = "shipkit.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where features live and where manifests go.
    pub registry: RegistryConfig,

    /// Output preferences.
    pub output: OutputConfig,
}

/// Registry build settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Prefix of internal dependency URLs and index entries.
    pub base_url: String,

    /// `$schema` of every item manifest.
    pub schema_url: String,

    /// `$schema` of `index.json`.
    pub index_schema_url: String,

    /// Directory whose subdirectories are features.
    pub features_dir: PathBuf,

    /// Directory manifests are written to.
    pub output_dir: PathBuf,

    /// Descriptor file name inside each feature directory.
    pub descriptor_file: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            schema_url: DEFAULT_ITEM_SCHEMA.into(),
            index_schema_url: DEFAULT_INDEX_SCHEMA.into(),
            features_dir: PathBuf::from("features"),
            output_dir: PathBuf::from("public/r"),
            descriptor_file: DESCRIPTOR_FILE.into(),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Disable colors even on a terminal.
    pub no_color: bool,

    /// Default output format (`auto`, `human`, `plain`, `json`).
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load and merge every configuration layer.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults = Config::try_from(&Self::default())
            .context("Failed to serialize default configuration")?;

        let mut builder = Config::builder().add_source(defaults);

        match config_file {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading configuration file");
                builder = builder.add_source(File::from(path.as_path()).required(true));
            }
            None => {
                for path in Self::search_paths() {
                    tracing::trace!(path = %path.display(), "probing configuration file");
                    builder = builder.add_source(File::from(path.as_path()).required(false));
                }
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("SHIPKIT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Platform configuration file, e.g. `~/.config/shipkit/config.toml`.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "shipkit", "shipkit")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Implicit configuration files, later entries overriding earlier ones.
    fn search_paths() -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = Self::config_path().into_iter().collect();
        paths.push(PathBuf::from(LOCAL_CONFIG_FILE));
        paths
    }

    /// The file the user most likely means by "the config file".
    pub fn active_path(explicit: Option<&PathBuf>) -> PathBuf {
        if let Some(path) = explicit {
            return path.clone();
        }
        let local = Path::new(LOCAL_CONFIG_FILE);
        if local.exists() {
            return local.to_path_buf();
        }
        Self::config_path().unwrap_or_else(|| local.to_path_buf())
    }
}
