//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "shipkit",
    bin_name = "shipkit",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f4e6} Build installable registries from feature bundles",
    long_about = "Shipkit turns directories of feature source files plus a \
                  feature.json descriptor into shadcn-style registry \
                  manifests. Without a subcommand it runs `build`.",
    after_help = "EXAMPLES:\n\
        \x20 shipkit\n\
        \x20 shipkit build --features-dir registry --out public/r --base-url https://example.com/r\n\
        \x20 shipkit check -v\n\
        \x20 shipkit list --format json\n\
        \x20 shipkit completions bash > /usr/share/bash-completion/completions/shipkit",
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute; `build` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build every feature and write its manifest.
    #[command(
        visible_alias = "b",
        about = "Build registry manifests",
        after_help = "EXAMPLES:\n\
            \x20 shipkit build\n\
            \x20 shipkit build --features-dir registry --out public/r\n\
            \x20 shipkit build --base-url https://example.com/r --no-index"
    )]
    Build(BuildArgs),

    /// Validate and assemble every feature without writing.
    #[command(
        about = "Check features without writing",
        after_help = "EXAMPLES:\n\
            \x20 shipkit check\n\
            \x20 shipkit check --features-dir registry --output-format json"
    )]
    Check(CheckArgs),

    /// List registered builders in precedence order.
    #[command(
        visible_alias = "ls",
        about = "List builders",
        after_help = "EXAMPLES:\n\
            \x20 shipkit list\n\
            \x20 shipkit list --format json"
    )]
    List(ListArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 shipkit completions bash > ~/.local/share/bash-completion/completions/shipkit\n\
            \x20 shipkit completions zsh  > ~/.zfunc/_shipkit\n\
            \x20 shipkit completions fish > ~/.config/fish/completions/shipkit.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Shipkit configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 shipkit config get registry.base_url\n\
            \x20 shipkit config list\n\
            \x20 shipkit config path"
    )]
    Config(ConfigCommands),
}

// ── build / check ─────────────────────────────────────────────────────────────

/// Where features are read from.
#[derive(Debug, Default, Args)]
pub struct SourceArgs {
    /// Directory whose subdirectories are features.
    #[arg(
        short = 'f',
        long = "features-dir",
        value_name = "DIR",
        help = "Features directory (default: registry.features_dir)"
    )]
    pub features_dir: Option<PathBuf>,
}

/// Arguments for `shipkit build`.
#[derive(Debug, Default, Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Directory manifests are written to.
    #[arg(
        short = 'o',
        long = "out",
        value_name = "DIR",
        help = "Output directory (default: registry.output_dir)"
    )]
    pub out: Option<PathBuf>,

    /// Base URL for internal dependency links and index entries.
    #[arg(
        long = "base-url",
        value_name = "URL",
        help = "Registry base URL (default: registry.base_url)"
    )]
    pub base_url: Option<String>,

    /// Skip writing `index.json`.
    #[arg(long = "no-index", help = "Do not write index.json")]
    pub no_index: bool,
}

/// Arguments for `shipkit check`.
#[derive(Debug, Default, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Base URL used to render linked dependencies.
    #[arg(long = "base-url", value_name = "URL", help = "Registry base URL")]
    pub base_url: Option<String>,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `shipkit list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `shipkit completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `shipkit config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `registry.base_url`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
