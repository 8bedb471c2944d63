//! Flags accepted before or after any subcommand.

use clap::Args;
use std::path::PathBuf;

/// Flags shared by every command.
#[derive(Debug, Default, Args)]
pub struct GlobalArgs {
    /// Log verbosity counter; see [`crate::logging`] for the level table.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "More log output (-v, -vv, -vvv)",
        long_help = "Increase logging verbosity:
    (none)  - Warnings and errors
    -v      - Info level (per-feature progress)
    -vv     - Debug level (builder selection, file placement)
    -vvv    - Trace level (very verbose)"
    )]
    pub verbose: u8,

    /// Only errors reach the terminal.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print errors only"
    )]
    pub quiet: bool,

    /// Plain output even on a terminal. Also set by `NO_COLOR`.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Never emit ANSI colors"
    )]
    pub no_color: bool,

    /// Explicit configuration file; must exist when given.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Read settings from FILE instead of shipkit.toml"
    )]
    pub config: Option<PathBuf>,

    /// Rendering of command results on stdout.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Result format on stdout"
    )]
    pub output_format: OutputFormat,

    /// Also write logs, without colour, to this file.
    #[arg(
        long = "log-file",
        global = true,
        value_name = "FILE",
        help = "Write a copy of the log to FILE"
    )]
    pub log_file: Option<PathBuf>,
}

/// Result rendering selected with `--output-format`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human on a terminal, plain otherwise.
    #[default]
    Auto,
    /// Colored status lines.
    Human,
    /// The same lines without ANSI codes.
    Plain,
    /// One JSON document; logs become JSON lines on stderr.
    Json,
}
