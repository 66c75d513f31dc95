//! Flags accepted before or after any subcommand.

use std::path::PathBuf;

use clap::{ArgAction, Args, ValueEnum};

#[derive(Debug, Default, Args)]
pub struct GlobalArgs {
    /// Log more: `-v` info, `-vv` debug, `-vvv` trace.
    #[arg(
        short = 'v',
        long,
        action = ArgAction::Count,
        global = true,
        long_help = "Log more detail on stderr. Repeat for more:
    -v      plugin resolution and build steps
    -vv     manifest reads and callable bindings
    -vvv    everything"
    )]
    pub verbose: u8,

    /// Only print errors and requested documents.
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Plain output without ANSI styling. Also set by `NO_COLOR`.
    #[arg(long = "no-color", global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Read settings from FILE instead of ./sat.toml or the user config.
    #[arg(short = 'c', long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How results are printed.
    #[arg(long = "output-format", global = true, value_enum, default_value = "auto")]
    pub output_format: OutputFormat,

    /// Directory holding the plugin tree (overrides `plugins.root`).
    #[arg(long = "plugin-root", global = true, value_name = "DIR")]
    pub plugin_root: Option<PathBuf>,

    /// Reject manifests that do not declare an `id`.
    #[arg(long, global = true)]
    pub strict: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human on a terminal, plain when piped.
    #[default]
    Auto,
    /// Symbols and colour.
    Human,
    /// Symbols, no colour.
    Plain,
    /// Documents as JSON.
    Json,
}
