//! Command-line surface of `sat`, declared with clap's derive API.
//!
//! Argument names, aliases and help text live here; handlers in
//! `commands` receive the parsed structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name    = "sat",
    bin_name = "sat",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Archive plugin resolution and configuration builds",
    long_about = "sat resolves plugins from their plugin.yml manifests and \
                  folds their defaults into a single archive configuration.",
    after_help = "EXAMPLES:\n\
        \x20 sat build\n\
        \x20 sat build --output config/archive.yml --plugin core.schema --plugin core.archive-identity?\n\
        \x20 sat resolve metadata.dublin-core --defaults\n\
        \x20 sat apply language --context doc.yml\n\
        \x20 sat list --format json",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build the archive configuration from plugin defaults.
    #[command(
        visible_alias = "b",
        about = "Build the archive configuration",
        after_help = "EXAMPLES:\n\
            \x20 sat build\n\
            \x20 sat build -o out/archive.yml\n\
            \x20 sat build --dry-run\n\
            \x20 sat build --plugin core.schema --plugin local.overrides?"
    )]
    Build(BuildArgs),

    /// Resolve one plugin and show where everything lives.
    #[command(
        about = "Resolve a plugin",
        after_help = "EXAMPLES:\n\
            \x20 sat resolve core.schema\n\
            \x20 sat resolve metadata.dublin-core --defaults"
    )]
    Resolve(ResolveArgs),

    /// Invoke a plugin's entrypoint.
    #[command(
        about = "Apply a plugin",
        after_help = "EXAMPLES:\n\
            \x20 sat apply core.schema --root-dir ./archive\n\
            \x20 sat apply metadata.dublin-core --context front-matter.yml"
    )]
    Apply(ApplyArgs),

    /// List plugins found under the plugin root.
    #[command(
        visible_alias = "ls",
        about = "List discovered plugins",
        after_help = "EXAMPLES:\n\
            \x20 sat list\n\
            \x20 sat list --format json"
    )]
    List(ListArgs),

    /// Initialise a SAT configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 sat init           # ./sat.toml\n\
            \x20 sat init --global  # user config directory"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 sat completions bash > ~/.local/share/bash-completion/completions/sat\n\
            \x20 sat completions zsh  > ~/.zfunc/_sat\n\
            \x20 sat completions fish > ~/.config/fish/completions/sat.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the SAT configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 sat config get plugins.root\n\
            \x20 sat config list\n\
            \x20 sat config path"
    )]
    Config(ConfigCommands),
}

// ── build ─────────────────────────────────────────────────────────────────────

/// Arguments for `sat build`.
#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Where to write the merged configuration (overrides `build.output`).
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print the merged configuration instead of writing it.
    #[arg(long = "dry-run", help = "Print the result without writing it")]
    pub dry_run: bool,

    /// Replace the configured build plan.
    ///
    /// Repeat in merge order. A trailing `?` marks the plugin optional.
    #[arg(
        short = 'p',
        long = "plugin",
        value_name = "ID[?]",
        help = "Plugin to include, in order (trailing ? = optional)"
    )]
    pub plugins: Vec<String>,
}

// ── resolve ───────────────────────────────────────────────────────────────────

/// Arguments for `sat resolve`.
#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Plugin identifier, e.g. `metadata.dublin-core`.
    #[arg(value_name = "ID")]
    pub id: String,

    /// Also print the plugin's defaults.
    #[arg(long = "defaults", help = "Show the plugin's defaults")]
    pub defaults: bool,
}

// ── apply ─────────────────────────────────────────────────────────────────────

/// Arguments for `sat apply`.
#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Plugin identifier.
    #[arg(value_name = "ID")]
    pub id: String,

    /// Archive root passed as `root_dir`.
    #[arg(long = "root-dir", value_name = "DIR", default_value = ".")]
    pub root_dir: PathBuf,

    /// YAML mapping merged over the generated context.
    #[arg(long = "context", value_name = "FILE")]
    pub context: Option<PathBuf>,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `sat list`.
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
    /// One identifier per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `sat init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to the user config directory instead of `./sat.toml`.
    #[arg(long = "global", help = "Create global configuration")]
    pub global: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `sat completions`.
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

/// Subcommands for `sat config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `plugins.root`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
