//! Diagnostics for the `sat` binary.
//!
//! The library crates emit spans and events; this module installs the one
//! subscriber that renders them. Everything goes to stderr, leaving stdout
//! to documents such as `build --dry-run` and `list --format json`.
//!
//! Default level is WARN. Each `-v` lowers it one step down to TRACE,
//! `--quiet` raises it to ERROR. A set `RUST_LOG` replaces this mapping.

use std::io::IsTerminal as _;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::cli::GlobalArgs;

/// Crates whose events are shown at the flag-selected level.
const WORKSPACE_TARGETS: [&str; 3] = ["sat", "sat_core", "sat_adapters"];

/// Install the global subscriber. Call once, before the first event.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => EnvFilter::new(filter_directives(derive_level(args))),
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_target(false)
        .with_file(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("could not install tracing subscriber: {e}"))
}

fn filter_directives(level: LevelFilter) -> String {
    WORKSPACE_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn derive_level(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}
