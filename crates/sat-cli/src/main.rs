//! `sat`: resolve archive plugins and build the merged archive config.
//!
//! Flags are parsed first so `--help` and `--version` never touch config or
//! logging. Settings load next (defaults, file, `SAT__*` environment, then
//! flags) and every failure is funnelled through [`handle_error`], which
//! prints one diagnostic and exits with the status [`CliError::exit_code`]
//! picks: 0 on success, 1 internal, 2 usage, 3 missing, 4 configuration.

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // Missing .env is fine.
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also land here.
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("sat: {e}");
        return ExitCode::from(1);
    }

    let verbose = cli.global.verbose > 0;
    debug!(command = ?cli.command, "arguments parsed");

    let config = match AppConfig::load(cli.global.config.as_ref()) {
        Ok(mut loaded) => {
            loaded.apply_overrides(&cli.global);
            loaded
        }
        Err(e) => return handle_error(e, verbose),
    };
    let output = OutputManager::new(&cli.global, &config);

    match run(cli, config, output) {
        Ok(()) => {
            info!("done");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose),
    }
}

#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cli.command {
        Commands::Build(cmd) => commands::build::execute(cmd, config, output),
        Commands::Resolve(cmd) => commands::resolve::execute(cmd, config, output),
        Commands::Apply(cmd) => commands::apply::execute(cmd, config, output),
        Commands::List(cmd) => commands::list::execute(cmd, config, output),
        Commands::Init(cmd) => commands::init::execute(cmd, output),
        Commands::Completions(cmd) => commands::completions::execute(cmd),
        Commands::Config(cmd) => {
            commands::config::execute(cmd, config, cli.global.config.as_ref(), output)
        }
    }
}

/// Log, print the diagnostic on stderr, and turn the error into a status.
fn handle_error(err: CliError, verbose: bool) -> ExitCode {
    err.log();
    eprint!("{}", err.render(verbose, std::io::stderr().is_terminal()));
    ExitCode::from(err.exit_code())
}
