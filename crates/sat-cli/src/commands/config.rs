//! `sat config`: inspect configuration values.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    config: AppConfig,
    explicit: Option<&std::path::PathBuf>,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&value)?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            output.print(config.to_toml()?.trim_end())?;
        }

        ConfigCommands::Path => {
            let path = AppConfig::active_config_path(explicit)
                .unwrap_or_else(AppConfig::config_path);
            output.print(&path.display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    match key {
        "plugins.root" => Ok(config.plugins.root.display().to_string()),
        "plugins.strict_identity" => Ok(config.plugins.strict_identity.to_string()),
        "build.output" => Ok(config.build.output.display().to_string()),
        "build.plugins" => Ok(config
            .build
            .plugins
            .iter()
            .map(|p| {
                if p.required {
                    p.id.clone()
                } else {
                    format!("{}?", p.id)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(config.output.format.clone()),
        _ => Err(CliError::UnknownConfigKey {
            key: key.to_string(),
        }),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
