//! Implementation of the `sat list` command.

use sat_adapters::{DiscoveredPlugin, PluginDiscovery, PluginStatus};

use crate::{
    cli::{ListArgs, ListFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let discovery = PluginDiscovery::new(&config.plugins.root)
        .with_strict_identity(config.plugins.strict_identity);
    let plugins = discovery.discover()?;

    match args.format {
        ListFormat::Table => {
            output.header(&format!(
                "Plugins under {}:",
                discovery.root().display()
            ))?;
            if plugins.is_empty() {
                output.info("No plugin.yml manifests found")?;
            }
            for plugin in &plugins {
                output.print(&table_row(plugin))?;
            }
            let invalid = plugins.iter().filter(|p| !p.status.is_valid()).count();
            if invalid > 0 {
                output.warning(&format!("{invalid} plugin(s) cannot be resolved"))?;
            }
        }

        // JSON must stay parseable in pipes, so it bypasses `--quiet`.
        ListFormat::Json => {
            let json = serde_json::to_string_pretty(&plugins).map_err(|e| CliError::InvalidInput {
                message: format!("plugin list cannot be rendered: {e}"),
                source: Some(Box::new(e)),
            })?;
            println!("{json}");
        }

        ListFormat::List => {
            for plugin in &plugins {
                println!("{}", plugin.id);
            }
        }
    }

    Ok(())
}

fn table_row(plugin: &DiscoveredPlugin) -> String {
    let name = plugin.name.as_deref().unwrap_or("-");
    match &plugin.status {
        PluginStatus::Valid => format!("  {:<28} {name}", plugin.id),
        PluginStatus::Invalid(reason) => {
            format!("  {:<28} {name}  [invalid: {reason}]", plugin.id)
        }
    }
}
