//! `sat resolve`: show where a plugin's pieces live.

use serde::Serialize;

use sat_core::domain::{ConfigMap, PluginHandle};

use crate::{
    cli::{OutputFormat, ResolveArgs},
    commands::{Services, parse_id},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Serializable view of a resolved handle.
#[derive(Debug, Serialize)]
struct ResolvedPlugin {
    id: String,
    module: String,
    name: Option<String>,
    run: String,
    callable: String,
    directory: String,
    standard: String,
    config: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    defaults: Option<ConfigMap>,
}

impl ResolvedPlugin {
    fn new(handle: &PluginHandle, defaults: Option<ConfigMap>) -> Self {
        Self {
            id: handle.id().to_string(),
            module: handle.id().module_path(),
            name: handle.manifest().name().map(str::to_string),
            run: handle.entrypoint().run().to_string(),
            callable: handle.entrypoint().callable().to_string(),
            directory: handle.directory().display().to_string(),
            standard: handle.standard_path().display().to_string(),
            config: handle.config_path().display().to_string(),
            defaults,
        }
    }
}

pub fn execute(args: ResolveArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let id = parse_id(&args.id)?;
    let services = Services::new(&config);
    let handle = services.resolver().resolve(&id)?;

    let defaults = if args.defaults {
        Some(services.loader().load_defaults(&handle)?)
    } else {
        None
    };
    let view = ResolvedPlugin::new(&handle, defaults);

    if output.format() == OutputFormat::Json {
        return output.document(&view);
    }

    output.header(&view.id)?;
    if let Some(name) = &view.name {
        output.field("name", name)?;
    }
    output.field("module", &view.module)?;
    output.field("entrypoint", &format!("{}::{}", view.run, view.callable))?;
    output.field("directory", &view.directory)?;
    output.field("standard", &view.standard)?;
    output.field("config", &view.config)?;

    if let Some(defaults) = &view.defaults {
        output.print("")?;
        output.header("defaults")?;
        output.document(defaults)?;
    }
    Ok(())
}
