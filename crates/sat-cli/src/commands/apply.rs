//! `sat apply`: invoke a plugin's entrypoint.
//!
//! The context handed to the plugin is `{ root_dir, config }`, where
//! `config` holds the plugin's defaults. A `--context` file is deep-merged
//! over that, so it can carry `metadata`, `file_path` and the like.

use std::fs;
use std::path::Path;

use tracing::{debug, instrument};

use sat_core::domain::{
    CONTEXT_CONFIG, CONTEXT_ROOT_DIR, ConfigMap, ConfigValue, deep_merge, parse_mapping,
};
use sat_core::error::SatError;

use crate::{
    cli::ApplyArgs,
    commands::{Services, parse_id},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all, fields(plugin = %args.id))]
pub fn execute(args: ApplyArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let id = parse_id(&args.id)?;
    let services = Services::new(&config);
    let handle = services.resolver().resolve(&id)?;
    let defaults = services.loader().load_defaults(&handle)?;

    let mut context = base_context(&args.root_dir, defaults);
    if let Some(path) = &args.context {
        context = deep_merge(&context, &read_context(path)?);
    }
    debug!(keys = context.len(), "Invoking plugin");

    match handle.apply(&context).map_err(SatError::from)? {
        Some(value) => output.document(&value),
        None => {
            output.success(&format!("Applied {id}"))?;
            Ok(())
        }
    }
}

fn base_context(root_dir: &Path, defaults: ConfigMap) -> ConfigMap {
    let mut context = ConfigMap::new();
    context.insert(
        CONTEXT_ROOT_DIR.into(),
        ConfigValue::from(root_dir.display().to_string()),
    );
    context.insert(CONTEXT_CONFIG.into(), ConfigValue::Mapping(defaults));
    context
}

fn read_context(path: &Path) -> CliResult<ConfigMap> {
    let text = fs::read_to_string(path)
        .with_cli_context(|| format!("Failed to read context file '{}'", path.display()))?;
    parse_mapping(&text).map_err(|e| CliError::InvalidInput {
        message: format!("context file '{}': {e}", path.display()),
        source: Some(Box::new(e)),
    })
}
