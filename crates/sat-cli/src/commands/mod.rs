//! Command handlers, one module per subcommand.
//!
//! Handlers receive already-parsed arguments and the loaded [`AppConfig`];
//! the helpers below wire the core services to the on-disk adapters.

use std::sync::Arc;

use sat_adapters::{LocalFilesystem, StaticRegistry};
use sat_core::application::{
    ConfigBuilder, ConfigLayerLoader, Filesystem, ManifestStore, PluginResolver,
};
use sat_core::domain::PluginId;

use crate::config::AppConfig;
use crate::error::CliResult;

pub mod apply;
pub mod build;
pub mod completions;
pub mod config;
pub mod init;
pub mod list;
pub mod resolve;

/// Services over the local filesystem and the built-in registry.
pub(crate) struct Services {
    filesystem: Arc<dyn Filesystem>,
    resolver: PluginResolver,
}

impl Services {
    pub(crate) fn new(config: &AppConfig) -> Self {
        let filesystem: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new());
        let store = ManifestStore::new(&config.plugins.root, filesystem.clone())
            .with_strict_identity(config.plugins.strict_identity);
        let resolver = PluginResolver::new(store, Arc::new(StaticRegistry::with_builtin()));
        Self {
            filesystem,
            resolver,
        }
    }

    pub(crate) fn resolver(&self) -> &PluginResolver {
        &self.resolver
    }

    pub(crate) fn loader(&self) -> ConfigLayerLoader {
        ConfigLayerLoader::new(self.filesystem.clone())
    }

    pub(crate) fn into_builder(self) -> ConfigBuilder {
        let loader = ConfigLayerLoader::new(self.filesystem.clone());
        ConfigBuilder::new(self.resolver, loader, self.filesystem)
    }
}

/// Parse a positional plugin identifier.
pub(crate) fn parse_id(raw: &str) -> CliResult<PluginId> {
    Ok(PluginId::parse(raw).map_err(sat_core::error::SatError::from)?)
}
