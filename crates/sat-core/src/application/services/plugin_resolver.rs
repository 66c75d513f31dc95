//! Plugin Resolver - turns an identifier into an invocable plugin.
//!
//! Resolution steps, each failing with its own error:
//! 1. Load the manifest (path derived from the identifier)
//! 2. Read the declared entrypoint
//! 3. Bind the entrypoint through the registry
//! 4. Resolve the declared `standard` and `config` paths
//!
//! Nothing is cached; two resolutions of the same identifier are
//! independent.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    application::{ports::EntrypointRegistry, services::ManifestStore},
    domain::{PluginHandle, PluginId},
    error::SatResult,
};

pub struct PluginResolver {
    store: ManifestStore,
    registry: Arc<dyn EntrypointRegistry>,
}

impl PluginResolver {
    pub fn new(store: ManifestStore, registry: Arc<dyn EntrypointRegistry>) -> Self {
        Self { store, registry }
    }

    pub fn store(&self) -> &ManifestStore {
        &self.store
    }

    #[instrument(skip(self), fields(plugin = %plugin_id))]
    pub fn resolve(&self, plugin_id: &PluginId) -> SatResult<PluginHandle> {
        let manifest = self.store.load(plugin_id)?;
        let entrypoint = manifest.entrypoint()?;
        let plugin = self.registry.bind(plugin_id, &entrypoint)?;

        let directory = self.store.plugin_dir(plugin_id);
        let paths = manifest.declared_paths(&directory)?;

        info!(entrypoint = %entrypoint, "Plugin resolved");
        Ok(PluginHandle::new(
            manifest, entrypoint, plugin, directory, paths,
        ))
    }
}
