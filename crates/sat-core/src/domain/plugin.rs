//! The plugin capability and the resolved plugin handle.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::{
    config::{ConfigMap, ConfigValue},
    entities::manifest::{DeclaredPaths, Entrypoint, Manifest},
    error::{DomainError, PluginError},
    value_objects::PluginId,
};

/// Context key conventionally holding the archive root directory.
pub const CONTEXT_ROOT_DIR: &str = "root_dir";

/// Context key holding the plugin's own configuration.
pub const CONTEXT_CONFIG: &str = "config";

/// The `apply` capability every plugin entrypoint provides.
///
/// The context is a single mapping (conventionally carrying `root_dir`).
/// A plugin either returns nothing or an updated value; the core does not
/// constrain what that value is.
pub trait Plugin: Send + Sync {
    fn apply(&self, context: &ConfigMap) -> Result<Option<ConfigValue>, PluginError>;
}

impl<F> Plugin for F
where
    F: Fn(&ConfigMap) -> Result<Option<ConfigValue>, PluginError> + Send + Sync,
{
    fn apply(&self, context: &ConfigMap) -> Result<Option<ConfigValue>, PluginError> {
        self(context)
    }
}

/// A fully resolved, invocable plugin.
///
/// Owned by whoever resolved it; never cached or shared between
/// resolutions.
#[derive(Clone)]
pub struct PluginHandle {
    manifest: Manifest,
    entrypoint: Entrypoint,
    plugin: Arc<dyn Plugin>,
    directory: PathBuf,
    paths: DeclaredPaths,
}

impl PluginHandle {
    pub fn new(
        manifest: Manifest,
        entrypoint: Entrypoint,
        plugin: Arc<dyn Plugin>,
        directory: PathBuf,
        paths: DeclaredPaths,
    ) -> Self {
        Self {
            manifest,
            entrypoint,
            plugin,
            directory,
            paths,
        }
    }

    pub fn id(&self) -> &PluginId {
        self.manifest.plugin_id()
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn entrypoint(&self) -> &Entrypoint {
        &self.entrypoint
    }

    /// The plugin's own directory under the plugin root.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn standard_path(&self) -> &Path {
        &self.paths.standard
    }

    pub fn config_path(&self) -> &Path {
        &self.paths.config
    }

    /// Invoke the bound entrypoint.
    pub fn apply(&self, context: &ConfigMap) -> Result<Option<ConfigValue>, DomainError> {
        self.plugin
            .apply(context)
            .map_err(|e| DomainError::ApplyFailed {
                plugin_id: self.id().to_string(),
                reason: e.to_string(),
            })
    }
}

impl fmt::Debug for PluginHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginHandle")
            .field("id", self.id())
            .field("entrypoint", &self.entrypoint)
            .field("directory", &self.directory)
            .field("paths", &self.paths)
            .finish()
    }
}
