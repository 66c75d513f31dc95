//! Static entrypoint registry.
//!
//! Plugin implementations are compiled into the binary and registered at
//! startup under `(plugin id, unit, callable)`. The unit is the `run` file
//! name from the manifest without its extension, so a manifest declaring
//!
//! ```yaml
//! entrypoints:
//!   apply:
//!     run: plugin.rs
//!     callable: apply_metadata
//! ```
//!
//! binds to whatever was registered as `("metadata.dublin-core", "plugin",
//! "apply_metadata")`. Every bind builds a fresh plugin object.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use sat_core::{
    application::{ApplicationError, ports::EntrypointRegistry},
    domain::{Entrypoint, Plugin, PluginId},
    error::SatResult,
};

use crate::plugins;

/// Builds a plugin object for one bind.
pub type PluginFactory = Arc<dyn Fn() -> Arc<dyn Plugin> + Send + Sync>;

type UnitKey = (String, String);

#[derive(Clone, Default)]
pub struct StaticRegistry {
    units: HashMap<UnitKey, BTreeMap<String, PluginFactory>>,
}

impl StaticRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in plugin.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        plugins::register_builtin(&mut registry);
        registry
    }

    /// Register `factory` as `callable` of `unit` for `plugin_id`.
    ///
    /// Re-registering the same triple replaces the previous factory.
    pub fn register<F>(
        &mut self,
        plugin_id: &str,
        unit: &str,
        callable: &str,
        factory: F,
    ) -> &mut Self
    where
        F: Fn() -> Arc<dyn Plugin> + Send + Sync + 'static,
    {
        self.units
            .entry((plugin_id.to_string(), unit.to_string()))
            .or_default()
            .insert(callable.to_string(), Arc::new(factory));
        self
    }

    /// Whether any unit is registered for `plugin_id`.
    pub fn contains_plugin(&self, plugin_id: &str) -> bool {
        self.units.keys().any(|(id, _)| id == plugin_id)
    }

    /// Every registered `(plugin id, unit, callable)`, sorted.
    pub fn entries(&self) -> Vec<(&str, &str, &str)> {
        let mut entries: Vec<_> = self
            .units
            .iter()
            .flat_map(|((id, unit), callables)| {
                callables
                    .keys()
                    .map(move |callable| (id.as_str(), unit.as_str(), callable.as_str()))
            })
            .collect();
        entries.sort_unstable();
        entries
    }
}

impl EntrypointRegistry for StaticRegistry {
    fn bind(&self, plugin_id: &PluginId, entrypoint: &Entrypoint) -> SatResult<Arc<dyn Plugin>> {
        let key = (plugin_id.to_string(), entrypoint.unit().to_string());

        let callables = self.units.get(&key).ok_or_else(|| {
            let reason = if self.contains_plugin(plugin_id.as_str()) {
                format!("plugin has no unit named '{}'", entrypoint.unit())
            } else {
                "no implementation is registered for this plugin".to_string()
            };
            ApplicationError::ModuleLoadError {
                plugin_id: plugin_id.to_string(),
                unit: entrypoint.unit().to_string(),
                reason,
            }
        })?;

        let factory =
            callables
                .get(entrypoint.callable())
                .ok_or_else(|| ApplicationError::CallableNotFound {
                    plugin_id: plugin_id.to_string(),
                    unit: entrypoint.unit().to_string(),
                    callable: entrypoint.callable().to_string(),
                })?;

        debug!(plugin = %plugin_id, entrypoint = %entrypoint, "Entrypoint bound");
        Ok(factory())
    }
}

impl fmt::Debug for StaticRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticRegistry")
            .field("entries", &self.entries())
            .finish()
    }
}
