//! Config Layer Loader - reads a plugin's `defaults.yml`.
//!
//! Defaults live under the top-level `defaults` key of
//! `<config path>/defaults.yml`; every other key is ignored. A missing or
//! non-mapping `defaults` value contributes nothing.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{ConfigMap, PluginHandle, ensure_mapping, parse_mapping},
    error::SatResult,
};

/// File name of a plugin's defaults inside its declared config directory.
pub const DEFAULTS_FILE_NAME: &str = "defaults.yml";

const DEFAULTS_KEY: &str = "defaults";

pub struct ConfigLayerLoader {
    filesystem: Arc<dyn Filesystem>,
}

impl ConfigLayerLoader {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    pub fn defaults_path(&self, handle: &PluginHandle) -> PathBuf {
        handle.config_path().join(DEFAULTS_FILE_NAME)
    }

    /// Load the plugin's defaults, or `None` when it has no defaults file.
    #[instrument(skip_all, fields(plugin = %handle.id()))]
    pub fn load_defaults_if_present(&self, handle: &PluginHandle) -> SatResult<Option<ConfigMap>> {
        let path = self.defaults_path(handle);
        if !self.filesystem.exists(&path) {
            debug!(path = %path.display(), "No defaults file");
            return Ok(None);
        }

        let text = self.filesystem.read_to_string(&path)?;
        let document = parse_mapping(&text).map_err(|e| ApplicationError::ConfigMalformed {
            plugin_id: handle.id().to_string(),
            path: path.clone(),
            reason: e.to_string(),
        })?;

        let defaults = ensure_mapping(document.get(DEFAULTS_KEY));
        debug!(path = %path.display(), keys = defaults.len(), "Defaults loaded");
        Ok(Some(defaults))
    }

    /// Load the plugin's defaults; a missing file is an empty mapping.
    pub fn load_defaults(&self, handle: &PluginHandle) -> SatResult<ConfigMap> {
        Ok(self.load_defaults_if_present(handle)?.unwrap_or_default())
    }
}
