//! Manifest Store - locates and reads `plugin.yml` files.
//!
//! The plugin root is fixed at construction. A plugin identifier maps to
//! `<root>/<seg1>/<seg2>/.../plugin.yml` with `-` replaced by `_` in every
//! segment. Nothing is cached: every call reads from the filesystem.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, error::EMPTY_MANIFEST, ports::Filesystem},
    domain::{MANIFEST_FILE_NAME, Manifest, PluginId, parse_mapping},
    error::SatResult,
};

pub struct ManifestStore {
    root: PathBuf,
    filesystem: Arc<dyn Filesystem>,
    strict_identity: bool,
}

impl ManifestStore {
    pub fn new(root: impl Into<PathBuf>, filesystem: Arc<dyn Filesystem>) -> Self {
        Self {
            root: root.into(),
            filesystem,
            strict_identity: false,
        }
    }

    /// Reject manifests that omit `id`.
    pub fn with_strict_identity(mut self, strict: bool) -> Self {
        self.strict_identity = strict;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<sanitized segments>`.
    pub fn plugin_dir(&self, plugin_id: &PluginId) -> PathBuf {
        self.root.join(plugin_id.relative_dir())
    }

    /// Where the manifest for `plugin_id` must live. Pure path computation.
    pub fn resolve_manifest_path(&self, plugin_id: &PluginId) -> PathBuf {
        self.plugin_dir(plugin_id).join(MANIFEST_FILE_NAME)
    }

    /// Read and interpret the manifest at `path` for `plugin_id`.
    ///
    /// The declared `id`, when present, must equal the requested
    /// identifier exactly.
    pub fn load_manifest(&self, plugin_id: &PluginId, path: &Path) -> SatResult<Manifest> {
        if !self.filesystem.exists(path) {
            return Err(ApplicationError::ManifestNotFound {
                plugin_id: plugin_id.to_string(),
                path: path.to_path_buf(),
            }
            .into());
        }

        let text = self.filesystem.read_to_string(path)?;
        let raw = parse_mapping(&text).map_err(|e| ApplicationError::ManifestMalformed {
            plugin_id: plugin_id.to_string(),
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        if raw.is_empty() {
            return Err(ApplicationError::ManifestMalformed {
                plugin_id: plugin_id.to_string(),
                path: path.to_path_buf(),
                reason: EMPTY_MANIFEST.into(),
            }
            .into());
        }

        let manifest = Manifest::new(plugin_id.clone(), raw);
        manifest.verify_identity(self.strict_identity)?;

        debug!(plugin = %plugin_id, path = %path.display(), "Manifest loaded");
        Ok(manifest)
    }

    /// Resolve the manifest path for `plugin_id` and load it.
    #[instrument(skip(self), fields(plugin = %plugin_id))]
    pub fn load(&self, plugin_id: &PluginId) -> SatResult<Manifest> {
        let path = self.resolve_manifest_path(plugin_id);
        self.load_manifest(plugin_id, &path)
    }
}
