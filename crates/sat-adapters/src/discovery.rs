//! Plugin discovery.
//!
//! Walks the plugin root for `plugin.yml` manifests and reports what it
//! finds. A manifest that fails to load is reported as invalid rather than
//! aborting the walk.
//!
//! # Directory layout expected
//!
//! ```text
//! plugins/
//! ├── core/
//! │   ├── schema/
//! │   │   ├── plugin.yml          ← core.schema
//! │   │   └── etc/defaults.yml
//! │   └── archive_identity/
//! │       └── plugin.yml          ← core.archive-identity
//! └── metadata/
//!     └── dublin_core/
//!         └── plugin.yml          ← metadata.dublin-core
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use sat_core::{
    application::{ApplicationError, ManifestStore, ports::Filesystem},
    domain::{MANIFEST_FILE_NAME, Manifest, PluginId, parse_mapping},
    error::SatResult,
};

use crate::filesystem::LocalFilesystem;

/// Whether a discovered manifest can be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "state", content = "reason")]
pub enum PluginStatus {
    Valid,
    Invalid(String),
}

impl PluginStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// One manifest found under the plugin root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredPlugin {
    /// Declared `id`, or the relative directory joined with `.`.
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub directory: PathBuf,
    pub status: PluginStatus,
}

/// Lists manifests on disk and judges each one with the same
/// [`ManifestStore`] rules `resolve` applies.
pub struct PluginDiscovery {
    store: ManifestStore,
    filesystem: Arc<dyn Filesystem>,
}

impl PluginDiscovery {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let filesystem: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new());
        Self {
            store: ManifestStore::new(root, filesystem.clone()),
            filesystem,
        }
    }

    /// Report manifests without a declared `id` as invalid.
    pub fn with_strict_identity(mut self, strict: bool) -> Self {
        self.store = self.store.with_strict_identity(strict);
        self
    }

    pub fn root(&self) -> &Path {
        self.store.root()
    }

    /// Every manifest under the root, sorted by identifier.
    ///
    /// # Errors
    ///
    /// [`ApplicationError::PluginRootNotFound`] when the root is not a
    /// directory. Unreadable entries are skipped with a warning.
    #[instrument(skip(self), fields(root = %self.root().display()))]
    pub fn discover(&self) -> SatResult<Vec<DiscoveredPlugin>> {
        if !self.root().is_dir() {
            return Err(ApplicationError::PluginRootNotFound {
                path: self.root().to_path_buf(),
            }
            .into());
        }

        let mut plugins = Vec::new();

        for entry in WalkDir::new(self.root()).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable entry");
                    continue;
                }
            };

            if !entry.file_type().is_file() || entry.file_name() != MANIFEST_FILE_NAME {
                continue;
            }

            let Some(directory) = entry.path().parent() else {
                continue;
            };
            let plugin = self.inspect(directory, entry.path());
            debug!(id = %plugin.id, valid = plugin.status.is_valid(), "Discovered plugin");
            plugins.push(plugin);
        }

        plugins.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(plugins)
    }

    fn inspect(&self, directory: &Path, manifest_path: &Path) -> DiscoveredPlugin {
        let mut plugin = DiscoveredPlugin {
            id: self
                .declared_id(manifest_path)
                .unwrap_or_else(|| self.derived_id(directory)),
            name: None,
            description: None,
            directory: directory.to_path_buf(),
            status: PluginStatus::Valid,
        };

        let id = match PluginId::parse(&plugin.id) {
            Ok(id) => id,
            Err(e) => {
                plugin.status = PluginStatus::Invalid(e.to_string());
                return plugin;
            }
        };

        match self.store.load_manifest(&id, manifest_path) {
            Ok(manifest) => {
                plugin.name = manifest.name().map(str::to_string);
                plugin.description = manifest.description().map(str::to_string);
                plugin.status = check(self.root(), directory, &id, &manifest);
            }
            Err(e) => plugin.status = PluginStatus::Invalid(e.to_string()),
        }
        plugin
    }

    /// A string `id` the manifest declares. Anything else, including an
    /// unreadable file, falls back to the directory and is judged by the
    /// store.
    fn declared_id(&self, manifest_path: &Path) -> Option<String> {
        let text = self.filesystem.read_to_string(manifest_path).ok()?;
        let raw = parse_mapping(&text).ok()?;
        raw.get("id").and_then(|v| v.as_str()).map(str::to_string)
    }

    /// Relative directory components joined with `.`.
    fn derived_id(&self, directory: &Path) -> String {
        directory
            .strip_prefix(self.root())
            .unwrap_or(directory)
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Location, entrypoint and declared paths; identity is already checked.
fn check(root: &Path, directory: &Path, id: &PluginId, manifest: &Manifest) -> PluginStatus {
    let expected = root.join(id.relative_dir());
    if expected != directory {
        return PluginStatus::Invalid(format!(
            "identifier '{}' resolves to {}",
            id,
            expected.display()
        ));
    }

    let result = manifest
        .entrypoint()
        .and_then(|_| manifest.declared_paths(directory));
    match result {
        Ok(_) => PluginStatus::Valid,
        Err(e) => PluginStatus::Invalid(e.to_string()),
    }
}
