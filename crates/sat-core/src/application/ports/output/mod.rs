//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `sat-adapters` crate provides implementations.

use std::path::Path;
use std::sync::Arc;

use crate::domain::{Entrypoint, Plugin, PluginId};
use crate::error::SatResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `sat_adapters::filesystem::LocalFilesystem` (production)
/// - `sat_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Read a whole file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> SatResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> SatResult<()>;

    /// Write content to a file, replacing any previous content.
    ///
    /// Readers must never observe a partially written file.
    fn write_file(&self, path: &Path, content: &str) -> SatResult<()>;
}

/// Port for binding manifest entrypoints to code.
///
/// Plugin implementations are registered ahead of time under the plugin
/// identifier and the unit named by `entrypoints.apply.run`. A fresh plugin
/// object is produced for every call.
#[cfg_attr(test, mockall::automock)]
pub trait EntrypointRegistry: Send + Sync {
    /// Bind `entrypoint` for `plugin_id`.
    ///
    /// Fails with `ModuleLoadError` when no unit is registered under that
    /// name and `CallableNotFound` when the unit lacks the callable.
    fn bind(&self, plugin_id: &PluginId, entrypoint: &Entrypoint) -> SatResult<Arc<dyn Plugin>>;
}
