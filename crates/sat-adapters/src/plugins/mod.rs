//! Built-in plugin implementations.
//!
//! Each plugin is a small struct implementing [`Plugin`]. Its context is a
//! mapping carrying `root_dir` and `config` (the plugin's own defaults) plus
//! whatever inputs the plugin documents.

mod archive;
mod dublin_core;
mod language;

use std::sync::Arc;

use sat_core::domain::Plugin;

use crate::registry::StaticRegistry;

pub use archive::RootDirCheck;
pub use dublin_core::{DublinCore, REQUIRED_FIELD_MISSING};
pub use language::{LanguageDetector, detect_language};

/// Unit name every built-in plugin is registered under (`run: plugin.rs`).
pub const BUILTIN_UNIT: &str = "plugin";

/// Register every built-in plugin with `registry`.
pub fn register_builtin(registry: &mut StaticRegistry) {
    for id in ["core.schema", "core.archive-identity"] {
        registry.register(id, BUILTIN_UNIT, "apply", || {
            Arc::new(RootDirCheck) as Arc<dyn Plugin>
        });
    }
    registry.register("metadata.dublin-core", BUILTIN_UNIT, "apply_metadata", || {
        Arc::new(DublinCore) as Arc<dyn Plugin>
    });
    registry.register("language", BUILTIN_UNIT, "apply_language", || {
        Arc::new(LanguageDetector) as Arc<dyn Plugin>
    });
}
