//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "resolve a plugin" or "build the archive
//! configuration".

pub mod config_builder;
pub mod config_loader;
pub mod manifest_store;
pub mod plugin_resolver;

pub use config_builder::{BuildReport, ConfigBuilder, SkippedPlugin};
pub use config_loader::{ConfigLayerLoader, DEFAULTS_FILE_NAME};
pub use manifest_store::ManifestStore;
pub use plugin_resolver::PluginResolver;
