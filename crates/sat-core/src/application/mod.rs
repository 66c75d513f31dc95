//! Application layer for SAT.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ManifestStore, PluginResolver,
//!   ConfigLayerLoader, ConfigBuilder)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! interpretation rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use services::{
    BuildReport, ConfigBuilder, ConfigLayerLoader, DEFAULTS_FILE_NAME, ManifestStore,
    PluginResolver, SkippedPlugin,
};

pub use ports::{EntrypointRegistry, Filesystem};

#[cfg(test)]
pub use ports::MockEntrypointRegistry;

pub use error::{ApplicationError, EMPTY_MANIFEST, MissingArtifact};
