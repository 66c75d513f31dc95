// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for SAT.
//!
//! This module contains pure logic with no I/O: plugin identifiers, manifest
//! interpretation, the deep-merge engine and the plugin capability. Reading
//! files and binding entrypoints are handled via ports (traits) defined in
//! the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: Documents arrive as text or mappings, never as paths to read
//! - **Immutable values**: Identifiers, manifests and merge results are never
//!   mutated after construction
//!
// Public API - what the world sees
pub mod config;
pub mod entities;
pub mod error;
pub mod merge;
pub mod plugin;
pub mod value_objects;

// Re-exports for convenience
pub use config::{ConfigMap, ConfigValue, DocumentError, ensure_mapping, parse_mapping};
pub use entities::{
    build_plan::{BuildPlan, PluginRequirement},
    common::RelativePath,
    manifest::{DeclaredPaths, Entrypoint, MANIFEST_FILE_NAME, Manifest},
};
pub use error::{DomainError, ErrorCategory, PluginError};
pub use merge::{deep_merge, merge_layers};
pub use plugin::{CONTEXT_CONFIG, CONTEXT_ROOT_DIR, Plugin, PluginHandle};
pub use value_objects::PluginId;
