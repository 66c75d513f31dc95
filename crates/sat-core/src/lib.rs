//! SAT Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the SAT
//! archive toolkit: plugin manifest resolution and layered YAML
//! configuration built from plugin defaults.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              sat-cli (CLI)              │
//! │         (Implements Driving Ports)      │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          Application Services           │
//! │ (ManifestStore, PluginResolver,         │
//! │  ConfigLayerLoader, ConfigBuilder)      │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │  (Driven: Filesystem, EntrypointRegistry)│
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     sat-adapters (Infrastructure)       │
//! │ (LocalFilesystem, StaticRegistry, ...)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (PluginId, Manifest, deep_merge, Plugin)│
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use sat_core::prelude::*;
//!
//! let resolver = PluginResolver::new(ManifestStore::new("plugins", fs.clone()), registry);
//! let builder = ConfigBuilder::new(resolver, ConfigLayerLoader::new(fs.clone()), fs);
//!
//! let plan = BuildPlan::default()
//!     .require(PluginId::parse("core.schema")?)
//!     .optional(PluginId::parse("core.archive-identity")?);
//! builder.build_to(&plan, "config/archive.yml".as_ref())?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, BuildReport, ConfigBuilder, ConfigLayerLoader, ManifestStore,
        MissingArtifact, PluginResolver, SkippedPlugin,
        ports::{EntrypointRegistry, Filesystem},
    };
    pub use crate::domain::{
        BuildPlan, ConfigMap, ConfigValue, DomainError, Entrypoint, Manifest, Plugin,
        PluginError, PluginHandle, PluginId, PluginRequirement, deep_merge, merge_layers,
    };
    pub use crate::error::{SatError, SatResult};
}
