//! Application layer errors.
//!
//! These errors represent failures in orchestration: missing or unreadable
//! files, documents of the wrong shape, entrypoints that cannot be bound.
//! Manifest interpretation errors are `DomainError` from `crate::domain`.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// `reason` of a [`ApplicationError::ManifestMalformed`] for a manifest
/// without any keys.
pub const EMPTY_MANIFEST: &str = "manifest is empty";

/// Which file of a plugin was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingArtifact {
    Manifest,
    Defaults,
}

impl fmt::Display for MissingArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manifest => f.write_str("manifest"),
            Self::Defaults => f.write_str("defaults file"),
        }
    }
}

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// No `plugin.yml` where the identifier says it should be.
    #[error("plugin manifest not found for '{plugin_id}': {path}")]
    ManifestNotFound { plugin_id: String, path: PathBuf },

    /// `plugin.yml` exists but is not a YAML mapping.
    #[error("malformed manifest for '{plugin_id}' at {path}: {reason}")]
    ManifestMalformed {
        plugin_id: String,
        path: PathBuf,
        reason: String,
    },

    /// No implementation unit is registered under the declared `run` name.
    #[error("cannot load entrypoint unit '{unit}' for plugin '{plugin_id}': {reason}")]
    ModuleLoadError {
        plugin_id: String,
        unit: String,
        reason: String,
    },

    /// The unit exists but does not provide the declared callable.
    #[error("plugin '{plugin_id}': unit '{unit}' has no callable '{callable}'")]
    CallableNotFound {
        plugin_id: String,
        unit: String,
        callable: String,
    },

    /// A defaults file exists but is not a YAML mapping.
    #[error("malformed defaults for '{plugin_id}' at {path}: {reason}")]
    ConfigMalformed {
        plugin_id: String,
        path: PathBuf,
        reason: String,
    },

    /// A plugin the build plan requires has no manifest or defaults file.
    #[error("required plugin '{plugin_id}' is missing its {artifact}: {path}")]
    RequiredPluginMissing {
        plugin_id: String,
        artifact: MissingArtifact,
        path: PathBuf,
    },

    /// The plugin root directory does not exist.
    #[error("plugin root not found: {path}")]
    PluginRootNotFound { path: PathBuf },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The merged configuration could not be persisted.
    #[error("failed to write configuration to {path}: {reason}")]
    OutputWriteFailed { path: PathBuf, reason: String },

    /// Filesystem adapter lock poisoned.
    #[error("Filesystem adapter lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ManifestNotFound { plugin_id, path } => vec![
                format!("Expected a manifest for '{}' at {}", plugin_id, path.display()),
                "Check the plugin identifier and the plugin root (--plugin-root)".into(),
                "Try: sat list to see discovered plugins".into(),
            ],
            Self::ManifestMalformed { path, reason, .. } if reason == EMPTY_MANIFEST => vec![
                format!("{} has no keys; an empty plugin.yml is not accepted", path.display()),
                "Declare at least `entrypoints.apply` and `paths`".into(),
            ],
            Self::ManifestMalformed { path, .. } => vec![
                format!("Fix the YAML in {}", path.display()),
                "plugin.yml must be a mapping with `entrypoints` and `paths`".into(),
            ],
            Self::ModuleLoadError { unit, .. } => vec![
                format!("No built-in implementation unit named '{}'", unit),
                "Check `entrypoints.apply.run` in plugin.yml".into(),
            ],
            Self::CallableNotFound { callable, .. } => vec![
                format!("'{}' is not exported by the declared unit", callable),
                "Check `entrypoints.apply.callable` in plugin.yml".into(),
            ],
            Self::ConfigMalformed { path, .. } => vec![
                format!("Fix the YAML in {}", path.display()),
                "defaults.yml must be a mapping; put values under a `defaults:` key".into(),
            ],
            Self::RequiredPluginMissing {
                plugin_id,
                artifact,
                path,
            } => vec![
                format!("Create the {} for '{}' at {}", artifact, plugin_id, path.display()),
                "Or mark the plugin as optional in build.plugins".into(),
            ],
            Self::PluginRootNotFound { path } => vec![
                format!("Directory does not exist: {}", path.display()),
                "Set plugins.root in sat.toml or pass --plugin-root".into(),
            ],
            Self::FilesystemError { path, .. } | Self::OutputWriteFailed { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have read/write permissions".into(),
            ],
            Self::StoreLockError => vec!["Internal state was poisoned by an earlier panic".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ManifestNotFound { .. }
            | Self::RequiredPluginMissing { .. }
            | Self::PluginRootNotFound { .. } => ErrorCategory::NotFound,
            Self::ManifestMalformed { .. }
            | Self::ModuleLoadError { .. }
            | Self::CallableNotFound { .. }
            | Self::ConfigMalformed { .. } => ErrorCategory::Configuration,
            Self::FilesystemError { .. } | Self::OutputWriteFailed { .. } => {
                ErrorCategory::Internal
            }
            Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
