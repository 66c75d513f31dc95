// ============================================================================
// domain/error.rs - PLUGIN DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reported and logged from several places)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("invalid plugin identifier '{id}': {reason}")]
    InvalidPluginId { id: String, reason: String },

    #[error("plugin id mismatch: manifest declares '{found}' but '{expected}' was requested")]
    IdentityMismatch { expected: String, found: String },

    #[error("plugin '{plugin_id}' manifest does not declare an `id`")]
    IdentityMissing { plugin_id: String },

    // ========================================================================
    // Manifest Shape Errors
    // ========================================================================
    #[error("plugin '{plugin_id}' manifest is missing `{key}`")]
    EntrypointMissing { plugin_id: String, key: &'static str },

    #[error("plugin '{plugin_id}' manifest: `{key}` {reason}")]
    PathSpecMissing {
        plugin_id: String,
        key: &'static str,
        reason: &'static str,
    },

    // ========================================================================
    // Invocation Errors
    // ========================================================================
    #[error("plugin '{plugin_id}' failed to apply: {reason}")]
    ApplyFailed { plugin_id: String, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidPluginId { id, .. } => vec![
                format!("'{}' is not a valid plugin identifier", id),
                "Identifiers are dot-separated lowercase segments, e.g. metadata.dublin-core"
                    .into(),
                "Each segment must start with a letter and use only a-z, 0-9, '-' or '_'".into(),
            ],
            Self::IdentityMismatch { expected, found } => vec![
                format!("The manifest found for '{}' belongs to '{}'", expected, found),
                "Fix the `id` field in plugin.yml or move the plugin to the matching directory"
                    .into(),
            ],
            Self::IdentityMissing { plugin_id } => vec![
                format!("Add `id: {}` to the plugin's plugin.yml", plugin_id),
                "Or disable strict identity checks (plugins.strict_identity = false)".into(),
            ],
            Self::EntrypointMissing { key, .. } => vec![
                format!("Declare `{}` in plugin.yml", key),
                "Example:\n  entrypoints:\n    apply:\n      run: plugin.rs\n      callable: apply"
                    .into(),
            ],
            Self::PathSpecMissing { key, .. } => vec![
                format!("Declare `{}` as a path relative to the plugin directory", key),
                "Example:\n  paths:\n    standard: standard\n    config: etc".into(),
            ],
            Self::ApplyFailed { .. } => vec![
                "Check the context passed to the plugin".into(),
                "Run with -vv for plugin diagnostics".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidPluginId { .. } => ErrorCategory::Validation,
            Self::IdentityMismatch { .. }
            | Self::IdentityMissing { .. }
            | Self::EntrypointMissing { .. }
            | Self::PathSpecMissing { .. } => ErrorCategory::Manifest,
            Self::ApplyFailed { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Manifest,
    Internal,
}

/// Failure reported by a plugin implementation.
///
/// Plugins don't know the identifier they were resolved under; the handle
/// attaches it when converting to [`DomainError::ApplyFailed`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct PluginError {
    message: String,
}

impl PluginError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
