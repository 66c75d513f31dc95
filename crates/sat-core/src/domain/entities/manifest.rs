//! Plugin manifest (`plugin.yml`).
//!
//! # `plugin.yml` format
//!
//! ```yaml
//! id: metadata.dublin-core        # optional; must match the requested id
//! name: Dublin Core               # optional
//! description: Dublin Core fields # optional
//! version: 0.1.0                  # optional
//!
//! entrypoints:
//!   apply:
//!     run: plugin.rs              # implementation unit (file name)
//!     callable: apply_metadata    # symbol exported by that unit
//!
//! paths:
//!   standard: standard            # relative to the plugin directory
//!   config: etc
//! ```
//!
//! A manifest is read fresh for every resolution and never mutated; the raw
//! mapping is kept so callers can display or forward additional keys.

use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::domain::{
    config::{ConfigMap, kind_of, lookup, lookup_str},
    entities::common::RelativePath,
    error::DomainError,
    value_objects::PluginId,
};

/// File name of a plugin manifest inside its plugin directory.
pub const MANIFEST_FILE_NAME: &str = "plugin.yml";

const KEY_RUN: &str = "entrypoints.apply.run";
const KEY_CALLABLE: &str = "entrypoints.apply.callable";
const KEY_STANDARD: &str = "paths.standard";
const KEY_CONFIG: &str = "paths.config";

/// A plugin manifest bound to the identifier it was loaded for.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    plugin_id: PluginId,
    raw: ConfigMap,
}

impl Manifest {
    pub fn new(plugin_id: PluginId, raw: ConfigMap) -> Self {
        Self { plugin_id, raw }
    }

    /// The identifier this manifest was resolved for.
    pub fn plugin_id(&self) -> &PluginId {
        &self.plugin_id
    }

    pub fn raw(&self) -> &ConfigMap {
        &self.raw
    }

    /// The `id` the manifest declares about itself, if any.
    ///
    /// `None` only when the key is absent. Other values, `null` included,
    /// are rendered so they can be reported in an identity mismatch.
    pub fn declared_id(&self) -> Option<String> {
        match self.raw.get("id")? {
            Value::Null => Some("null".to_owned()),
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            other => Some(format!("<{}>", kind_of(other))),
        }
    }

    /// Check the declared `id` against the requested identifier.
    ///
    /// The comparison is against the identifier exactly as requested, not
    /// against its sanitized path segments. Without `strict`, a manifest that
    /// omits `id` is accepted.
    pub fn verify_identity(&self, strict: bool) -> Result<(), DomainError> {
        match self.declared_id() {
            Some(found) if found != self.plugin_id.as_str() => {
                Err(DomainError::IdentityMismatch {
                    expected: self.plugin_id.to_string(),
                    found,
                })
            }
            Some(_) => Ok(()),
            None if strict => Err(DomainError::IdentityMissing {
                plugin_id: self.plugin_id.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// The declared `apply` entrypoint.
    pub fn entrypoint(&self) -> Result<Entrypoint, DomainError> {
        let run = self.required_str(KEY_RUN)?;
        let callable = self.required_str(KEY_CALLABLE)?;
        Ok(Entrypoint::new(run, callable))
    }

    /// Resolve `paths.standard` and `paths.config` against `plugin_dir`.
    pub fn declared_paths(&self, plugin_dir: &Path) -> Result<DeclaredPaths, DomainError> {
        let standard = self.relative_path(KEY_STANDARD)?;
        let config = self.relative_path(KEY_CONFIG)?;
        Ok(DeclaredPaths {
            standard: standard.resolve(plugin_dir),
            config: config.resolve(plugin_dir),
        })
    }

    pub fn name(&self) -> Option<&str> {
        lookup_str(&self.raw, &["name"])
    }

    pub fn description(&self) -> Option<&str> {
        lookup_str(&self.raw, &["description"])
    }

    pub fn version(&self) -> Option<&str> {
        lookup_str(&self.raw, &["version"])
    }

    // ── helpers ───────────────────────────────────────────────────────────

    fn required_str(&self, key: &'static str) -> Result<&str, DomainError> {
        let path: Vec<&str> = key.split('.').collect();
        lookup_str(&self.raw, &path).ok_or_else(|| DomainError::EntrypointMissing {
            plugin_id: self.plugin_id.to_string(),
            key,
        })
    }

    fn relative_path(&self, key: &'static str) -> Result<RelativePath, DomainError> {
        let path: Vec<&str> = key.split('.').collect();
        let missing = |reason| DomainError::PathSpecMissing {
            plugin_id: self.plugin_id.to_string(),
            key,
            reason,
        };

        let raw = match lookup(&self.raw, &path) {
            None | Some(Value::Null) => return Err(missing("is missing")),
            Some(value) => value.as_str().ok_or_else(|| missing("must be a string"))?,
        };

        RelativePath::try_new(raw)
            .map_err(|_| missing("must be a relative path inside the plugin directory"))
    }
}

/// The `entrypoints.apply` declaration of a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entrypoint {
    run: String,
    callable: String,
}

impl Entrypoint {
    pub fn new(run: impl Into<String>, callable: impl Into<String>) -> Self {
        Self {
            run: run.into(),
            callable: callable.into(),
        }
    }

    /// File name declared in `run`, e.g. `plugin.rs`.
    pub fn run(&self) -> &str {
        &self.run
    }

    /// Symbol declared in `callable`.
    pub fn callable(&self) -> &str {
        &self.callable
    }

    /// Implementation unit name: `run` without its extension.
    pub fn unit(&self) -> &str {
        Path::new(&self.run)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.run)
    }
}

impl std::fmt::Display for Entrypoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}::{}", self.unit(), self.callable)
    }
}

/// Absolute locations of a plugin's standard and config directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredPaths {
    pub standard: PathBuf,
    pub config: PathBuf,
}
