//! Domain value objects: PluginId.
//!
//! # Design
//!
//! A plugin identifier is a logical, dot-separated name
//! (`metadata.dublin-core`) that is distinct from where the plugin lives on
//! disk. The on-disk location and the module-style name are both derived from
//! it by replacing hyphens with underscores in each segment.
//!
//! Identifiers are validated once at parse time and immutable afterwards, so
//! every other layer can rely on the derived paths being well-formed.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

// ── PluginId ──────────────────────────────────────────────────────────────────

/// A validated plugin identifier, e.g. `metadata.dublin-core`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PluginId(String);

impl PluginId {
    /// Parse and validate an identifier.
    ///
    /// Every segment, once hyphens become underscores, must match
    /// `[a-z][a-z0-9_]*` so it is usable both as a directory name and as a
    /// module-style name.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let invalid = |reason: String| DomainError::InvalidPluginId {
            id: raw.to_string(),
            reason,
        };

        if raw.is_empty() {
            return Err(invalid("identifier is empty".into()));
        }

        for (index, segment) in raw.split('.').enumerate() {
            if segment.is_empty() {
                return Err(invalid(format!("segment {} is empty", index + 1)));
            }

            let sanitized = sanitize_segment(segment);
            let mut chars = sanitized.chars();
            if !chars.next().is_some_and(|c| c.is_ascii_lowercase()) {
                return Err(invalid(format!(
                    "segment '{segment}' must start with a lowercase letter"
                )));
            }
            if let Some(bad) =
                chars.find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_'))
            {
                return Err(invalid(format!(
                    "segment '{segment}' contains invalid character '{bad}'"
                )));
            }
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Raw segments, exactly as written.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Segments with `-` replaced by `_`.
    pub fn sanitized_segments(&self) -> Vec<String> {
        self.segments().map(sanitize_segment).collect()
    }

    /// Directory of this plugin relative to the plugin root,
    /// e.g. `metadata/dublin_core`.
    pub fn relative_dir(&self) -> PathBuf {
        self.sanitized_segments().iter().collect()
    }

    /// Module-style name, e.g. `metadata.dublin_core`.
    pub fn module_path(&self) -> String {
        self.sanitized_segments().join(".")
    }
}

fn sanitize_segment(segment: &str) -> String {
    segment.replace('-', "_")
}

impl fmt::Display for PluginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PluginId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PluginId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PluginId> for String {
    fn from(id: PluginId) -> Self {
        id.0
    }
}

impl AsRef<str> for PluginId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
