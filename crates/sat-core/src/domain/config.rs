//! Configuration mappings and YAML document helpers.
//!
//! Manifests, defaults files and the built archive configuration are all
//! YAML mappings. Key order is preserved for output but never significant for
//! equality.

use serde_yaml::Value;
use thiserror::Error;

/// A mapping of configuration keys to scalar, mapping or sequence values.
pub type ConfigMap = serde_yaml::Mapping;

/// Any value that can appear inside a [`ConfigMap`].
pub type ConfigValue = serde_yaml::Value;

/// Why a document could not be read as a mapping.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("invalid YAML: {0}")]
    Syntax(String),

    #[error("expected a mapping at the top level, found {found}")]
    NotAMapping { found: &'static str },
}

/// Parse a YAML document that must be a mapping.
///
/// An empty document (or one holding only comments) is an empty mapping.
pub fn parse_mapping(text: &str) -> Result<ConfigMap, DocumentError> {
    if text.trim().is_empty() {
        return Ok(ConfigMap::new());
    }

    let value: Value =
        serde_yaml::from_str(text).map_err(|e| DocumentError::Syntax(e.to_string()))?;

    match value {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(ConfigMap::new()),
        other => Err(DocumentError::NotAMapping {
            found: kind_of(&other),
        }),
    }
}

/// Normalize an optional value to a mapping; anything else becomes empty.
pub fn ensure_mapping(value: Option<&ConfigValue>) -> ConfigMap {
    match value {
        Some(Value::Mapping(map)) => map.clone(),
        _ => ConfigMap::new(),
    }
}

/// Follow a key path through nested mappings.
pub fn lookup<'a>(map: &'a ConfigMap, path: &[&str]) -> Option<&'a ConfigValue> {
    let (first, rest) = path.split_first()?;
    let mut current = map.get(*first)?;
    for key in rest {
        current = current.as_mapping()?.get(*key)?;
    }
    Some(current)
}

/// Follow a key path and return a non-empty string value.
pub fn lookup_str<'a>(map: &'a ConfigMap, path: &[&str]) -> Option<&'a str> {
    lookup(map, path)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// Human-readable name of a value's YAML type.
pub fn kind_of(value: &ConfigValue) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
