//! Deep merge of configuration mappings.
//!
//! Merge semantics:
//! - Mappings: deep-merge by key (recursive)
//! - Sequences: REPLACE (override wins entirely)
//! - Scalars and nulls: override wins
//! - Type mismatches: override wins
//!
//! Inputs are borrowed and never modified; every call returns a new mapping.

use serde_yaml::Value;

use crate::domain::config::ConfigMap;

/// Merge `overlay` on top of `base`.
///
/// Right-biased: on conflicting keys the overlay value wins unless both sides
/// are mappings, in which case they are merged recursively. Keys only in
/// `base` are kept; keys only in `overlay` are appended.
pub fn deep_merge(base: &ConfigMap, overlay: &ConfigMap) -> ConfigMap {
    let mut result = base.clone();

    for (key, incoming) in overlay {
        let merged = match (result.get(key), incoming) {
            (Some(Value::Mapping(existing)), Value::Mapping(incoming)) => {
                Value::Mapping(deep_merge(existing, incoming))
            }
            _ => incoming.clone(),
        };
        result.insert(key.clone(), merged);
    }

    result
}

/// Fold layers left to right, starting from an empty mapping.
///
/// Later layers override earlier ones.
pub fn merge_layers<'a, I>(layers: I) -> ConfigMap
where
    I: IntoIterator<Item = &'a ConfigMap>,
{
    layers
        .into_iter()
        .fold(ConfigMap::new(), |acc, layer| deep_merge(&acc, layer))
}
