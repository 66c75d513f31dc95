//! Dublin Core field defaulting.
//!
//! Context:
//! - `metadata`: the document's existing metadata mapping (may be absent)
//! - `config.fields.<name>.default` / `config.fields.<name>.required`
//!
//! Returns the updated metadata mapping.

use sat_core::domain::{CONTEXT_CONFIG, ConfigMap, ConfigValue, Plugin, PluginError, ensure_mapping};

/// Value written for a required field that has no default.
pub const REQUIRED_FIELD_MISSING: &str = "__REQUIRED_FIELD_MISSING__";

const CONTEXT_METADATA: &str = "metadata";

#[derive(Debug, Clone, Copy, Default)]
pub struct DublinCore;

impl Plugin for DublinCore {
    fn apply(&self, context: &ConfigMap) -> Result<Option<ConfigValue>, PluginError> {
        let mut metadata = ensure_mapping(context.get(CONTEXT_METADATA));
        let config = ensure_mapping(context.get(CONTEXT_CONFIG));
        let fields = ensure_mapping(config.get("fields"));

        for (name, spec) in &fields {
            let spec = ensure_mapping(Some(spec));
            let default = spec.get("default").filter(|v| !v.is_null());
            let required = spec
                .get("required")
                .and_then(ConfigValue::as_bool)
                .unwrap_or(false);

            let current = metadata.get(name);
            let absent = current.is_none();
            if !current.is_none_or(is_blank) {
                continue;
            }

            if let Some(default) = default {
                metadata.insert(name.clone(), default.clone());
            } else if required && absent {
                metadata.insert(name.clone(), REQUIRED_FIELD_MISSING.into());
            }
        }

        Ok(Some(ConfigValue::Mapping(metadata)))
    }
}

/// Null, empty string and empty sequence count as not set.
fn is_blank(value: &ConfigValue) -> bool {
    match value {
        ConfigValue::Null => true,
        ConfigValue::String(s) => s.is_empty(),
        ConfigValue::Sequence(seq) => seq.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = "
fields:
  DC_Title:
    required: true
  DC_Publisher:
    default: Euria Archive
  DC_Rights:
    default: CC-BY-4.0
    required: true
  DC_Subject:
    required: false
";

    fn context(metadata: &str) -> ConfigMap {
        let mut ctx = ConfigMap::new();
        ctx.insert(
            CONTEXT_CONFIG.into(),
            serde_yaml::from_str::<ConfigValue>(CONFIG).unwrap(),
        );
        ctx.insert(
            CONTEXT_METADATA.into(),
            serde_yaml::from_str::<ConfigValue>(metadata).unwrap(),
        );
        ctx
    }

    fn apply(metadata: &str) -> ConfigMap {
        match DublinCore.apply(&context(metadata)).unwrap() {
            Some(ConfigValue::Mapping(map)) => map,
            other => panic!("expected a mapping, got {other:?}"),
        }
    }

    #[test]
    fn fills_defaults_and_marks_required_fields() {
        let out = apply("{}");
        assert_eq!(out.get("DC_Publisher"), Some(&"Euria Archive".into()));
        assert_eq!(out.get("DC_Rights"), Some(&"CC-BY-4.0".into()));
        assert_eq!(out.get("DC_Title"), Some(&REQUIRED_FIELD_MISSING.into()));
        assert!(out.get("DC_Subject").is_none());
    }

    #[test]
    fn keeps_existing_values() {
        let out = apply("DC_Title: Field Notes\nDC_Publisher: Someone Else\n");
        assert_eq!(out.get("DC_Title"), Some(&"Field Notes".into()));
        assert_eq!(out.get("DC_Publisher"), Some(&"Someone Else".into()));
    }

    #[test]
    fn blank_values_take_the_default() {
        let out = apply("DC_Publisher: ''\nDC_Rights: []\n");
        assert_eq!(out.get("DC_Publisher"), Some(&"Euria Archive".into()));
        assert_eq!(out.get("DC_Rights"), Some(&"CC-BY-4.0".into()));
    }

    #[test]
    fn blank_required_field_without_default_is_left_alone() {
        let out = apply("DC_Title: ~\n");
        assert_eq!(out.get("DC_Title"), Some(&ConfigValue::Null));
    }

    #[test]
    fn missing_metadata_starts_empty() {
        let mut ctx = context("{}");
        ctx.remove(CONTEXT_METADATA);
        let out = DublinCore.apply(&ctx).unwrap().unwrap();
        assert!(out.get("DC_Publisher").is_some());
    }
}
