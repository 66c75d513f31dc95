//! Language detection from a document path.
//!
//! Context:
//! - `file_path`: path of the document being processed
//! - `metadata`: existing metadata (may be absent)
//! - `config.languages`: list of `{ slug, bcp_47_tag, canonical }`
//!
//! A path component equal to a language `slug` selects that language;
//! otherwise the `canonical` language is used. `DC_Language` is set unless
//! the metadata already has one.

use std::path::{Component, Path};

use sat_core::domain::{CONTEXT_CONFIG, ConfigMap, ConfigValue, Plugin, PluginError, ensure_mapping};
use tracing::debug;

const CONTEXT_FILE_PATH: &str = "file_path";
const CONTEXT_METADATA: &str = "metadata";
const LANGUAGE_FIELD: &str = "DC_Language";

#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageDetector;

impl Plugin for LanguageDetector {
    fn apply(&self, context: &ConfigMap) -> Result<Option<ConfigValue>, PluginError> {
        let file_path = context
            .get(CONTEXT_FILE_PATH)
            .and_then(ConfigValue::as_str)
            .ok_or_else(|| PluginError::new("context is missing `file_path`"))?;

        let config = ensure_mapping(context.get(CONTEXT_CONFIG));
        let languages = match config.get("languages") {
            Some(ConfigValue::Sequence(languages)) if !languages.is_empty() => languages,
            _ => return Ok(None),
        };

        let Some(tag) = detect_language(Path::new(file_path), languages) else {
            debug!(file_path, "No language detected");
            return Ok(None);
        };

        let mut metadata = ensure_mapping(context.get(CONTEXT_METADATA));
        if !metadata.contains_key(LANGUAGE_FIELD) {
            metadata.insert(LANGUAGE_FIELD.into(), tag.into());
        }
        Ok(Some(ConfigValue::Mapping(metadata)))
    }
}

/// BCP-47 tag for `path`: first slug match on any component, else canonical.
pub fn detect_language(path: &Path, languages: &[ConfigValue]) -> Option<String> {
    let tag = |lang: &ConfigValue| {
        lang.get("bcp_47_tag")
            .and_then(ConfigValue::as_str)
            .map(str::to_string)
    };

    for component in path.components() {
        let Component::Normal(part) = component else {
            continue;
        };
        let found = languages.iter().find(|lang| {
            lang.get("slug")
                .and_then(ConfigValue::as_str)
                .is_some_and(|slug| part.to_str() == Some(slug))
        });
        if let Some(lang) = found {
            return tag(lang);
        }
    }

    languages
        .iter()
        .find(|lang| lang.get("canonical").and_then(ConfigValue::as_bool) == Some(true))
        .and_then(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LANGUAGES: &str = "
- slug: en-ca
  bcp_47_tag: en-CA
  canonical: true
- slug: fr-ca
  bcp_47_tag: fr-CA
";

    fn languages() -> Vec<ConfigValue> {
        serde_yaml::from_str(LANGUAGES).unwrap()
    }

    fn context(file_path: &str, metadata: &str) -> ConfigMap {
        let mut config = ConfigMap::new();
        config.insert("languages".into(), ConfigValue::Sequence(languages()));

        let mut ctx = ConfigMap::new();
        ctx.insert(CONTEXT_FILE_PATH.into(), file_path.into());
        ctx.insert(CONTEXT_CONFIG.into(), ConfigValue::Mapping(config));
        ctx.insert(
            CONTEXT_METADATA.into(),
            serde_yaml::from_str::<ConfigValue>(metadata).unwrap(),
        );
        ctx
    }

    #[test]
    fn detects_slug_anywhere_in_path() {
        assert_eq!(
            detect_language(Path::new("archive/fr-ca/docs/note.md"), &languages()),
            Some("fr-CA".into())
        );
    }

    #[test]
    fn falls_back_to_canonical() {
        assert_eq!(
            detect_language(Path::new("archive/docs/note.md"), &languages()),
            Some("en-CA".into())
        );
    }

    #[test]
    fn no_canonical_means_no_language() {
        let langs: Vec<ConfigValue> =
            serde_yaml::from_str("- slug: fr-ca\n  bcp_47_tag: fr-CA\n").unwrap();
        assert_eq!(detect_language(Path::new("docs/a.md"), &langs), None);
    }

    #[test]
    fn sets_language_unless_present() {
        let out = LanguageDetector
            .apply(&context("fr-ca/a.md", "DC_Title: Notes\n"))
            .unwrap()
            .unwrap();
        assert_eq!(out.get(LANGUAGE_FIELD), Some(&"fr-CA".into()));
        assert_eq!(out.get("DC_Title"), Some(&"Notes".into()));

        let out = LanguageDetector
            .apply(&context("fr-ca/a.md", "DC_Language: en\n"))
            .unwrap()
            .unwrap();
        assert_eq!(out.get(LANGUAGE_FIELD), Some(&"en".into()));
    }

    #[test]
    fn without_languages_nothing_changes() {
        let mut ctx = ConfigMap::new();
        ctx.insert(CONTEXT_FILE_PATH.into(), "fr-ca/a.md".into());
        assert_eq!(LanguageDetector.apply(&ctx).unwrap(), None);
    }

    #[test]
    fn file_path_is_required() {
        assert!(LanguageDetector.apply(&ConfigMap::new()).is_err());
    }
}
