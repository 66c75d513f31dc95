use sat_core::domain::{CONTEXT_ROOT_DIR, ConfigMap, ConfigValue, Plugin, PluginError};
use tracing::info;

/// Entrypoint of the `core.*` plugins.
///
/// These plugins only contribute defaults; applying one checks that the
/// context names an archive root.
#[derive(Debug, Clone, Copy, Default)]
pub struct RootDirCheck;

impl Plugin for RootDirCheck {
    fn apply(&self, context: &ConfigMap) -> Result<Option<ConfigValue>, PluginError> {
        let root_dir = context
            .get(CONTEXT_ROOT_DIR)
            .and_then(ConfigValue::as_str)
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| PluginError::new("context is missing `root_dir`"))?;

        info!(root_dir, "Archive root accepted");
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_root_dir() {
        assert!(RootDirCheck.apply(&ConfigMap::new()).is_err());

        let mut ctx = ConfigMap::new();
        ctx.insert(CONTEXT_ROOT_DIR.into(), "".into());
        assert!(RootDirCheck.apply(&ctx).is_err());

        ctx.insert(CONTEXT_ROOT_DIR.into(), "/archive".into());
        assert_eq!(RootDirCheck.apply(&ctx).unwrap(), None);
    }
}
