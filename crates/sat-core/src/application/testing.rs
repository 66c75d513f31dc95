//! In-crate fakes for service tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::application::{ApplicationError, MockEntrypointRegistry, ports::Filesystem};
use crate::domain::{ConfigMap, ConfigValue, Plugin, PluginError};
use crate::error::SatResult;

/// Path-keyed in-memory file store.
#[derive(Default)]
pub struct FakeFs {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl FakeFs {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn put(&self, path: impl Into<PathBuf>, content: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(path.into(), content.to_string());
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.lock().unwrap().get(path.as_ref()).cloned()
    }
}

impl Filesystem for FakeFs {
    fn read_to_string(&self, path: &Path) -> SatResult<String> {
        self.get(path).ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "no such file".into(),
            }
            .into()
        })
    }

    fn exists(&self, path: &Path) -> bool {
        let files = self.files.lock().unwrap();
        files.keys().any(|p| p == path || p.starts_with(path))
    }

    fn create_dir_all(&self, _path: &Path) -> SatResult<()> {
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> SatResult<()> {
        self.put(path, content);
        Ok(())
    }
}

/// Manifest text with the standard entrypoint and paths.
pub fn manifest_yaml(id: &str) -> String {
    format!(
        "id: {id}\nentrypoints:\n  apply:\n    run: plugin.rs\n    callable: apply\n\
         paths:\n  standard: standard\n  config: etc\n"
    )
}

/// A registry that binds every entrypoint to a no-op plugin.
pub fn accepting_registry() -> MockEntrypointRegistry {
    let mut registry = MockEntrypointRegistry::new();
    registry.expect_bind().returning(|_, _| {
        let plugin: Arc<dyn Plugin> =
            Arc::new(|_: &ConfigMap| -> Result<Option<ConfigValue>, PluginError> { Ok(None) });
        Ok(plugin)
    });
    registry
}
