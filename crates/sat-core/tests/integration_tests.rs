//! Integration tests for sat-core's public API.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use sat_core::prelude::*;

#[derive(Default)]
struct Files(RwLock<HashMap<PathBuf, String>>);

impl Files {
    fn with(entries: &[(&str, &str)]) -> Arc<Self> {
        let files = Self::default();
        for (path, content) in entries {
            files
                .0
                .write()
                .unwrap()
                .insert(PathBuf::from(path), content.to_string());
        }
        Arc::new(files)
    }
}

impl Filesystem for Files {
    fn read_to_string(&self, path: &Path) -> SatResult<String> {
        self.0.read().unwrap().get(path).cloned().ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.into(),
                reason: "missing".into(),
            }
            .into()
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.0.read().unwrap().keys().any(|p| p.starts_with(path))
    }

    fn create_dir_all(&self, _: &Path) -> SatResult<()> {
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> SatResult<()> {
        self.0
            .write()
            .unwrap()
            .insert(path.into(), content.to_string());
        Ok(())
    }
}

/// Binds `plugin::stamp` for every id; anything else is unknown.
struct StampRegistry;

impl EntrypointRegistry for StampRegistry {
    fn bind(&self, plugin_id: &PluginId, entrypoint: &Entrypoint) -> SatResult<Arc<dyn Plugin>> {
        if entrypoint.unit() != "plugin" {
            return Err(ApplicationError::ModuleLoadError {
                plugin_id: plugin_id.to_string(),
                unit: entrypoint.unit().into(),
                reason: "not registered".into(),
            }
            .into());
        }
        if entrypoint.callable() != "stamp" {
            return Err(ApplicationError::CallableNotFound {
                plugin_id: plugin_id.to_string(),
                unit: entrypoint.unit().into(),
                callable: entrypoint.callable().into(),
            }
            .into());
        }
        let id = plugin_id.to_string();
        let plugin: Arc<dyn Plugin> =
            Arc::new(move |_: &ConfigMap| -> Result<Option<ConfigValue>, PluginError> {
                Ok(Some(ConfigValue::String(id.clone())))
            });
        Ok(plugin)
    }
}

const MANIFEST: &str = "id: core.schema
entrypoints:
  apply:
    run: plugin.rs
    callable: stamp
paths:
  standard: standard
  config: etc
";

fn resolver(files: &Arc<Files>) -> PluginResolver {
    PluginResolver::new(
        ManifestStore::new("/root/plugins", files.clone()),
        Arc::new(StampRegistry),
    )
}

#[test]
fn resolved_handle_invokes_the_declared_callable() {
    let files = Files::with(&[("/root/plugins/core/schema/plugin.yml", MANIFEST)]);

    let handle = resolver(&files)
        .resolve(&PluginId::parse("core.schema").unwrap())
        .unwrap();

    assert_eq!(handle.entrypoint().callable(), "stamp");
    assert_eq!(
        handle.apply(&ConfigMap::new()).unwrap(),
        Some(ConfigValue::String("core.schema".into()))
    );
}

#[test]
fn unknown_unit_is_a_module_load_error() {
    let manifest = MANIFEST.replace("run: plugin.rs", "run: other.rs");
    let files = Files::with(&[("/root/plugins/core/schema/plugin.yml", &manifest)]);

    let err = resolver(&files)
        .resolve(&PluginId::parse("core.schema").unwrap())
        .unwrap_err();
    assert!(matches!(
        err,
        SatError::Application(ApplicationError::ModuleLoadError { .. })
    ));
}

#[test]
fn build_to_writes_merged_yaml() {
    let files = Files::with(&[
        ("/root/plugins/core/schema/plugin.yml", MANIFEST),
        (
            "/root/plugins/core/schema/etc/defaults.yml",
            "defaults:\n  a: 1\n  b:\n    x: 1\n",
        ),
        (
            "/root/plugins/local/plugin.yml",
            &MANIFEST.replace("core.schema", "local"),
        ),
        (
            "/root/plugins/local/etc/defaults.yml",
            "defaults:\n  b:\n    y: 2\n  c: 3\n",
        ),
    ]);

    let builder = ConfigBuilder::new(
        resolver(&files),
        ConfigLayerLoader::new(files.clone()),
        files.clone(),
    );
    let plan = BuildPlan::default()
        .require(PluginId::parse("core.schema").unwrap())
        .require(PluginId::parse("local").unwrap());

    let report = builder
        .build_to(&plan, Path::new("/out/archive.yml"))
        .unwrap();

    let written = files.read_to_string(Path::new("/out/archive.yml")).unwrap();
    let expected: ConfigMap = serde_yaml::from_str("a: 1\nb:\n  x: 1\n  y: 2\nc: 3\n").unwrap();
    assert_eq!(report.config, expected);
    assert_eq!(serde_yaml::from_str::<ConfigMap>(&written).unwrap(), expected);
}

#[test]
fn merge_is_right_biased_and_has_empty_identity() {
    let a: ConfigMap = serde_yaml::from_str("k: 1\nnested:\n  keep: true\n").unwrap();
    let b: ConfigMap = serde_yaml::from_str("k: 2\nnested:\n  add: x\n").unwrap();

    let merged = deep_merge(&a, &b);
    assert_eq!(merged.get("k"), Some(&ConfigValue::from(2)));
    assert_eq!(deep_merge(&a, &ConfigMap::new()), a);
    assert_eq!(deep_merge(&ConfigMap::new(), &b), b);
}
