//! End-to-end resolution and builds over on-disk plugin trees.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sat_adapters::{LocalFilesystem, MemoryFilesystem, PluginDiscovery, StaticRegistry};
use sat_core::prelude::*;
use tempfile::TempDir;

fn shipped_plugins() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../plugins")
}

fn id(raw: &str) -> PluginId {
    PluginId::parse(raw).unwrap()
}

fn builder(root: &Path) -> ConfigBuilder {
    let fs: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new());
    let resolver = PluginResolver::new(
        ManifestStore::new(root, fs.clone()),
        Arc::new(StaticRegistry::with_builtin()),
    );
    ConfigBuilder::new(resolver, ConfigLayerLoader::new(fs.clone()), fs)
}

fn default_plan() -> BuildPlan {
    BuildPlan::default()
        .require(id("core.schema"))
        .optional(id("core.archive-identity"))
}

/// Copy only the `core.schema` plugin of the shipped tree.
fn schema_only() -> TempDir {
    let root = TempDir::new().unwrap();
    let src = shipped_plugins().join("core/schema");
    let dst = root.path().join("core/schema");
    fs::create_dir_all(dst.join("etc")).unwrap();
    fs::copy(src.join("plugin.yml"), dst.join("plugin.yml")).unwrap();
    fs::copy(src.join("etc/defaults.yml"), dst.join("etc/defaults.yml")).unwrap();
    root
}

#[test]
fn shipped_plugins_are_all_valid() {
    let plugins = PluginDiscovery::new(shipped_plugins()).discover().unwrap();
    let ids: Vec<_> = plugins.iter().map(|p| p.id.as_str()).collect();

    assert_eq!(
        ids,
        vec![
            "core.archive-identity",
            "core.schema",
            "language",
            "metadata.dublin-core"
        ]
    );
    for plugin in &plugins {
        assert!(plugin.status.is_valid(), "{:?}", plugin);
    }
}

#[test]
fn every_shipped_plugin_resolves_against_builtin_registry() {
    let fs: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new());
    let resolver = PluginResolver::new(
        ManifestStore::new(shipped_plugins(), fs).with_strict_identity(true),
        Arc::new(StaticRegistry::with_builtin()),
    );

    for raw in [
        "core.schema",
        "core.archive-identity",
        "metadata.dublin-core",
        "language",
    ] {
        let handle = resolver.resolve(&id(raw)).unwrap();
        assert!(handle.config_path().ends_with("etc"));
    }
}

#[test]
fn default_build_writes_merged_archive_config() {
    let out = TempDir::new().unwrap();
    let output = out.path().join("config/archive.yml");

    let report = builder(&shipped_plugins())
        .build_to(&default_plan(), &output)
        .unwrap();

    assert!(report.skipped.is_empty());
    let written: ConfigMap = serde_yaml::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written, report.config);

    let archive = written.get("archive").unwrap();
    assert_eq!(archive.get("schema_version"), Some(&ConfigValue::from(1)));
    assert_eq!(
        archive.get("id"),
        Some(&ConfigValue::from("example-archive"))
    );
    assert_eq!(
        archive.get("layout").and_then(|l| l.get("docs")),
        Some(&ConfigValue::from("docs"))
    );
}

#[test]
fn optional_plugin_missing_from_disk_is_skipped() {
    let root = schema_only();
    let out = TempDir::new().unwrap();
    let output = out.path().join("archive.yml");

    let report = builder(root.path())
        .build_to(&default_plan(), &output)
        .unwrap();

    assert_eq!(report.applied, vec![id("core.schema")]);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].artifact, MissingArtifact::Manifest);

    let schema: ConfigMap = serde_yaml::from_str(
        &fs::read_to_string(root.path().join("core/schema/etc/defaults.yml")).unwrap(),
    )
    .unwrap();
    let expected = match schema.get("defaults") {
        Some(ConfigValue::Mapping(m)) => m.clone(),
        other => panic!("unexpected defaults: {other:?}"),
    };
    assert_eq!(report.config, expected);
}

#[test]
fn required_plugin_missing_leaves_no_output() {
    let root = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let output = out.path().join("archive.yml");

    let err = builder(root.path())
        .build_to(&default_plan(), &output)
        .unwrap_err();

    assert!(matches!(
        err,
        SatError::Application(ApplicationError::RequiredPluginMissing { ref plugin_id, .. })
            if plugin_id == "core.schema"
    ));
    assert!(!output.exists());
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn bare_sequence_defaults_abort_before_writing() {
    let root = schema_only();
    fs::write(root.path().join("core/schema/etc/defaults.yml"), "- a\n- b\n").unwrap();
    let out = TempDir::new().unwrap();
    let output = out.path().join("archive.yml");

    let err = builder(root.path())
        .build_to(&default_plan(), &output)
        .unwrap_err();

    assert!(matches!(
        err,
        SatError::Application(ApplicationError::ConfigMalformed { .. })
    ));
    assert!(!output.exists());
}

#[test]
fn dublin_core_applies_shipped_defaults() {
    let fs: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new());
    let resolver = PluginResolver::new(
        ManifestStore::new(shipped_plugins(), fs.clone()),
        Arc::new(StaticRegistry::with_builtin()),
    );
    let handle = resolver.resolve(&id("metadata.dublin-core")).unwrap();
    let defaults = ConfigLayerLoader::new(fs).load_defaults(&handle).unwrap();

    let mut context = ConfigMap::new();
    context.insert("root_dir".into(), "/archive".into());
    context.insert("config".into(), ConfigValue::Mapping(defaults));
    context.insert(
        "metadata".into(),
        serde_yaml::from_str("DC_Title: Field Notes\n").unwrap(),
    );

    let result = handle.apply(&context).unwrap().unwrap();
    assert_eq!(result.get("DC_Title"), Some(&ConfigValue::from("Field Notes")));
    assert_eq!(result.get("DC_Type"), Some(&ConfigValue::from("Text")));
    assert_eq!(
        result.get("DC_Creator"),
        Some(&ConfigValue::from("__REQUIRED_FIELD_MISSING__"))
    );
}

#[test]
fn in_memory_tree_builds_like_disk() {
    let memory = MemoryFilesystem::new();
    for (rel, defaults) in [
        ("core/schema", "defaults:\n  archive:\n    schema_version: 1\n"),
        ("core/archive_identity", "defaults:\n  archive:\n    id: memory\n"),
    ] {
        let src = shipped_plugins().join(rel);
        memory
            .add_file(
                Path::new("/plugins").join(rel).join("plugin.yml"),
                fs::read_to_string(src.join("plugin.yml")).unwrap(),
            )
            .add_file(
                Path::new("/plugins").join(rel).join("etc/defaults.yml"),
                defaults,
            );
    }
    memory.create_dir_all(Path::new("/out")).unwrap();

    let fs: Arc<dyn Filesystem> = Arc::new(memory.clone());
    let resolver = PluginResolver::new(
        ManifestStore::new("/plugins", fs.clone()),
        Arc::new(StaticRegistry::with_builtin()),
    );
    let builder = ConfigBuilder::new(resolver, ConfigLayerLoader::new(fs.clone()), fs);

    builder
        .build_to(&default_plan(), Path::new("/out/archive.yml"))
        .unwrap();

    let written = memory.read_file(Path::new("/out/archive.yml")).unwrap();
    assert_eq!(
        serde_yaml::from_str::<ConfigMap>(&written).unwrap(),
        serde_yaml::from_str::<ConfigMap>("archive:\n  schema_version: 1\n  id: memory\n").unwrap()
    );
}
