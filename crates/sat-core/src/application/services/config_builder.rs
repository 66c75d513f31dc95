//! Config Builder - folds plugin defaults into the archive configuration.
//!
//! This service drives the whole pipeline for an ordered build plan:
//! 1. Resolve each plugin
//! 2. Load its defaults
//! 3. Deep-merge the contributions in declared order
//! 4. Optionally persist the result as one YAML document

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError, MissingArtifact,
        ports::Filesystem,
        services::{ConfigLayerLoader, PluginResolver},
    },
    domain::{BuildPlan, ConfigMap, PluginId, PluginRequirement, merge_layers},
    error::{SatError, SatResult},
};

/// An optional plugin that contributed nothing because a file was missing.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedPlugin {
    pub plugin_id: PluginId,
    pub artifact: MissingArtifact,
    pub path: PathBuf,
}

/// Outcome of a successful build.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    pub config: ConfigMap,
    /// Plugins whose defaults were merged, in order.
    pub applied: Vec<PluginId>,
    pub skipped: Vec<SkippedPlugin>,
}

pub struct ConfigBuilder {
    resolver: PluginResolver,
    loader: ConfigLayerLoader,
    filesystem: Arc<dyn Filesystem>,
}

impl ConfigBuilder {
    pub fn new(
        resolver: PluginResolver,
        loader: ConfigLayerLoader,
        filesystem: Arc<dyn Filesystem>,
    ) -> Self {
        Self {
            resolver,
            loader,
            filesystem,
        }
    }

    /// Build the merged configuration.
    ///
    /// A required plugin without a manifest or defaults file aborts the
    /// build; an optional one is skipped with a warning. Any other failure
    /// aborts regardless of `required`.
    #[instrument(skip_all, fields(plugins = plan.len()))]
    pub fn build(&self, plan: &BuildPlan) -> SatResult<BuildReport> {
        let mut layers = Vec::with_capacity(plan.len());
        let mut applied = Vec::new();
        let mut skipped = Vec::new();

        for requirement in plan.entries() {
            match self.contribution(requirement)? {
                Ok(defaults) => {
                    info!(plugin = %requirement.id, keys = defaults.len(), "Defaults applied");
                    layers.push(defaults);
                    applied.push(requirement.id.clone());
                }
                Err(skip) => {
                    warn!(
                        plugin = %skip.plugin_id,
                        path = %skip.path.display(),
                        "Optional plugin is missing its {}, skipping",
                        skip.artifact
                    );
                    skipped.push(skip);
                }
            }
        }

        let config = merge_layers(&layers);
        info!(
            applied = applied.len(),
            skipped = skipped.len(),
            "Configuration built"
        );

        Ok(BuildReport {
            config,
            applied,
            skipped,
        })
    }

    /// Build and write the result to `output` as YAML.
    ///
    /// Nothing is written unless the whole build succeeds.
    #[instrument(skip_all, fields(output = %output.display()))]
    pub fn build_to(&self, plan: &BuildPlan, output: &Path) -> SatResult<BuildReport> {
        let report = self.build(plan)?;

        let write_failed = |reason: String| ApplicationError::OutputWriteFailed {
            path: output.to_path_buf(),
            reason,
        };

        let yaml = serde_yaml::to_string(&report.config).map_err(|e| write_failed(e.to_string()))?;

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.filesystem
                .create_dir_all(parent)
                .map_err(|e| write_failed(e.to_string()))?;
        }
        self.filesystem
            .write_file(output, &yaml)
            .map_err(|e| write_failed(e.to_string()))?;

        info!("Configuration written");
        Ok(report)
    }

    /// One plugin's defaults, or the reason an optional plugin is skipped.
    fn contribution(
        &self,
        requirement: &PluginRequirement,
    ) -> SatResult<Result<ConfigMap, SkippedPlugin>> {
        let id = &requirement.id;

        let missing = match self.resolver.resolve(id) {
            Ok(handle) => match self.loader.load_defaults_if_present(&handle)? {
                Some(defaults) => return Ok(Ok(defaults)),
                None => SkippedPlugin {
                    plugin_id: id.clone(),
                    artifact: MissingArtifact::Defaults,
                    path: self.loader.defaults_path(&handle),
                },
            },
            Err(SatError::Application(ApplicationError::ManifestNotFound { path, .. })) => {
                SkippedPlugin {
                    plugin_id: id.clone(),
                    artifact: MissingArtifact::Manifest,
                    path,
                }
            }
            Err(e) => return Err(e),
        };

        if requirement.required {
            return Err(ApplicationError::RequiredPluginMissing {
                plugin_id: missing.plugin_id.to_string(),
                artifact: missing.artifact,
                path: missing.path,
            }
            .into());
        }
        Ok(Err(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{
        ManifestStore,
        testing::{FakeFs, accepting_registry, manifest_yaml},
    };
    use crate::domain::{DomainError, parse_mapping};

    const OUTPUT: &str = "/archive/config/archive.yml";

    fn id(raw: &str) -> PluginId {
        PluginId::parse(raw).unwrap()
    }

    fn builder(fs: &Arc<FakeFs>) -> ConfigBuilder {
        let resolver = PluginResolver::new(
            ManifestStore::new("/plugins", fs.clone()),
            Arc::new(accepting_registry()),
        );
        ConfigBuilder::new(resolver, ConfigLayerLoader::new(fs.clone()), fs.clone())
    }

    fn plan() -> BuildPlan {
        BuildPlan::default()
            .require(id("core.schema"))
            .optional(id("core.archive-identity"))
    }

    fn add_schema(fs: &FakeFs) {
        fs.put("/plugins/core/schema/plugin.yml", &manifest_yaml("core.schema"));
        fs.put(
            "/plugins/core/schema/etc/defaults.yml",
            "defaults:\n  archive:\n    schema_version: 1\n    languages: [en]\n",
        );
    }

    fn add_identity(fs: &FakeFs) {
        fs.put(
            "/plugins/core/archive_identity/plugin.yml",
            &manifest_yaml("core.archive-identity"),
        );
        fs.put(
            "/plugins/core/archive_identity/etc/defaults.yml",
            "defaults:\n  archive:\n    id: euria\n    languages: [en, fr]\n",
        );
    }

    #[test]
    fn later_plugins_override_earlier_ones() {
        let fs = FakeFs::new();
        add_schema(&fs);
        add_identity(&fs);

        let report = builder(&fs).build(&plan()).unwrap();

        assert_eq!(
            report.config,
            parse_mapping("archive:\n  schema_version: 1\n  languages: [en, fr]\n  id: euria\n")
                .unwrap()
        );
        assert_eq!(report.applied.len(), 2);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn missing_required_manifest_aborts_without_output() {
        let fs = FakeFs::new();
        add_identity(&fs);

        let err = builder(&fs)
            .build_to(&plan(), Path::new(OUTPUT))
            .unwrap_err();

        assert_eq!(
            err,
            SatError::Application(ApplicationError::RequiredPluginMissing {
                plugin_id: "core.schema".into(),
                artifact: MissingArtifact::Manifest,
                path: PathBuf::from("/plugins/core/schema/plugin.yml"),
            })
        );
        assert!(fs.get(OUTPUT).is_none());
    }

    #[test]
    fn missing_optional_plugin_is_skipped_with_report() {
        let fs = FakeFs::new();
        add_schema(&fs);

        let report = builder(&fs)
            .build_to(&plan(), Path::new(OUTPUT))
            .unwrap();

        assert_eq!(
            report.config,
            parse_mapping("archive:\n  schema_version: 1\n  languages: [en]\n").unwrap()
        );
        assert_eq!(report.applied, vec![id("core.schema")]);
        assert_eq!(
            report.skipped,
            vec![SkippedPlugin {
                plugin_id: id("core.archive-identity"),
                artifact: MissingArtifact::Manifest,
                path: PathBuf::from("/plugins/core/archive_identity/plugin.yml"),
            }]
        );

        let written = parse_mapping(&fs.get(OUTPUT).unwrap()).unwrap();
        assert_eq!(written, report.config);
    }

    #[test]
    fn missing_required_defaults_file_aborts() {
        let fs = FakeFs::new();
        fs.put("/plugins/core/schema/plugin.yml", &manifest_yaml("core.schema"));

        let err = builder(&fs).build(&plan()).unwrap_err();
        assert!(matches!(
            err,
            SatError::Application(ApplicationError::RequiredPluginMissing {
                artifact: MissingArtifact::Defaults,
                ..
            })
        ));
    }

    #[test]
    fn malformed_defaults_abort_even_when_optional() {
        let fs = FakeFs::new();
        add_schema(&fs);
        fs.put(
            "/plugins/core/archive_identity/plugin.yml",
            &manifest_yaml("core.archive-identity"),
        );
        fs.put("/plugins/core/archive_identity/etc/defaults.yml", "- a\n- b\n");

        let err = builder(&fs)
            .build_to(&plan(), Path::new(OUTPUT))
            .unwrap_err();
        assert!(matches!(
            err,
            SatError::Application(ApplicationError::ConfigMalformed { .. })
        ));
        assert!(fs.get(OUTPUT).is_none());
    }

    #[test]
    fn identity_mismatch_aborts_even_when_optional() {
        let fs = FakeFs::new();
        add_schema(&fs);
        fs.put(
            "/plugins/core/archive_identity/plugin.yml",
            &manifest_yaml("core.archive_identity"),
        );

        let err = builder(&fs).build(&plan()).unwrap_err();
        assert!(matches!(
            err,
            SatError::Domain(DomainError::IdentityMismatch { .. })
        ));
    }

    #[test]
    fn empty_plan_builds_empty_configuration() {
        let fs = FakeFs::new();
        let report = builder(&fs).build(&BuildPlan::default()).unwrap();
        assert!(report.config.is_empty());
    }
}
