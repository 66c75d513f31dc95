//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags ([`AppConfig::apply_overrides`])
//! 2. Environment variables (`SAT__PLUGINS__ROOT=...`)
//! 3. Config file (`--config`, else `./sat.toml`, else the user config dir)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use sat_core::domain::{BuildPlan, PluginId, PluginRequirement};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::global::GlobalArgs;
use crate::error::{CliError, CliResult};

/// Config file picked up from the working directory.
pub const LOCAL_CONFIG_FILE: &str = "sat.toml";

const ENV_PREFIX: &str = "SAT";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where plugins live and how strictly they are read.
    pub plugins: PluginsConfig,
    /// What `sat build` merges and where it writes.
    pub build: BuildConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginsConfig {
    pub root: PathBuf,
    /// Reject manifests without a declared `id`.
    pub strict_identity: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub output: PathBuf,
    /// Merge order; later entries win.
    pub plugins: Vec<PlanEntry>,
}

/// One `[[build.plugins]]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub id: String,
    #[serde(default = "required_by_default")]
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`; `--output-format` wins.
    pub format: String,
}

fn required_by_default() -> bool {
    true
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("plugins"),
            strict_identity: false,
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("config/archive.yml"),
            plugins: vec![
                PlanEntry {
                    id: "core.schema".into(),
                    required: true,
                },
                PlanEntry {
                    id: "core.archive-identity".into(),
                    required: false,
                },
            ],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl PlanEntry {
    /// Parse the `--plugin` form: `ID` or `ID?` for optional.
    pub fn from_flag(raw: &str) -> Self {
        match raw.strip_suffix('?') {
            Some(id) => Self {
                id: id.to_string(),
                required: false,
            },
            None => Self {
                id: raw.to_string(),
                required: true,
            },
        }
    }
}

impl BuildConfig {
    /// The configured plan with every identifier validated.
    pub fn plan(&self) -> CliResult<BuildPlan> {
        self.plugins
            .iter()
            .map(|entry| {
                let id = PluginId::parse(&entry.id).map_err(|e| CliError::InvalidInput {
                    message: format!("build plan entry '{}': {e}", entry.id),
                    source: Some(Box::new(e)),
                })?;
                Ok(if entry.required {
                    PluginRequirement::required(id)
                } else {
                    PluginRequirement::optional(id)
                })
            })
            .collect::<CliResult<Vec<_>>>()
            .map(BuildPlan::new)
    }
}

impl AppConfig {
    /// Load configuration layered over the built-in defaults.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> CliResult<Self> {
        let defaults = Config::try_from(&Self::default()).map_err(config_error)?;
        let mut builder = Config::builder().add_source(defaults);

        match config_file {
            Some(path) => {
                debug!(path = %path.display(), "Using explicit config file");
                builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Toml));
            }
            None => {
                let local = Path::new(LOCAL_CONFIG_FILE);
                let path = if local.is_file() {
                    local.to_path_buf()
                } else {
                    Self::config_path()
                };
                debug!(path = %path.display(), "Using implicit config file");
                builder = builder.add_source(
                    File::from(path.as_path())
                        .format(FileFormat::Toml)
                        .required(false),
                );
            }
        }

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error)
    }

    /// Fold global flags over the loaded values.
    pub fn apply_overrides(&mut self, args: &GlobalArgs) {
        if let Some(root) = &args.plugin_root {
            self.plugins.root = root.clone();
        }
        if args.strict {
            self.plugins.strict_identity = true;
        }
        if args.no_color {
            self.output.no_color = true;
        }
    }

    /// Path to the user-level configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `sat.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "sat", "sat")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// The file `load(None)` would read, if it exists.
    pub fn active_config_path(explicit: Option<&PathBuf>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.clone());
        }
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Some(local);
        }
        Some(Self::config_path()).filter(|p| p.is_file())
    }

    /// Render as TOML, the format `sat init` writes.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::ConfigError {
            message: "could not serialise configuration".into(),
            source: Some(Box::new(e)),
        })
    }
}

fn config_error(err: config::ConfigError) -> CliError {
    CliError::ConfigError {
        message: err.to_string(),
        source: Some(Box::new(err)),
    }
}
