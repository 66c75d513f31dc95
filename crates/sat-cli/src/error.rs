//! Errors surfaced by the `sat` binary.
//!
//! Every failure ends up as a [`CliError`]: a message, a few hints the user
//! can act on, and an [`ExitKind`] that fixes the process exit status.

use std::error::Error as _;
use std::io;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use sat_core::error::{ErrorCategory as CoreCategory, SatError};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Input that passed clap but is still unusable.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A file `sat init` would overwrite.
    #[error("Configuration already exists at {path}")]
    ConfigExists { path: PathBuf },

    /// Unknown key for `sat config get`.
    #[error("Unknown configuration key '{key}'")]
    UnknownConfigKey { key: String },

    /// Layered settings failed to load, deserialise or serialise.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("{0}")]
    Core(#[from] SatError),

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: io::Error,
    },
}

impl From<io::Error> for CliError {
    fn from(source: io::Error) -> Self {
        let message = source.to_string();
        Self::IoError { message, source }
    }
}

/// How a failure is reported to the shell. The discriminant is the exit
/// status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitKind {
    Internal = 1,
    /// Bad arguments, identifiers or user files.
    Usage = 2,
    /// A plugin, plugin root or other named resource is absent.
    Missing = 3,
    /// Manifests, registries or settings disagree with each other.
    Config = 4,
}

impl From<CoreCategory> for ExitKind {
    fn from(category: CoreCategory) -> Self {
        match category {
            CoreCategory::Validation => Self::Usage,
            CoreCategory::NotFound => Self::Missing,
            CoreCategory::Configuration => Self::Config,
            CoreCategory::Internal => Self::Internal,
        }
    }
}

impl CliError {
    /// Hints printed under the message.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message, .. } => vec![
                format!("Check your input: {message}"),
                "Run with --help to see accepted arguments".into(),
            ],
            Self::ConfigExists { path } => vec![
                format!("'{}' is already present", path.display()),
                "Use --force to overwrite it".into(),
                "Inspect it with 'sat config list'".into(),
            ],
            Self::UnknownConfigKey { key } => vec![
                format!("'{key}' is not a configuration key"),
                "List every key with 'sat config list'".into(),
            ],
            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {message}"),
                format!(
                    "Check ./sat.toml or {}",
                    crate::config::AppConfig::config_path().display()
                ),
                "Use 'sat init' to create a default config".into(),
            ],
            Self::Core(inner) => inner.suggestions(),
            Self::IoError { message, .. } => vec![
                format!("Filesystem operation failed: {message}"),
                "Check that the path exists and is writable".into(),
            ],
        }
    }

    pub fn kind(&self) -> ExitKind {
        match self {
            Self::InvalidInput { .. } | Self::ConfigExists { .. } | Self::UnknownConfigKey { .. } => {
                ExitKind::Usage
            }
            Self::ConfigError { .. } => ExitKind::Config,
            Self::Core(inner) => inner.category().into(),
            Self::IoError { .. } => ExitKind::Internal,
        }
    }

    /// 2 usage, 3 missing, 4 config, 1 anything else.
    pub fn exit_code(&self) -> u8 {
        self.kind() as u8
    }

    /// The diagnostic printed on stderr.
    ///
    /// `verbose` adds the source chain; without it a hint to pass `-v` is
    /// appended. `color` enables ANSI styling.
    pub fn render(&self, verbose: bool, color: bool) -> String {
        let paint = |text: &str, style: fn(&str) -> String| {
            if color { style(text) } else { text.to_owned() }
        };

        let label = if color {
            format!("{} {}", "\u{2717}".red().bold(), "Error:".red().bold())
        } else {
            "Error:".to_owned()
        };
        let mut out = format!("\n{label} {}\n", paint(&self.to_string(), |t| t.red().to_string()));

        if verbose {
            let mut cause = self.source();
            while let Some(current) = cause {
                let line = format!("Caused by: {current}");
                out.push_str(&format!("  {}\n", paint(&line, |t| t.dimmed().to_string())));
                cause = current.source();
            }
        }

        let hints = self.suggestions();
        if !hints.is_empty() {
            let title = paint("Suggestions:", |t| t.yellow().bold().to_string());
            out.push_str(&format!("\n{title}\n"));
            for hint in &hints {
                out.push_str(&format!("  {hint}\n"));
            }
        }

        if !verbose {
            let more = paint("Use -v / --verbose for more details.", |t| t.dimmed().to_string());
            out.push_str(&format!("\n{more}\n"));
        }

        out
    }

    /// Record the failure on the tracing subscriber before exiting.
    pub fn log(&self) {
        let kind = self.kind();
        match kind {
            ExitKind::Usage | ExitKind::Missing => tracing::warn!(?kind, "{}", self),
            ExitKind::Config | ExitKind::Internal => tracing::error!(?kind, "{}", self),
        }
        if let Some(cause) = self.source() {
            tracing::debug!(%cause, "underlying error");
        }
    }
}

/// Attach a message to an I/O failure while converting it.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, message: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for io::Result<T> {
    fn with_cli_context<F, S>(self, message: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|source| CliError::IoError {
            message: message().into(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use sat_core::application::{ApplicationError, MissingArtifact};
    use sat_core::domain::DomainError;

    fn core(err: impl Into<SatError>) -> CliError {
        CliError::Core(err.into())
    }

    #[test]
    fn invalid_plugin_id_is_user_error() {
        let err = core(DomainError::InvalidPluginId {
            id: "Bad".into(),
            reason: "uppercase".into(),
        });
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn missing_required_plugin_is_not_found() {
        let err = core(ApplicationError::RequiredPluginMissing {
            plugin_id: "core.schema".into(),
            artifact: MissingArtifact::Manifest,
            path: PathBuf::from("plugins/core/schema/plugin.yml"),
        });
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn malformed_manifest_is_configuration() {
        let err = core(ApplicationError::ManifestMalformed {
            plugin_id: "core.schema".into(),
            path: PathBuf::from("plugin.yml"),
            reason: "not a mapping".into(),
        });
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn write_failure_is_internal() {
        let err = core(ApplicationError::OutputWriteFailed {
            path: PathBuf::from("/ro/archive.yml"),
            reason: "read-only".into(),
        });
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn settings_failures_exit_with_four() {
        let err = CliError::ConfigError {
            message: "bad toml".into(),
            source: None,
        };
        assert_eq!(err.kind(), ExitKind::Config);
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn local_usage_errors_exit_with_two() {
        let err = CliError::UnknownConfigKey { key: "nope".into() };
        assert_eq!(err.kind(), ExitKind::Usage);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn core_message_is_not_wrapped() {
        let err = core(ApplicationError::PluginRootNotFound {
            path: PathBuf::from("plugins"),
        });
        assert_eq!(err.to_string(), "plugin root not found: plugins");
    }

    #[test]
    fn config_exists_suggests_force() {
        let err = CliError::ConfigExists {
            path: PathBuf::from("sat.toml"),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("--force")));
    }

    #[test]
    fn plain_render_has_header_and_hint() {
        let err = CliError::UnknownConfigKey { key: "nope".into() };
        let s = err.render(false, false);
        assert!(s.contains("Error: Unknown configuration key 'nope'"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
    }

    #[test]
    fn verbose_render_walks_source_chain() {
        let err = CliError::IoError {
            message: "writing sat.toml".into(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let s = err.render(true, false);
        assert!(s.contains("Caused by: denied"));
        assert!(!s.contains("--verbose"));
    }

    #[test]
    fn optional_source_joins_the_chain() {
        let cause = io::Error::new(io::ErrorKind::InvalidData, "bad toml");
        let err = CliError::ConfigError {
            message: "loading sat.toml".into(),
            source: Some(Box::new(cause)),
        };
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("bad toml"));
        assert!(err.render(true, false).contains("Caused by: bad toml"));

        let bare = CliError::InvalidInput {
            message: "x".into(),
            source: None,
        };
        assert!(bare.source().is_none());
    }

    #[test]
    fn colorless_render_has_no_escape_codes() {
        let err = CliError::UnknownConfigKey { key: "nope".into() };
        assert!(!err.render(true, false).contains('\u{1b}'));
        assert!(err.render(true, true).contains('\u{1b}'));
    }

    #[test]
    fn io_context_replaces_message() {
        let result: io::Result<()> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let cli: CliResult<()> = result.with_cli_context(|| "reading context");
        assert!(matches!(cli, Err(CliError::IoError { ref message, .. }) if message == "reading context"));
    }
}
