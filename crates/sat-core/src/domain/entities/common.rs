use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A filesystem path guaranteed to stay **inside** the directory it is
/// joined onto.
///
/// Manifests declare their entrypoint and data directories relative to the
/// plugin directory; this type rejects absolute paths and `..` components so
/// a manifest cannot point outside its own plugin.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Try to create a contained relative path.
    ///
    /// Returns the rejected path on failure.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, PathBuf> {
        let path = path.into();
        let contained = path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if path.as_os_str().is_empty() || !contained {
            Err(path)
        } else {
            Ok(Self(path))
        }
    }

    /// Resolve against a base directory.
    pub fn resolve(&self, base: &Path) -> PathBuf {
        base.join(&self.0)
    }

    /// Borrow as a `Path`.
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
