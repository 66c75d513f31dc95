//! A [`Filesystem`] held in memory, for tests that should not touch disk.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use sat_core::application::{ApplicationError, ports::Filesystem};
use sat_core::error::SatResult;

/// Files and directories keyed by path. Clones share one tree.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    tree: Arc<RwLock<Tree>>,
}

#[derive(Debug, Default)]
struct Tree {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
}

impl Tree {
    /// Record `dir` and every ancestor of it.
    fn mkdirs(&mut self, dir: &Path) {
        for ancestor in dir.ancestors() {
            if ancestor.as_os_str().is_empty() || !self.dirs.insert(ancestor.to_path_buf()) {
                break;
            }
        }
    }
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed `path` with `content`, creating parent directories.
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<String>) -> &Self {
        let path = path.as_ref();
        if let Ok(mut tree) = self.write() {
            if let Some(parent) = path.parent() {
                tree.mkdirs(parent);
            }
            tree.files.insert(path.to_path_buf(), content.into());
        }
        self
    }

    pub fn read_file(&self, path: &Path) -> Option<String> {
        self.read().ok()?.files.get(path).cloned()
    }

    /// Every file path, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.read()
            .map(|tree| tree.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn read(&self) -> SatResult<RwLockReadGuard<'_, Tree>> {
        self.tree
            .read()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }

    fn write(&self) -> SatResult<RwLockWriteGuard<'_, Tree>> {
        self.tree
            .write()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }
}

impl Filesystem for MemoryFilesystem {
    fn read_to_string(&self, path: &Path) -> SatResult<String> {
        let tree = self.read()?;
        match tree.files.get(path) {
            Some(content) => Ok(content.clone()),
            None => Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "no such file".into(),
            }
            .into()),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.read()
            .map(|tree| tree.files.contains_key(path) || tree.dirs.contains(path))
            .unwrap_or(false)
    }

    fn create_dir_all(&self, path: &Path) -> SatResult<()> {
        self.write()?.mkdirs(path);
        Ok(())
    }

    /// Fails unless the parent directory was created first, like the disk.
    fn write_file(&self, path: &Path, content: &str) -> SatResult<()> {
        let mut tree = self.write()?;
        let orphaned = path
            .parent()
            .is_some_and(|parent| !parent.as_os_str().is_empty() && !tree.dirs.contains(parent));
        if orphaned {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "parent directory does not exist".into(),
            }
            .into());
        }
        tree.files.insert(path.to_path_buf(), content.to_owned());
        Ok(())
    }
}
