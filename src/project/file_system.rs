//! File-system abstraction used by loaders and the import resolver

use std::path::{Component, Path, PathBuf};

use super::error::LoadError;

/// Identity of a physical file; two paths naming the same file compare equal
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileIdentity(PathBuf);

impl FileIdentity {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Identity from `.` and `..` folding, without touching the disk
    pub fn lexical(path: &Path) -> Self {
        let mut normalized = PathBuf::new();
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    let last = normalized.components().next_back();
                    let folds = matches!(last, Some(Component::Normal(_)));
                    // `/..` is `/`
                    let at_root = matches!(last, Some(Component::RootDir | Component::Prefix(_)));
                    if folds {
                        normalized.pop();
                    } else if !at_root {
                        normalized.push(component);
                    }
                }
                other => normalized.push(other),
            }
        }
        Self(normalized)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// Blocking file access
pub trait FileSystem: Send + Sync {
    fn read_all(&self, path: &Path) -> Result<Vec<u8>, LoadError>;

    fn exists(&self, path: &Path) -> bool;

    /// Resolve `path` as written in `base` (a file) to a path
    fn resolve_relative(&self, base: &Path, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        base.parent().unwrap_or(Path::new("")).join(path)
    }

    /// Canonical identity of an existing file
    fn identity(&self, path: &Path) -> Result<FileIdentity, LoadError> {
        if self.exists(path) {
            Ok(FileIdentity::lexical(path))
        } else {
            Err(LoadError::NotFound(path.to_path_buf()))
        }
    }
}

/// The real file system
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn read_all(&self, path: &Path) -> Result<Vec<u8>, LoadError> {
        std::fs::read(path).map_err(|e| LoadError::io(path, e))
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn identity(&self, path: &Path) -> Result<FileIdentity, LoadError> {
        std::fs::canonicalize(path)
            .map(FileIdentity)
            .map_err(|e| LoadError::io(path, e))
    }
}

impl<F: FileSystem + ?Sized> FileSystem for &F {
    fn read_all(&self, path: &Path) -> Result<Vec<u8>, LoadError> {
        (**self).read_all(path)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn resolve_relative(&self, base: &Path, path: &Path) -> PathBuf {
        (**self).resolve_relative(base, path)
    }

    fn identity(&self, path: &Path) -> Result<FileIdentity, LoadError> {
        (**self).identity(path)
    }
}
