use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::project::{FileIdentity, FileSystem, LoadError};

/// In-memory file system that counts reads per file
#[derive(Debug, Default)]
pub struct MemoryFs {
    files: FxHashMap<PathBuf, Vec<u8>>,
    reads: Mutex<FxHashMap<PathBuf, usize>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, content: impl Into<Vec<u8>>) -> Self {
        self.files.insert(PathBuf::from(path), content.into());
        self
    }

    pub fn reads(&self, path: &str) -> usize {
        self.reads.lock().get(Path::new(path)).copied().unwrap_or(0)
    }

    pub fn total_reads(&self) -> usize {
        self.reads.lock().values().sum()
    }

    fn key(path: &Path) -> PathBuf {
        FileIdentity::lexical(path).path().to_path_buf()
    }
}

impl FileSystem for MemoryFs {
    fn read_all(&self, path: &Path) -> Result<Vec<u8>, LoadError> {
        let key = Self::key(path);
        let content = self
            .files
            .get(&key)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(path.to_path_buf()))?;
        *self.reads.lock().entry(key).or_default() += 1;
        Ok(content)
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(&Self::key(path))
    }
}
