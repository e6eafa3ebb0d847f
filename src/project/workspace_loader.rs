use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, warn};

use super::error::LoadError;
use super::file_loader;
use super::file_system::OsFileSystem;
use crate::parser::ParseOptions;
use crate::syntax::RobotFile;

/// Parse independent files in parallel; results keep the order of `paths`
pub fn parse_files(
    paths: &[PathBuf],
    options: &ParseOptions,
) -> Vec<(PathBuf, Result<RobotFile, LoadError>)> {
    paths
        .par_iter()
        .map(|path| {
            let result = file_loader::load_file(&OsFileSystem, path, options);
            (path.clone(), result)
        })
        .collect()
}

/// Files of a directory tree and the ones that failed to load
#[derive(Debug, Default)]
pub struct LoadedWorkspace {
    pub files: Vec<(PathBuf, Arc<RobotFile>)>,
    pub errors: Vec<(PathBuf, LoadError)>,
}

impl LoadedWorkspace {
    pub fn get(&self, path: &Path) -> Option<&Arc<RobotFile>> {
        self.files
            .iter()
            .find(|(candidate, _)| candidate == path)
            .map(|(_, file)| file)
    }
}

/// Loads every supported file under a directory
#[derive(Debug, Clone, Default)]
pub struct WorkspaceLoader {
    options: ParseOptions,
}

impl WorkspaceLoader {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn load_directory(&self, dir: &Path) -> Result<LoadedWorkspace, LoadError> {
        if !dir.is_dir() {
            return Err(LoadError::NotFound(dir.to_path_buf()));
        }
        let paths = file_loader::collect_file_paths(dir)?;
        debug!(dir = %dir.display(), files = paths.len(), "loading workspace");

        let mut workspace = LoadedWorkspace::default();
        for (path, result) in parse_files(&paths, &self.options) {
            match result {
                Ok(file) => workspace.files.push((path, Arc::new(file))),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "failed to load file");
                    workspace.errors.push((path, err));
                }
            }
        }
        Ok(workspace)
    }
}
