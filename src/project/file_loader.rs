//! Reading and parsing single files, and finding them on disk

use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::LoadError;
use super::file_system::FileSystem;
use crate::base::constants::SUPPORTED_EXTENSIONS;
use crate::parser::{ParseOptions, RobotParser};
use crate::syntax::RobotFile;

/// Lowercase extension of `path`, if any
pub fn get_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

pub fn validate_extension(path: &Path) -> Result<(), LoadError> {
    match get_extension(path) {
        Some(ext) if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(LoadError::UnsupportedExtension(path.to_path_buf())),
    }
}

/// Read `path` through `fs` and parse it
pub fn load_file(
    fs: &dyn FileSystem,
    path: &Path,
    options: &ParseOptions,
) -> Result<RobotFile, LoadError> {
    validate_extension(path)?;
    let bytes = fs.read_all(path)?;
    let source =
        String::from_utf8(bytes).map_err(|_| LoadError::InvalidEncoding(path.to_path_buf()))?;
    debug!(path = %path.display(), bytes = source.len(), "parsing file");
    Ok(RobotParser::new(options.clone()).parse_str(&source, Some(path)))
}

/// Parse in-memory content as if it was read from `path`
pub fn parse_content(
    content: &str,
    path: &Path,
    options: &ParseOptions,
) -> Result<RobotFile, LoadError> {
    validate_extension(path)?;
    Ok(RobotParser::new(options.clone()).parse_str(content, Some(path)))
}

/// All files with a supported extension under `dir`, sorted
pub fn collect_file_paths(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let mut paths = Vec::new();
    collect_recursive(dir, &mut paths)?;
    paths.sort();
    Ok(paths)
}

fn collect_recursive(dir: &Path, results: &mut Vec<PathBuf>) -> Result<(), LoadError> {
    let entries = std::fs::read_dir(dir).map_err(|e| LoadError::io(dir, e))?;
    for entry in entries {
        let path = entry.map_err(|e| LoadError::io(dir, e))?.path();
        if path.is_dir() {
            collect_recursive(&path, results)?;
        } else if path.is_file() && validate_extension(&path).is_ok() {
            results.push(path);
        }
    }
    Ok(())
}
