//! Errors raised while loading files and resolving imports

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file is not valid UTF-8: {}", .0.display())]
    InvalidEncoding(PathBuf),

    #[error("unsupported file extension: {}", .0.display())]
    UnsupportedExtension(PathBuf),

    #[error("cannot resolve variable '{variable}' in import path '{path}'")]
    UnresolvedVariable { path: String, variable: String },

    #[error("import resolution cancelled")]
    Cancelled,
}

impl LoadError {
    /// Map an I/O error for `path`, keeping not-found distinct
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path),
            _ => Self::Io { path, source },
        }
    }
}
