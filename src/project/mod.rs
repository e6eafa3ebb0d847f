mod document;
mod error;
pub mod file_loader;
mod file_system;
pub mod import_resolver;
pub mod workspace_loader;

pub use document::DocumentHandle;
pub use error::LoadError;
pub use file_system::{FileIdentity, FileSystem, OsFileSystem};
pub use import_resolver::{
    ImportGraph, ImportKind, ImportNode, ImportReference, ImportResolver, ImportTarget,
};
pub use workspace_loader::{LoadedWorkspace, WorkspaceLoader, parse_files};

#[cfg(test)]
mod tests;
