//! Resource import resolution
//!
//! Starting from one file, every `Resource` import is followed depth first
//! and `Variables` imports are recorded as leaves. Files are keyed by
//! [`FileIdentity`], and a file enters the graph before its own imports are
//! followed, so a cycle such as A → B → C → A ends at the cached A and each
//! physical file is read and parsed at most once per [`ImportResolver::resolve`].
//!
//! Failures below the start file never abort the run: they are stored on the
//! [`ImportReference`] that named the missing or unreadable file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::error::LoadError;
use super::file_loader::load_file;
use super::file_system::{FileIdentity, FileSystem};
use crate::base::constants::CURDIR_VARIABLE;
use crate::parser::ParseOptions;
use crate::syntax::{RobotFile, SettingKind};

static VARIABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[$@&%]\{[^}]*\}").expect("variable pattern is valid"));

/// Kind of import followed by the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportKind {
    Resource,
    /// Existence-checked only; never parsed
    Variables,
}

/// A successfully resolved import
#[derive(Debug, Clone)]
pub struct ImportTarget {
    pub identity: FileIdentity,
    /// Shared model of a resource file; `None` for variable files
    pub model: Option<Arc<RobotFile>>,
}

/// One import setting of a file and where it led
#[derive(Debug)]
pub struct ImportReference {
    pub kind: ImportKind,
    /// Path as written in the setting
    pub declared: String,
    /// Line of the import setting
    pub line: i32,
    pub target: Result<ImportTarget, LoadError>,
}

impl ImportReference {
    pub fn is_valid(&self) -> bool {
        self.target.is_ok()
    }

    pub fn identity(&self) -> Option<&FileIdentity> {
        self.target.as_ref().ok().map(|target| &target.identity)
    }

    pub fn model(&self) -> Option<&Arc<RobotFile>> {
        self.target.as_ref().ok().and_then(|target| target.model.as_ref())
    }

    pub fn error(&self) -> Option<&LoadError> {
        self.target.as_ref().err()
    }
}

/// A parsed file in the graph with its outgoing imports
#[derive(Debug)]
pub struct ImportNode {
    pub path: PathBuf,
    pub model: Arc<RobotFile>,
    pub references: Vec<ImportReference>,
}

/// Result of a resolution run; nodes are kept in parse order
#[derive(Debug)]
pub struct ImportGraph {
    root: FileIdentity,
    nodes: IndexMap<FileIdentity, ImportNode>,
}

impl ImportGraph {
    pub fn root(&self) -> &FileIdentity {
        &self.root
    }

    pub fn root_node(&self) -> Option<&ImportNode> {
        self.nodes.get(&self.root)
    }

    pub fn node(&self, identity: &FileIdentity) -> Option<&ImportNode> {
        self.nodes.get(identity)
    }

    pub fn contains(&self, identity: &FileIdentity) -> bool {
        self.nodes.contains_key(identity)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (&FileIdentity, &ImportNode)> {
        self.nodes.iter()
    }

    /// Parsed files, in the order they were parsed
    pub fn files(&self) -> impl Iterator<Item = &FileIdentity> {
        self.nodes.keys()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Builds an [`ImportGraph`] from a start file
pub struct ImportResolver<F: FileSystem> {
    fs: F,
    options: ParseOptions,
    cancel: Option<CancellationToken>,
}

impl<F: FileSystem> ImportResolver<F> {
    pub fn new(fs: F) -> Self {
        Self {
            fs,
            options: ParseOptions::default(),
            cancel: None,
        }
    }

    /// Parse options applied to every file of the run
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Stop issuing file-level steps once `cancel` is signalled
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn file_system(&self) -> &F {
        &self.fs
    }

    /// Parse `start` and everything it transitively imports.
    ///
    /// Fails only when the start file cannot be loaded or the run is cancelled.
    pub fn resolve(&self, start: &Path) -> Result<ImportGraph, LoadError> {
        let mut nodes = IndexMap::new();
        let root = self.visit(start, &mut nodes)?;
        debug!(root = %root.path().display(), files = nodes.len(), "imports resolved");
        Ok(ImportGraph { root, nodes })
    }

    fn check_cancelled(&self) -> Result<(), LoadError> {
        match &self.cancel {
            Some(cancel) if cancel.is_cancelled() => Err(LoadError::Cancelled),
            _ => Ok(()),
        }
    }

    fn visit(
        &self,
        path: &Path,
        nodes: &mut IndexMap<FileIdentity, ImportNode>,
    ) -> Result<FileIdentity, LoadError> {
        self.check_cancelled()?;
        let identity = self.fs.identity(path)?;
        if nodes.contains_key(&identity) {
            debug!(path = %path.display(), "import served from cache");
            return Ok(identity);
        }

        let model = Arc::new(load_file(&self.fs, path, &self.options)?);
        nodes.insert(
            identity.clone(),
            ImportNode {
                path: path.to_path_buf(),
                model: Arc::clone(&model),
                references: Vec::new(),
            },
        );

        let mut references = Vec::new();
        for setting in model.settings() {
            let kind = match setting.kind() {
                SettingKind::Resource => ImportKind::Resource,
                SettingKind::Variables => ImportKind::Variables,
                _ => continue,
            };
            let Some(target) = setting.import_target() else {
                continue;
            };
            let declared = model.text(target).trim().to_string();
            let line = model.token(target).line_number();
            let target = match self.follow(path, kind, &declared, nodes) {
                Err(LoadError::Cancelled) => return Err(LoadError::Cancelled),
                Err(err) => {
                    warn!(
                        from = %path.display(),
                        import = %declared,
                        error = %err,
                        "unresolved import"
                    );
                    Err(err)
                }
                Ok(target) => Ok(target),
            };
            references.push(ImportReference {
                kind,
                declared,
                line,
                target,
            });
        }

        if let Some(node) = nodes.get_mut(&identity) {
            node.references = references;
        }
        Ok(identity)
    }

    fn follow(
        &self,
        from: &Path,
        kind: ImportKind,
        declared: &str,
        nodes: &mut IndexMap<FileIdentity, ImportNode>,
    ) -> Result<ImportTarget, LoadError> {
        let resolved = self.resolve_import_path(from, declared)?;
        match kind {
            ImportKind::Resource => {
                let identity = self.visit(&resolved, nodes)?;
                let model = nodes.get(&identity).map(|node| Arc::clone(&node.model));
                Ok(ImportTarget { identity, model })
            }
            ImportKind::Variables => {
                self.check_cancelled()?;
                let identity = self.fs.identity(&resolved)?;
                debug!(path = %resolved.display(), "variable file found");
                Ok(ImportTarget {
                    identity,
                    model: None,
                })
            }
        }
    }

    /// Substitute `${CURDIR}` and resolve against the importing file
    fn resolve_import_path(&self, from: &Path, declared: &str) -> Result<PathBuf, LoadError> {
        let mut text = declared.to_string();
        if text.contains(CURDIR_VARIABLE) {
            let dir = from
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            text = text.replace(CURDIR_VARIABLE, &dir.to_string_lossy());
        }
        if let Some(variable) = VARIABLE.find(&text) {
            return Err(LoadError::UnresolvedVariable {
                path: declared.to_string(),
                variable: variable.as_str().to_string(),
            });
        }
        Ok(self.fs.resolve_relative(from, Path::new(&text)))
    }
}
