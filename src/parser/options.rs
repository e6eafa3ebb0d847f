//! Parsing options

use std::path::Path;

use crate::base::RobotVersion;
use crate::base::constants::TSV_EXT;

/// Textual variant of a Robot Framework file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FileFormat {
    /// `.robot`, `.resource` and `.txt`: space or pipe separated
    #[default]
    Txt,
    /// `.tsv`: tab separated
    Tsv,
}

impl FileFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case(TSV_EXT) => Self::Tsv,
            _ => Self::Txt,
        }
    }
}

/// How a `$` declaration with several values is classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScalarValuePolicy {
    /// More than one value makes the variable a ScalarAsList
    #[default]
    MultipleValuesAsList,
    /// `$` declarations are always plain scalars
    AlwaysScalar,
}

/// Options controlling a parse
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Active language version; `None` disables version gating
    pub version: Option<RobotVersion>,
    /// Forced file format; `None` detects it from the file extension
    pub format: Option<FileFormat>,
    pub scalar_policy: ScalarValuePolicy,
}

impl ParseOptions {
    pub fn with_version(mut self, version: RobotVersion) -> Self {
        self.version = Some(version);
        self
    }

    pub fn with_format(mut self, format: FileFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_scalar_policy(mut self, policy: ScalarValuePolicy) -> Self {
        self.scalar_policy = policy;
        self
    }

    /// Format to use for a file at `path`
    pub fn format_for(&self, path: Option<&Path>) -> FileFormat {
        self.format
            .or_else(|| path.map(FileFormat::from_path))
            .unwrap_or_default()
    }
}
