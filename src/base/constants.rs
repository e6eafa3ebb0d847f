//! Domain constants

/// Robot Framework suite file extension
pub const ROBOT_EXT: &str = "robot";

/// Resource file extension
pub const RESOURCE_EXT: &str = "resource";

/// Legacy plain-text extension
pub const TXT_EXT: &str = "txt";

/// Tab-separated extension
pub const TSV_EXT: &str = "tsv";

/// All extensions the parser accepts
pub const SUPPORTED_EXTENSIONS: &[&str] = &[ROBOT_EXT, RESOURCE_EXT, TXT_EXT, TSV_EXT];

/// Built-in variable replaced by the importing file's directory in import paths
pub const CURDIR_VARIABLE: &str = "${CURDIR}";

/// Byte-order mark some editors prepend to UTF-8 files
pub const BOM: char = '\u{FEFF}';
