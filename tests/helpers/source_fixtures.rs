//! Fixture discovery and parse helpers shared by integration tests.

use std::path::{Path, PathBuf};

use robot_syntax::{ParseOptions, RobotFile, RobotParser, RobotVersion};
use walkdir::WalkDir;

/// Directory holding the checked-in fixtures.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Every Robot Framework file below `dir`, sorted.
pub fn robot_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("robot" | "resource" | "txt" | "tsv")
            )
        })
        .collect();
    files.sort();
    files
}

/// Parse `source` as if read from `path`.
pub fn parse_as(source: &str, path: &str) -> RobotFile {
    RobotParser::new(ParseOptions::default()).parse_str(source, Some(Path::new(path)))
}

/// Parse `source` under a given framework version.
pub fn parse_at(source: &str, major: u32, minor: u32) -> RobotFile {
    let options = ParseOptions::default().with_version(RobotVersion::new(major, minor));
    robot_syntax::parse(source, &options)
}
