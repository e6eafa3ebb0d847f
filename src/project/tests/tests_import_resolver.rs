use std::path::Path;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::memory_fs::MemoryFs;
use crate::project::{FileIdentity, ImportKind, ImportResolver, LoadError, OsFileSystem};
use rstest::rstest;

fn settings(lines: &[&str]) -> String {
    let mut text = String::from("*** Settings ***\n");
    for line in lines {
        text.push_str(line);
        text.push('\n');
    }
    text
}

fn id(path: &str) -> FileIdentity {
    FileIdentity::new(path)
}

// ============================================================================
// CYCLES AND SHARING
// ============================================================================

#[test]
fn test_cycle_parses_each_file_once() {
    let fs = MemoryFs::new()
        .with_file("/p/a.robot", settings(&["Resource  b.resource"]))
        .with_file("/p/b.resource", settings(&["Resource  c.resource"]))
        .with_file("/p/c.resource", settings(&["Resource  a.robot"]));
    let resolver = ImportResolver::new(&fs);
    let graph = resolver.resolve(Path::new("/p/a.robot")).unwrap();

    assert_eq!(graph.len(), 3);
    for path in ["/p/a.robot", "/p/b.resource", "/p/c.resource"] {
        assert_eq!(fs.reads(path), 1, "{path} read more than once");
    }

    let root = graph.root_node().unwrap();
    let back_edge = &graph.node(&id("/p/c.resource")).unwrap().references[0];
    assert!(back_edge.is_valid());
    assert_eq!(back_edge.identity(), Some(graph.root()));
    assert!(Arc::ptr_eq(back_edge.model().unwrap(), &root.model));
}

#[test]
fn test_diamond_shares_one_model() {
    let fs = MemoryFs::new()
        .with_file(
            "/p/a.robot",
            settings(&["Resource  b.resource", "Resource  c.resource"]),
        )
        .with_file("/p/b.resource", settings(&["Resource  common/d.resource"]))
        .with_file("/p/c.resource", settings(&["Resource  ./common/d.resource"]))
        .with_file("/p/common/d.resource", "*** Keywords ***\nShared\n    No Operation\n");
    let graph = ImportResolver::new(&fs)
        .resolve(Path::new("/p/a.robot"))
        .unwrap();

    assert_eq!(graph.len(), 4);
    assert_eq!(fs.reads("/p/common/d.resource"), 1);
    let from_b = graph.node(&id("/p/b.resource")).unwrap().references[0]
        .model()
        .unwrap();
    let from_c = graph.node(&id("/p/c.resource")).unwrap().references[0]
        .model()
        .unwrap();
    assert!(Arc::ptr_eq(from_b, from_c));
    assert_eq!(from_b.keywords().len(), 1);
}

#[test]
fn test_self_import_resolves_to_root() {
    let fs = MemoryFs::new().with_file("/p/a.resource", settings(&["Resource  a.resource"]));
    let graph = ImportResolver::new(&fs)
        .resolve(Path::new("/p/a.resource"))
        .unwrap();
    assert_eq!(graph.len(), 1);
    assert_eq!(fs.total_reads(), 1);
    let reference = &graph.root_node().unwrap().references[0];
    assert_eq!(reference.identity(), Some(graph.root()));
}

#[test]
fn test_parse_order_is_depth_first() {
    let fs = MemoryFs::new()
        .with_file(
            "/p/a.robot",
            settings(&["Resource  b.resource", "Resource  d.resource"]),
        )
        .with_file("/p/b.resource", settings(&["Resource  c.resource"]))
        .with_file("/p/c.resource", "")
        .with_file("/p/d.resource", "");
    let graph = ImportResolver::new(&fs)
        .resolve(Path::new("/p/a.robot"))
        .unwrap();
    let order: Vec<_> = graph
        .files()
        .map(|identity| identity.path().display().to_string())
        .collect();
    assert_eq!(
        order,
        vec!["/p/a.robot", "/p/b.resource", "/p/c.resource", "/p/d.resource"]
    );
}

// ============================================================================
// FAILURES
// ============================================================================

#[test]
fn test_missing_import_is_recorded_not_fatal() {
    let fs = MemoryFs::new().with_file(
        "/p/a.robot",
        settings(&[
            "Library  Collections",
            "Resource  missing.resource",
            "Resource  ok.resource",
        ]),
    )
    .with_file("/p/ok.resource", "");
    let graph = ImportResolver::new(&fs)
        .resolve(Path::new("/p/a.robot"))
        .unwrap();

    let references = &graph.root_node().unwrap().references;
    assert_eq!(references.len(), 2);
    assert!(!references[0].is_valid());
    assert_eq!(references[0].declared, "missing.resource");
    assert_eq!(references[0].line, 3);
    assert!(matches!(references[0].error(), Some(LoadError::NotFound(_))));
    assert!(references[1].is_valid());
}

#[test]
fn test_missing_start_file_fails() {
    let fs = MemoryFs::new();
    let err = ImportResolver::new(&fs)
        .resolve(Path::new("/p/none.robot"))
        .unwrap_err();
    assert!(matches!(err, LoadError::NotFound(_)));
}

#[test]
fn test_unreadable_import_does_not_stop_siblings() {
    let fs = MemoryFs::new()
        .with_file(
            "/p/a.robot",
            settings(&["Resource  broken.resource", "Resource  fine.resource"]),
        )
        .with_file("/p/broken.resource", vec![0xff, 0xfe, 0x00])
        .with_file("/p/fine.resource", "");
    let graph = ImportResolver::new(&fs)
        .resolve(Path::new("/p/a.robot"))
        .unwrap();
    let references = &graph.root_node().unwrap().references;
    assert!(matches!(
        references[0].error(),
        Some(LoadError::InvalidEncoding(_))
    ));
    assert!(references[1].is_valid());
    assert_eq!(graph.len(), 2);
}

// ============================================================================
// PATHS AND VARIABLES
// ============================================================================

#[test]
fn test_curdir_is_the_importing_directory() {
    let fs = MemoryFs::new()
        .with_file(
            "/p/suite/a.robot",
            settings(&["Resource  ${CURDIR}/../res/x.resource"]),
        )
        .with_file("/p/res/x.resource", "");
    let graph = ImportResolver::new(&fs)
        .resolve(Path::new("/p/suite/a.robot"))
        .unwrap();
    let reference = &graph.root_node().unwrap().references[0];
    assert_eq!(reference.identity(), Some(&id("/p/res/x.resource")));
}

#[test]
fn test_curdir_of_relative_start_path() {
    let fs = MemoryFs::new()
        .with_file("a.robot", settings(&["Resource  ${CURDIR}/x.resource"]))
        .with_file("x.resource", "");
    let graph = ImportResolver::new(&fs)
        .resolve(Path::new("a.robot"))
        .unwrap();
    let reference = &graph.root_node().unwrap().references[0];
    assert!(reference.is_valid(), "{:?}", reference.error());
    assert_eq!(reference.identity(), Some(&id("x.resource")));
}

#[test]
fn test_leading_parent_dirs_keep_files_apart() {
    let fs = MemoryFs::new()
        .with_file(
            "../a.robot",
            settings(&["Resource  ../res/x.resource", "Resource  res/x.resource"]),
        )
        .with_file("../../res/x.resource", "*** Keywords ***\nOuter\n    No Operation\n")
        .with_file("../res/x.resource", "*** Keywords ***\nInner\n    No Operation\n");
    let graph = ImportResolver::new(&fs)
        .resolve(Path::new("../a.robot"))
        .unwrap();

    assert_eq!(graph.len(), 3);
    let references = &graph.root_node().unwrap().references;
    assert_eq!(references[0].identity(), Some(&id("../../res/x.resource")));
    assert_eq!(references[1].identity(), Some(&id("../res/x.resource")));

    let outer = references[0].model().unwrap();
    let inner = references[1].model().unwrap();
    assert_eq!(outer.text(outer.keywords().elements()[0].name()), "Outer");
    assert_eq!(inner.text(inner.keywords().elements()[0].name()), "Inner");
    assert_eq!(fs.reads("../../res/x.resource"), 1);
    assert_eq!(fs.reads("../res/x.resource"), 1);
}

#[rstest]
#[case("${RESOURCES}/x.resource", "${RESOURCES}")]
#[case("@{dirs}/x.resource", "@{dirs}")]
fn test_other_variables_are_unresolved(#[case] declared: &str, #[case] variable: &str) {
    let fs = MemoryFs::new().with_file("/p/a.robot", settings(&[&format!("Resource  {declared}")]));
    let graph = ImportResolver::new(&fs)
        .resolve(Path::new("/p/a.robot"))
        .unwrap();
    let reference = &graph.root_node().unwrap().references[0];
    match reference.error() {
        Some(LoadError::UnresolvedVariable { variable: found, .. }) => assert_eq!(found, variable),
        other => panic!("expected an unresolved variable, got {other:?}"),
    }
}

#[test]
fn test_variable_files_are_leaves() {
    let fs = MemoryFs::new()
        .with_file(
            "/p/a.robot",
            settings(&["Variables  vars.py  arg", "Variables  gone.py"]),
        )
        .with_file("/p/vars.py", "X = 1\n");
    let graph = ImportResolver::new(&fs)
        .resolve(Path::new("/p/a.robot"))
        .unwrap();

    let references = &graph.root_node().unwrap().references;
    assert_eq!(references[0].kind, ImportKind::Variables);
    assert!(references[0].is_valid());
    assert!(references[0].model().is_none());
    assert!(!references[1].is_valid());
    assert_eq!(graph.len(), 1);
    assert_eq!(fs.reads("/p/vars.py"), 0);
}

// ============================================================================
// CANCELLATION
// ============================================================================

#[test]
fn test_cancelled_before_start() {
    let fs = MemoryFs::new().with_file("/p/a.robot", "");
    let cancel = CancellationToken::new();
    cancel.cancel();
    let err = ImportResolver::new(&fs)
        .with_cancellation(cancel)
        .resolve(Path::new("/p/a.robot"))
        .unwrap_err();
    assert!(matches!(err, LoadError::Cancelled));
    assert_eq!(fs.total_reads(), 0);
}

// ============================================================================
// REAL FILE SYSTEM
// ============================================================================

#[test]
fn test_os_cycle_with_different_spellings() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("sub")).unwrap();
    std::fs::write(
        dir.path().join("a.robot"),
        settings(&["Resource  sub/b.resource"]),
    )
    .unwrap();
    std::fs::write(
        dir.path().join("sub/b.resource"),
        settings(&["Resource  ../sub/./../a.robot"]),
    )
    .unwrap();

    let graph = ImportResolver::new(OsFileSystem)
        .resolve(&dir.path().join("a.robot"))
        .unwrap();
    assert_eq!(graph.len(), 2);
    let b = graph
        .nodes()
        .find(|(_, node)| node.path.ends_with("b.resource"))
        .map(|(_, node)| node)
        .unwrap();
    assert_eq!(b.references[0].identity(), Some(graph.root()));
}
